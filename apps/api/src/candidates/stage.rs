use serde::Serialize;

/// Pipeline stage inferred from a free-form candidate status.
///
/// Informal progression: received → screening → review → interview → offer | hired | rejected.
/// Nothing enforces the order; this only classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStage {
    Received,
    Screening,
    Review,
    Interview,
    Offer,
    Hired,
    Rejected,
    Other,
}

impl CandidateStage {
    pub fn classify(status: &str) -> Self {
        let status = status.trim().to_lowercase();
        match status.as_str() {
            "received" => Self::Received,
            "screening" => Self::Screening,
            "review" => Self::Review,
            "offer" => Self::Offer,
            "hired" => Self::Hired,
            "rejected" => Self::Rejected,
            s if s.starts_with("interview") => Self::Interview,
            _ => Self::Other,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Hired | Self::Rejected)
    }
}
