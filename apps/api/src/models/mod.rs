pub mod candidate;
pub mod department;
pub mod interview;
pub mod job;

use thiserror::Error;

/// Returned when a stored or submitted status string is not one the enum knows.
#[derive(Debug, Error)]
#[error("unknown status '{0}'")]
pub struct UnknownStatus(pub String);
