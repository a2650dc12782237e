use serde::{Deserialize, Serialize};

use crate::labels::{department_label, experience_label};
use crate::models::job::{Job, JobStatus};

/// Query parameters of the jobs list. `all` or an absent value disables a criterion.
#[derive(Debug, Default, Deserialize)]
pub struct JobFilter {
    pub search: Option<String>,
    pub department: Option<String>,
    pub status: Option<String>,
}

impl JobFilter {
    pub fn matches(&self, job: &Job) -> bool {
        let search_ok = match active(&self.search) {
            Some(term) => {
                let term = term.to_lowercase();
                [&job.title, &job.company, &job.location]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&term))
            }
            None => true,
        };
        let department_ok = active(&self.department).map_or(true, |d| job.department == d);
        let status_ok = active(&self.status).map_or(true, |s| {
            s.parse::<JobStatus>()
                .map(|status| status == job.status)
                .unwrap_or(false)
        });
        search_ok && department_ok && status_ok
    }
}

pub(crate) fn active(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

/// A job as listed on the dashboard, with display-ready labels.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobView {
    #[serde(flatten)]
    pub job: Job,
    pub department_label: String,
    pub experience_level_label: Option<&'static str>,
    pub salary_display: String,
}

impl From<Job> for JobView {
    fn from(job: Job) -> Self {
        Self {
            department_label: department_label(&job.department),
            experience_level_label: experience_label(&job.experience_level),
            salary_display: format_salary(&job),
            job,
        }
    }
}

/// "USD 100,000 - 150,000", "(min)"/"(max)" for one-sided ranges, else "Not Disclosed".
/// A zero bound counts as absent.
pub fn format_salary(job: &Job) -> String {
    let currency = if job.salary_currency.trim().is_empty() {
        "$"
    } else {
        job.salary_currency.as_str()
    };
    let disclosed = |v: Option<f64>| v.filter(|v| *v != 0.0 && v.is_finite());

    match (disclosed(job.salary_min), disclosed(job.salary_max)) {
        (Some(min), Some(max)) => format!(
            "{currency} {} - {}",
            group_thousands(min),
            group_thousands(max)
        ),
        (Some(min), None) => format!("{currency} {} (min)", group_thousands(min)),
        (None, Some(max)) => format!("{currency} {} (max)", group_thousands(max)),
        (None, None) => "Not Disclosed".to_string(),
    }
}

fn group_thousands(value: f64) -> String {
    let rendered = format!("{}", (value * 1000.0).round() / 1000.0);
    let (sign, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
