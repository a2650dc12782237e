use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::labels::department_label;

/// Partition document for a department (`jobCategories/{value}` or `candidateCategories/{value}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub value: String,
    pub name: String,
    pub last_activity_at: DateTime<Utc>,
}

impl Department {
    pub fn touch(slug: &str, at: DateTime<Utc>) -> Self {
        Self {
            value: slug.to_string(),
            name: department_label(slug),
            last_activity_at: at,
        }
    }
}
