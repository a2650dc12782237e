//! Static reference labels shared by job postings and the candidate portal.

use serde::Serialize;

/// Department slug → display label. The slug is the partition key in the document store.
pub const DEPARTMENTS: &[(&str, &str)] = &[
    ("engineering", "Engineering"),
    ("product", "Product Management"),
    ("design", "Design"),
    ("marketing", "Marketing"),
    ("sales", "Sales"),
    ("finance", "Finance"),
    ("hr", "Human Resources"),
    ("operations", "Operations"),
    ("frontend", "Frontend"),
    ("backend", "Backend"),
    ("software-engineer", "Software Engineer"),
    ("devops", "DevOps"),
];

pub const EXPERIENCE_LEVELS: &[(&str, &str)] = &[
    ("entry", "Entry Level (0-2 years)"),
    ("mid", "Mid Level (3-5 years)"),
    ("senior", "Senior Level (6-10 years)"),
    ("lead", "Lead/Principal (10+ years)"),
    ("executive", "Executive"),
];

#[derive(Debug, Serialize)]
pub struct Label {
    pub value: &'static str,
    pub label: &'static str,
}

/// Display label for a department slug. Unknown slugs get their first letter capitalized.
pub fn department_label(slug: &str) -> String {
    DEPARTMENTS
        .iter()
        .find(|(value, _)| *value == slug)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| capitalize_first(slug))
}

pub fn experience_label(level: &str) -> Option<&'static str> {
    EXPERIENCE_LEVELS
        .iter()
        .find(|(value, _)| *value == level)
        .map(|(_, label)| *label)
}

pub fn department_labels() -> Vec<Label> {
    DEPARTMENTS
        .iter()
        .map(|&(value, label)| Label { value, label })
        .collect()
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().to_string() + chars.as_str(),
    }
}
