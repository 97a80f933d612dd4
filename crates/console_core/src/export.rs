//! Export contract handed to the document renderer.
//!
//! The console never formats the document itself; it supplies a title, the
//! generation timestamp, the record count, and the ordered rows exactly as
//! the active filter produced them.

use chrono::{DateTime, Utc};
use shared::domain::{Rank, Station, SvcRecord, UserRecord};

const MISSING_FIELD: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSheet {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub total_records: usize,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl ReportSheet {
    /// Table of the currently visible SVC records.
    pub fn for_svcs(records: &[SvcRecord], generated_at: DateTime<Utc>) -> Self {
        Self {
            title: "SVC Management Report".to_string(),
            generated_at,
            total_records: records.len(),
            columns: vec!["SVC Number", "Rank", "Police Station", "Status", "Created Date"],
            rows: records
                .iter()
                .map(|svc| {
                    vec![
                        svc.officer_svc.clone(),
                        label_or_missing(svc.officer_rank.map(Rank::label)),
                        label_or_missing(svc.police_station.map(Station::label)),
                        if svc.is_active { "Active" } else { "Inactive" }.to_string(),
                        date_or_missing(svc.created_at),
                    ]
                })
                .collect(),
        }
    }

    /// Table of the currently visible user records.
    pub fn for_users(records: &[UserRecord], generated_at: DateTime<Utc>) -> Self {
        Self {
            title: "User Management Report".to_string(),
            generated_at,
            total_records: records.len(),
            columns: vec![
                "Full Name",
                "SVC Number",
                "Rank",
                "Police Station",
                "Email",
                "Phone",
                "Created Date",
            ],
            rows: records
                .iter()
                .map(|user| {
                    vec![
                        label_or_missing(user.full_name.as_deref()),
                        label_or_missing(user.officer_svc.as_deref()),
                        label_or_missing(user.officer_rank.map(Rank::label)),
                        label_or_missing(user.police_station.map(Station::label)),
                        label_or_missing(user.email.as_deref()),
                        label_or_missing(user.phone.as_deref()),
                        date_or_missing(user.created_at),
                    ]
                })
                .collect(),
        }
    }
}

fn label_or_missing(value: Option<&str>) -> String {
    value.unwrap_or(MISSING_FIELD).to_string()
}

fn date_or_missing(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|at| at.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|| MISSING_FIELD.to_string())
}

#[cfg(test)]
#[path = "tests/export_tests.rs"]
mod tests;
