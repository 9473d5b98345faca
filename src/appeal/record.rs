//! The appeal record and its raw draft form.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::reason::AppealReason;

/// Raw field values exactly as submitted, prior to any validation.
///
/// Every field is text here; the validator is the only place that
/// turns a draft into typed values. Stored units deserialize back
/// into this form so they can be re-validated on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppealDraft {
    pub surname: String,
    pub name: String,
    pub birth_date: String,
    pub phone: String,
    pub email: String,
    pub reason: String,
    pub problem_detected_at: String,
}

/// A fully validated customer appeal.
///
/// Instances only come out of [`validate`](super::validate); once
/// persisted they are never mutated or deleted. Dates and timestamps
/// are structured values and serialize as ISO-8601 text, so the
/// serialized unit is a flat object keyed by exactly these field
/// names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppealRecord {
    pub surname: String,
    pub name: String,
    pub birth_date: NaiveDate,
    pub phone: String,
    pub email: String,
    pub reason: AppealReason,
    pub problem_detected_at: NaiveDateTime,
}
