//! Response bodies.

use serde::Serialize;

use crate::appeal::AppealRecord;
use crate::store::RecordId;

/// Body returned for an accepted submission: the assigned identifier
/// and the normalized record echoed back.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitResponse {
    pub id: RecordId,
    pub appeal: AppealRecord,
}

/// Listing body.
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub data: Vec<AppealRecord>,
    pub count: usize,
}

impl ListResponse {
    pub fn new(data: Vec<AppealRecord>) -> Self {
        let count = data.len();
        Self { data, count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_counts_records() {
        let response = ListResponse::new(Vec::new());
        assert_eq!(response.count, 0);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["count"], 0);
        assert!(json["data"].as_array().unwrap().is_empty());
    }
}
