use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::modules::detector::models::Candidate;

/// 残留扫描报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub id: String,
    pub program_name: String,
    pub generated_at: DateTime<Utc>,
    pub candidates: Vec<Candidate>,
    pub warnings: Vec<String>,
}

impl ScanReport {
    pub fn new(program_name: String, candidates: Vec<Candidate>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            program_name,
            generated_at: Utc::now(),
            candidates,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: String) -> Self {
        self.warnings.push(warning);
        self
    }
}
