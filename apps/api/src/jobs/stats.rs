use serde::{Deserialize, Serialize};

use crate::models::job::JobStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: JobStatus,
    pub count: i64,
}

/// Response of `GET /api/jobs/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStats {
    /// One entry per status in declaration order, zero-filled.
    pub status_breakdown: Vec<StatusCount>,
    pub total: i64,
}

impl JobStats {
    pub fn from_counts(counts: &[(JobStatus, i64)]) -> Self {
        let status_breakdown: Vec<StatusCount> = JobStatus::ALL
            .iter()
            .map(|status| StatusCount {
                status: *status,
                count: counts
                    .iter()
                    .filter(|(s, _)| s == status)
                    .map(|(_, n)| *n)
                    .sum(),
            })
            .collect();
        let total = status_breakdown.iter().map(|s| s.count).sum();
        JobStats {
            status_breakdown,
            total,
        }
    }
}

#[cfg(test)]
impl JobStats {
    fn count(&self, status: JobStatus) -> i64 {
        self.status_breakdown
            .iter()
            .find(|s| s.status == status)
            .map_or(0, |s| s.count)
    }
}
