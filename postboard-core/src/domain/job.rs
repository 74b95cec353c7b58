//! Effect job domain types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dto::job::JobStatusReport;

/// Background image-effect job as last seen by the client
///
/// Only the most recent status report is kept; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub name: String,
    pub status: JobStatus,
    pub reason: Option<String>,
}

impl Job {
    /// A freshly created job, assumed running until the first report
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: JobStatus::Running,
            reason: None,
        }
    }

    /// Replace the known status with a new report
    pub fn apply(&mut self, report: JobStatusReport) {
        self.reason = report.reason().map(str::to_string);
        self.status = report.status;
    }

    /// Whether the job has reached `Succeeded` or `Failed`
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Job status as reported by the status endpoint
///
/// Unknown values are preserved verbatim so they can be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Running,
    Succeeded,
    Failed,
    Other(String),
}

impl JobStatus {
    /// Wire representation of the status
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Running => "running",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
            JobStatus::Other(raw) => raw,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }
}

impl From<String> for JobStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "running" => JobStatus::Running,
            "succeeded" => JobStatus::Succeeded,
            "failed" => JobStatus::Failed,
            _ => JobStatus::Other(raw),
        }
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_wire() {
        let status: JobStatus = serde_json::from_str("\"succeeded\"").unwrap();
        assert_eq!(status, JobStatus::Succeeded);

        let status: JobStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, JobStatus::Other("pending".to_string()));
        assert_eq!(status.to_string(), "pending");
        assert!(!status.is_terminal());
    }

    #[test]
    fn test_job_apply_report() {
        let mut job = Job::new("effect-abc");
        assert_eq!(job.status, JobStatus::Running);
        assert!(!job.is_terminal());

        job.apply(JobStatusReport {
            status: JobStatus::Failed,
            reason: Some("BackoffLimitExceeded".to_string()),
        });
        assert!(job.is_terminal());
        assert_eq!(job.reason.as_deref(), Some("BackoffLimitExceeded"));
    }

    #[test]
    fn test_job_apply_blank_reason_is_absent() {
        let mut job = Job::new("effect-abc");
        job.apply(JobStatusReport {
            status: JobStatus::Failed,
            reason: Some(String::new()),
        });
        assert_eq!(job.reason, None);
    }
}
