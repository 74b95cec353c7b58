//! Effect job DTOs

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::effect::Effect;
use crate::domain::job::JobStatus;

/// Body of `POST /api/jobs/effect`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEffectJob {
    pub post_id: String,
    pub effect: Effect,
}

/// Response of `POST /api/jobs/effect`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectJobCreated {
    pub job_name: String,
}

/// Response of `GET /api/jobs/{job_name}/status`
///
/// A missing or non-string `status` is kept as an unrecognised status rather
/// than rejected, so the caller keeps polling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatusReport {
    #[serde(default = "unknown_status", deserialize_with = "lenient_status")]
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl JobStatusReport {
    /// Failure reason, treating an empty string as absent
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref().filter(|r| !r.is_empty())
    }
}

fn unknown_status() -> JobStatus {
    JobStatus::Other("unknown".to_string())
}

fn lenient_status<'de, D>(deserializer: D) -> Result<JobStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(raw)) => JobStatus::from(raw),
        None | Some(Value::Null) => unknown_status(),
        Some(other) => JobStatus::Other(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_effect_job_wire_shape() {
        let req = CreateEffectJob {
            post_id: "p1".to_string(),
            effect: Effect::Invert,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, serde_json::json!({"post_id": "p1", "effect": "invert"}));
    }

    #[test]
    fn test_status_report_without_reason() {
        let report: JobStatusReport = serde_json::from_str(r#"{"status":"running"}"#).unwrap();
        assert_eq!(report.status, JobStatus::Running);
        assert_eq!(report.reason(), None);
    }

    #[test]
    fn test_status_report_empty_reason() {
        let report: JobStatusReport =
            serde_json::from_str(r#"{"status":"failed","reason":""}"#).unwrap();
        assert_eq!(report.status, JobStatus::Failed);
        assert_eq!(report.reason(), None);
    }

    #[test]
    fn test_status_report_tolerates_odd_status() {
        let missing: JobStatusReport = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.status, JobStatus::Other("unknown".to_string()));

        let null: JobStatusReport = serde_json::from_str(r#"{"status":null}"#).unwrap();
        assert_eq!(null.status, JobStatus::Other("unknown".to_string()));

        let number: JobStatusReport = serde_json::from_str(r#"{"status":3}"#).unwrap();
        assert_eq!(number.status, JobStatus::Other("3".to_string()));
    }
}
