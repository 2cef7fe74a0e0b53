//! Request body decoding shared by the mutating handlers.
//!
//! Clients send either a JSON body or a URL-encoded form depending on
//! context, declared via `Content-Type`. [`JsonOrForm`] performs that tagged
//! decode once, so handlers receive a typed payload and never branch on
//! content type themselves.

use axum::extract::{Form, FromRequest, Json, Request};
use axum::http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use slurm_bridge_core::error::CoreError;
use slurm_bridge_core::job::JobId;

use crate::error::AppError;

/// Decode the request body as JSON when the declared content type is
/// `application/json`, and as a URL-encoded form otherwise.
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));

        if is_json {
            let Json(payload) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))?;
            Ok(Self(payload))
        } else {
            let Form(payload) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid form body: {e}")))?;
            Ok(Self(payload))
        }
    }
}

/// Body payload naming the target job for `scancel`/`scontrol`.
#[derive(Debug, Deserialize)]
pub struct JobPayload {
    /// The raw job designator; absent and malformed values are rejected
    /// before any handler logic runs.
    #[serde(rename = "jobID")]
    pub job_id: Option<String>,
}

impl JobPayload {
    /// Validate the job ID, rejecting absent or non-numeric values before
    /// any process is spawned.
    pub fn job_id(&self) -> Result<JobId, CoreError> {
        let raw = self
            .job_id
            .as_deref()
            .ok_or(CoreError::MissingArgument("jobID"))?;
        JobId::parse(raw)
    }
}

/// Body payload carrying the script designator for `sbatch`.
#[derive(Debug, Deserialize)]
pub struct SubmitPayload {
    /// A filesystem path or inline script text, depending on the query-level
    /// `inputType` selector.
    pub input: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn job_payload_validates_the_id() {
        let payload = JobPayload {
            job_id: Some("123".to_string()),
        };
        assert_eq!(payload.job_id().expect("valid").as_str(), "123");
    }

    #[test]
    fn job_payload_rejects_missing_id() {
        let payload = JobPayload { job_id: None };
        assert_matches!(payload.job_id(), Err(CoreError::MissingArgument("jobID")));
    }

    #[test]
    fn job_payload_rejects_malformed_id() {
        let payload = JobPayload {
            job_id: Some("12a4".to_string()),
        };
        assert_matches!(payload.job_id(), Err(CoreError::InvalidJobId(_)));
    }

    #[test]
    fn job_payload_decodes_the_wire_field_name() {
        let payload: JobPayload = serde_json::from_str(r#"{"jobID": "42"}"#).expect("decode");
        assert_eq!(payload.job_id.as_deref(), Some("42"));
    }
}
