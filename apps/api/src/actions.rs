//! The response envelope returned by every server action, and the body
//! extractor that keeps malformed requests inside that envelope.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::errors::ActionError;
use crate::flows::validation::FieldErrors;

/// `{ message, fields?, data?, isError }`, the shape the web client renders.
///
/// Failures are reported inside the envelope, never as raw errors.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub is_error: bool,
}

impl<T> ActionResult<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            fields: None,
            data: Some(data),
            is_error: false,
        }
    }

    /// Converts a failure into its user-facing form, logging the upstream detail.
    pub fn failure(subject: &str, err: ActionError) -> Self {
        match &err {
            ActionError::Validation(fields) => info!("{subject}: rejected input ({fields})"),
            ActionError::StillProcessing(job) => info!("{subject}: job {job} not ready"),
            ActionError::ServiceUnavailable(detail) => warn!("{subject}: {detail}"),
            ActionError::Generation(detail) => warn!("{subject}: no usable output: {detail}"),
            ActionError::Network(detail) => error!("{subject}: upstream call failed: {detail}"),
        }

        let message = err.user_message(subject);
        let fields = err.field_errors().cloned();

        Self {
            message,
            fields,
            data: None,
            is_error: true,
        }
    }

    pub fn from_outcome(subject: &str, outcome: Result<T, ActionError>) -> Self {
        match outcome {
            Ok(data) => Self::success(format!("{subject} generated successfully."), data),
            Err(err) => Self::failure(subject, err),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Request body
// ────────────────────────────────────────────────────────────────────────────

const BODY_FIELD: &str = "body";
const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// JSON body extractor for server actions.
///
/// A body that fails to decode (missing field, unknown enum value, bad JSON)
/// is answered with a 200 validation `ActionResult` instead of axum's plain
/// 4xx rejection.
pub struct ActionJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ActionJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Json<ActionResult<()>>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                let fields = rejection_fields(&rejection);
                Err(Json(ActionResult::failure(
                    "Request",
                    ActionError::Validation(fields),
                )))
            }
        }
    }
}

fn rejection_fields(rejection: &JsonRejection) -> FieldErrors {
    match rejection {
        JsonRejection::JsonDataError(e) => data_error_fields(&e.body_text()),
        other => {
            let mut errors = FieldErrors::default();
            errors.add(BODY_FIELD, other.body_text());
            errors
        }
    }
}

/// Maps a decode message such as "language: unknown variant `fr`, ..." or
/// "missing field `timeframe` at line 1 column 9" to the field it concerns.
fn data_error_fields(text: &str) -> FieldErrors {
    let detail = text.strip_prefix(DATA_ERROR_PREFIX).unwrap_or(text);
    let detail = match detail.rfind(" at line ") {
        Some(at) => &detail[..at],
        None => detail,
    };

    let mut errors = FieldErrors::default();
    if let Some(missing) = detail
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next())
    {
        errors.add(missing, "This field is required.");
    } else if let Some((path, message)) = detail
        .split_once(": ")
        .filter(|(path, _)| !path.is_empty() && !path.contains(' '))
    {
        let field = path.split(['.', '[']).next().unwrap_or(path);
        errors.add(field, format!("Invalid value: {message}."));
    } else {
        errors.add(BODY_FIELD, detail.to_string());
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let result = ActionResult::success("Done.", serde_json::json!({"title": "x"}));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["message"], "Done.");
        assert_eq!(json["isError"], false);
        assert_eq!(json["data"]["title"], "x");
        assert!(json.get("fields").is_none());
    }

    #[test]
    fn test_validation_failure_carries_fields() {
        let mut fields = FieldErrors::default();
        fields.add("goal", "Goal must be at least 5 characters.");
        let result: ActionResult<()> =
            ActionResult::failure("Roadmap", ActionError::Validation(fields));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isError"], true);
        assert_eq!(json["fields"]["goal"][0], "Goal must be at least 5 characters.");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_missing_field_is_keyed_by_name() {
        let fields = data_error_fields(
            "Failed to deserialize the JSON body into the target type: \
             missing field `timeframe` at line 1 column 34",
        );
        assert_eq!(
            fields.get("timeframe").unwrap(),
            &vec!["This field is required.".to_string()]
        );
    }

    #[test]
    fn test_unknown_variant_is_keyed_by_path() {
        let fields = data_error_fields(
            "Failed to deserialize the JSON body into the target type: \
             language: unknown variant `fr`, expected `en` or `hi` at line 1 column 60",
        );
        let messages = fields.get("language").unwrap();
        assert!(messages[0].contains("unknown variant `fr`"));
        assert!(!messages[0].contains("line 1"));
    }

    #[test]
    fn test_nested_path_uses_top_level_field() {
        let fields = data_error_fields("history[0].role: unknown variant `bot`");
        assert!(fields.get("history").is_some());
    }

    #[test]
    fn test_unrecognised_message_falls_back_to_body() {
        let fields = data_error_fields("invalid type: string \"x\", expected u32");
        assert!(fields.get("body").is_some());
    }

    #[test]
    fn test_from_outcome_success_message() {
        let result = ActionResult::from_outcome("Story", Ok(1));
        assert_eq!(result.message, "Story generated successfully.");
        assert!(!result.is_error);
    }

    #[test]
    fn test_from_outcome_generation_failure_hides_detail() {
        let result: ActionResult<()> = ActionResult::from_outcome(
            "Story",
            Err(ActionError::Generation("missing field `moral`".to_string())),
        );
        assert!(result.is_error);
        assert!(!result.message.contains("moral"));
        assert!(result.fields.is_none());
    }
}
