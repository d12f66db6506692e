//! Mapping of backend error bodies onto `AuthError` and `DataError`.
//!
//! The auth service has answered with several body shapes over time
//! (`msg`, `message`, `error_description`, bare `error`); the REST service
//! uses `{ code, message, details, hint }`. The message is kept verbatim
//! either way.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::domain::auth::AuthError;
use crate::ports::DataError;

/// PostgREST code for "single object requested, zero or many rows found".
const NO_SINGLE_ROW: &str = "PGRST116";

#[derive(Debug, Default, Deserialize)]
struct AuthErrorBody {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DataErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Builds an `AuthError::Api` from a non-success auth response.
pub(crate) fn auth_error(status: StatusCode, body: &str) -> AuthError {
    let parsed: AuthErrorBody = serde_json::from_str(body).unwrap_or_default();

    // `error` is a code when a description accompanies it, else the message
    let (message, code) = match (parsed.msg.or(parsed.message).or(parsed.error_description), parsed.error) {
        (Some(message), error) => (message, parsed.error_code.or(error)),
        (None, Some(error)) => (error, parsed.error_code),
        (None, None) => (fallback_message(status, body), parsed.error_code),
    };

    let error = AuthError::api(message).with_status(status.as_u16());
    match code {
        Some(code) => error.with_code(code),
        None => error,
    }
}

/// Builds a `DataError` from a non-success REST response.
pub(crate) fn data_error(status: StatusCode, body: &str) -> DataError {
    let parsed: DataErrorBody = serde_json::from_str(body).unwrap_or_default();

    if parsed.code.as_deref() == Some(NO_SINGLE_ROW) || status == StatusCode::NOT_ACCEPTABLE {
        return DataError::NotFound;
    }

    DataError::Api {
        message: parsed
            .message
            .unwrap_or_else(|| fallback_message(status, body)),
        code: parsed.code,
        status: Some(status.as_u16()),
    }
}

fn fallback_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
    } else {
        body.to_string()
    }
}

/// Maps a transport failure on a data request.
pub(crate) fn transport_error(error: reqwest::Error) -> DataError {
    tracing::warn!(error = %error, "data service unreachable");
    DataError::service_unavailable(error.to_string())
}

/// Reads an auth response, decoding `T` on success.
pub(crate) async fn read_auth<T: DeserializeOwned>(response: Response) -> Result<T, AuthError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| AuthError::service_unavailable(e.to_string()))?;

    if !status.is_success() {
        return Err(auth_error(status, &body));
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!(%status, error = %e, "undecodable auth response");
        AuthError::InvalidResponse(e.to_string())
    })
}

/// Reads a REST response, decoding `T` on success.
pub(crate) async fn read_data<T: DeserializeOwned>(response: Response) -> Result<T, DataError> {
    let status = response.status();
    let body = read_body(response).await?;

    if !status.is_success() {
        return Err(data_error(status, &body));
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!(%status, error = %e, "undecodable data response");
        DataError::InvalidResponse(e.to_string())
    })
}

/// Checks a REST response whose body is not needed (`Prefer: return=minimal`).
pub(crate) async fn expect_data_success(response: Response) -> Result<(), DataError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = read_body(response).await?;
    Err(data_error(status, &body))
}

async fn read_body(response: Response) -> Result<String, DataError> {
    response
        .text()
        .await
        .map_err(|e| DataError::service_unavailable(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_error_reads_msg_and_error_code() {
        let err = auth_error(
            StatusCode::BAD_REQUEST,
            r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#,
        );

        assert_eq!(
            err,
            AuthError::Api {
                message: "Invalid login credentials".to_string(),
                status: Some(400),
                code: Some("invalid_credentials".to_string()),
            }
        );
    }

    #[test]
    fn auth_error_reads_oauth_style_body() {
        let err = auth_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        );

        assert_eq!(err.to_string(), "Invalid login credentials");
        assert!(matches!(err, AuthError::Api { code: Some(ref c), .. } if c == "invalid_grant"));
    }

    #[test]
    fn auth_error_uses_bare_error_as_message() {
        let err = auth_error(StatusCode::UNPROCESSABLE_ENTITY, r#"{"error":"User already registered"}"#);
        assert_eq!(err.to_string(), "User already registered");
    }

    #[test]
    fn auth_error_falls_back_to_status_reason() {
        let err = auth_error(StatusCode::BAD_GATEWAY, "");
        assert_eq!(err.to_string(), "Bad Gateway");
    }

    #[test]
    fn data_error_reads_postgrest_body() {
        let err = data_error(
            StatusCode::FORBIDDEN,
            r#"{"code":"42501","message":"new row violates row-level security policy","details":null,"hint":null}"#,
        );

        assert_eq!(
            err,
            DataError::Api {
                message: "new row violates row-level security policy".to_string(),
                code: Some("42501".to_string()),
                status: Some(403),
            }
        );
    }

    #[test]
    fn single_row_miss_is_not_found() {
        let err = data_error(
            StatusCode::NOT_ACCEPTABLE,
            r#"{"code":"PGRST116","message":"JSON object requested, multiple (or no) rows returned"}"#,
        );
        assert_eq!(err, DataError::NotFound);
    }

    #[test]
    fn non_json_error_body_is_kept_as_message() {
        let err = data_error(StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded");
        assert_eq!(err.to_string(), "upstream exploded");
    }
}
