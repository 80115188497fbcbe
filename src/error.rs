//! Defines the app level error type and its conversion to the uniform JSON
//! error response.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::envelope::ErrorBody;

/// The errors that may occur in the application.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum Error {
    /// The Notion API token was not set in the process environment.
    ///
    /// This is fatal for every request until the server is restarted with the
    /// variable set. Endpoints must return this error without attempting a
    /// network call.
    #[error("NOTION_API_TOKEN is not configured")]
    MissingApiToken,

    /// Notion answered 404 to a database query or page create.
    ///
    /// In practice this means the database has not been shared with the
    /// integration, or the database ID baked into [crate::schema] no longer
    /// matches the live workspace.
    #[error("the Notion database is not shared with the integration or its ID is misconfigured")]
    DatabaseNotShared,

    /// Notion answered 401 or 403.
    #[error("the Notion API token is invalid or does not have access")]
    InvalidCredential,

    /// Notion answered with any other non-success status code.
    #[error("Notion API error: {0}")]
    NotionStatus(u16),

    /// The outbound call itself failed, or the response body could not be
    /// decoded.
    ///
    /// The string form of the underlying `reqwest` error is kept so the enum
    /// stays comparable in tests.
    #[error("could not reach the Notion API: {0}")]
    Transport(String),

    /// A create-transaction request carried a type token other than
    /// "income" or "expense".
    ///
    /// Rejected outright rather than silently mapped to an expense label,
    /// which is what an unrecognized token would otherwise become.
    #[error("\"{0}\" is not a valid transaction type, expected \"income\" or \"expense\"")]
    InvalidTransactionType(String),
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::Transport(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {self}");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn missing_token_message_matches_configuration_error() {
        assert_eq!(
            Error::MissingApiToken.to_string(),
            "NOTION_API_TOKEN is not configured"
        );
    }

    #[test]
    fn not_found_message_mentions_sharing() {
        let message = Error::DatabaseNotShared.to_string();
        assert!(message.contains("not shared"), "got message: {message}");
    }

    #[test]
    fn other_statuses_carry_the_status_code() {
        assert_eq!(
            Error::NotionStatus(429).to_string(),
            "Notion API error: 429"
        );
    }
}
