//! Error types for the GraphQL requester.

use thiserror::Error;
use uma_lib::UmaError;

/// Errors raised while building, sending or decoding a GraphQL request.
#[derive(Error, Debug)]
pub enum RequesterError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    #[error("invalid query payload: {0}")]
    InvalidQuery(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("lightspark request failed: {0}")]
    HttpStatus(reqwest::StatusCode),

    /// First entry of the response `errors` array.
    #[error("{}", graphql_message(.name, .message))]
    Graphql {
        /// `extensions.error_name`, when the server supplies one
        name: Option<String>,
        message: String,
    },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

fn graphql_message(name: &Option<String>, message: &str) -> String {
    match name {
        Some(name) => format!("{} - {}", name, message),
        None => message.to_string(),
    }
}

impl From<RequesterError> for UmaError {
    fn from(err: RequesterError) -> Self {
        UmaError::InvoiceCreationFailed(err.to_string())
    }
}
