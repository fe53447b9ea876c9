use serde_json::Value;

/// Failure of a pin request, carrying a message suitable for display.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PinError {
    /// The request never produced an HTTP response.
    #[error("{0}")]
    Transport(String),

    /// The API answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A success status whose body could not be understood.
    #[error("Malformed response from pinning API: {0}")]
    MalformedResponse(String),

    /// The request could not be built from the given file.
    #[error("Invalid upload request: {0}")]
    InvalidRequest(String),
}

impl PinError {
    /// HTTP status of an API failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            PinError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Message for a non-success response.
///
/// Prefers the structured `error` field of a JSON body (a string, or an object's
/// `details`, `reason` or `message`), falling back to the status line.
pub(crate) fn api_error_message(status: u16, body: &str) -> String {
    let structured = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| match value.get("error") {
            Some(Value::String(message)) => Some(message.clone()),
            Some(Value::Object(fields)) => ["details", "reason", "message"]
                .iter()
                .find_map(|key| fields.get(*key).and_then(Value::as_str))
                .map(str::to_string),
            _ => None,
        })
        .filter(|message| !message.trim().is_empty());

    structured.unwrap_or_else(|| format!("Request failed with status code {}", status))
}
