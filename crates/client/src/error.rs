use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-2xx answer from the server.
    #[error("{status}: {message}")]
    Api { status: u16, message: String, field_errors: BTreeMap<String, Vec<String>> },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Union of the two error bodies the server sends.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub form_errors: Vec<String>,
    #[serde(default)]
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl ClientError {
    pub(crate) fn from_body(status: u16, body: ErrorBody) -> Self {
        let message = match (body.message, body.form_errors.first()) {
            (_, Some(form)) => form.clone(),
            (Some(m), None) => m,
            (None, None) => format!("Request failed with status {status}"),
        };
        ClientError::Api { status, message, field_errors: body.field_errors }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }

    /// Text shown to a person: the server message, with field errors appended.
    pub fn display_text(&self) -> String {
        match self {
            ClientError::Api { message, field_errors, .. } if field_errors.is_empty() => message.clone(),
            ClientError::Api { message, field_errors, .. } => {
                let fields: Vec<String> = field_errors
                    .iter()
                    .map(|(f, msgs)| format!("{f}: {}", msgs.join(", ")))
                    .collect();
                format!("{message} ({})", fields.join("; "))
            }
            ClientError::Transport(e) => e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_form_errors_over_generic_message() {
        let body: ErrorBody = serde_json::from_value(serde_json::json!({
            "message": "Validation failed",
            "formErrors": ["expected value at line 1"],
            "fieldErrors": {}
        }))
        .unwrap();
        let e = ClientError::from_body(400, body);
        assert_eq!(e.display_text(), "expected value at line 1");
        assert_eq!(e.status(), Some(400));
    }

    #[test]
    fn appends_field_errors() {
        let body: ErrorBody = serde_json::from_value(serde_json::json!({
            "message": "Validation failed",
            "formErrors": [],
            "fieldErrors": {"name": ["Required"]}
        }))
        .unwrap();
        let e = ClientError::from_body(400, body);
        assert_eq!(e.display_text(), "Validation failed (name: Required)");
    }

    #[test]
    fn empty_body_gets_status_text() {
        let e = ClientError::from_body(502, ErrorBody::default());
        assert_eq!(e.to_string(), "502: Request failed with status 502");
    }
}
