use crate::error::ClientError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Ok,
    Warn,
    Err,
}

/// Transient message shown after a mutation.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn ok(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Ok, text: text.into() }
    }

    /// Conflicts and rejected input are the user's to fix and get a warning;
    /// anything else is an error.
    pub fn from_error(e: &ClientError) -> Self {
        let kind = match e.status() {
            Some(400) | Some(409) => NoticeKind::Warn,
            _ => NoticeKind::Err,
        };
        Self { kind, text: e.display_text() }
    }
}
