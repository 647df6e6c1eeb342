use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("unauthorized")]
    Unauthorized { detail: Option<String> },

    #[error("request rejected ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Rejected { status: u16, detail: Option<String> },

    #[error("server error ({status})")]
    Server { status: u16, detail: Option<String> },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("{0}")]
    Validation(String),
}

/// How a failure should be presented: 401s are already handled by the
/// interceptor, rejections carry a message meant for the user, everything
/// else is a generic failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Authentication,
    Rejected,
    Failure,
}

impl ClientError {
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let detail = extract_detail(body);
        match status {
            401 => ClientError::Unauthorized { detail },
            400..=499 => ClientError::Rejected { status, detail },
            _ => ClientError::Server { status, detail },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Unauthorized { .. } => ErrorKind::Authentication,
            ClientError::Rejected { .. } | ClientError::Validation(_) => ErrorKind::Rejected,
            _ => ErrorKind::Failure,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized { .. } => Some(401),
            ClientError::Rejected { status, .. } | ClientError::Server { status, .. } => {
                Some(*status)
            }
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Text for a transient notification. Rejections show the server's detail
    /// verbatim when it sent one.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Rejected {
                detail: Some(detail),
                ..
            }
            | ClientError::Unauthorized {
                detail: Some(detail),
            } => detail.clone(),
            ClientError::Validation(msg) => msg.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Pulls `detail` out of an error body. Validation failures arrive as a list
/// of `{loc, msg, type}` objects.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
