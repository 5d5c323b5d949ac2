use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned error (HTTP {status}): {body}")]
    Status { status: u16, body: String },

    #[error("request failed after {attempts} attempts with status: {status}")]
    RetriesExhausted {
        attempts: u32,
        status: u16,
        body: String,
    },

    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to parse response: {message}")]
    Parse { message: String, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("error attaching policy {policy_id} to role {role_id}: {source}")]
    Attach {
        policy_id: String,
        role_id: String,
        #[source]
        source: Box<ApiError>,
    },

    #[error("error detaching policy {policy_id} from role {role_id}: {source}")]
    Detach {
        policy_id: String,
        role_id: String,
        #[source]
        source: Box<ApiError>,
    },
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } | ApiError::RetriesExhausted { status, .. } => {
                Some(*status)
            }
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            ApiError::Attach { source, .. } | ApiError::Detach { source, .. } => {
                source.status_code()
            }
            _ => None,
        }
    }

    /// Raw response body of a failed request.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Status { body, .. }
            | ApiError::RetriesExhausted { body, .. }
            | ApiError::Parse { body, .. } => Some(body),
            ApiError::Attach { source, .. } | ApiError::Detach { source, .. } => source.body(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    pub(crate) fn not_found(body: impl Into<String>) -> Self {
        ApiError::Status {
            status: 404,
            body: body.into(),
        }
    }
}
