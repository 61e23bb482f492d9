use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Raised while building a client, never at call time.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("invalid value for `{field}`: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },

    /// The request was sent and rejected, or never reached the API.
    #[error("{message}{}", remote_suffix(.remote_message, .remote_code))]
    RemoteApi {
        status: Option<u16>,
        message: String,
        remote_message: Option<String>,
        remote_code: Option<i64>,
    },
}

impl Error {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }

    /// HTTP status of a rejected request, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteApi { status, .. } => *status,
            _ => None,
        }
    }

    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Self::RemoteApi { remote_message, .. } => remote_message.as_deref(),
            _ => None,
        }
    }

    pub fn remote_code(&self) -> Option<i64> {
        match self {
            Self::RemoteApi { remote_code, .. } => *remote_code,
            _ => None,
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Configuration(errors.to_string())
    }
}

fn remote_suffix(message: &Option<String>, code: &Option<i64>) -> String {
    match (message, code) {
        (Some(message), Some(code)) => format!(" (cloudflare error {code}: {message})"),
        (Some(message), None) => format!(" (cloudflare: {message})"),
        (None, Some(code)) => format!(" (cloudflare error {code})"),
        (None, None) => String::new(),
    }
}
