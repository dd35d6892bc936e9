#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppErrorDetail {
    Message(String),
    Io {
        kind: std::io::ErrorKind,
        message: String,
    },
    Source(plugup_core::SourceError),
}

impl std::fmt::Display for AppErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Message(message) => write!(f, "{message}"),
            Self::Io { kind, message } => write!(f, "{kind}: {message}"),
            Self::Source(error) => write!(f, "{error}"),
        }
    }
}

impl From<String> for AppErrorDetail {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

impl From<&str> for AppErrorDetail {
    fn from(value: &str) -> Self {
        Self::Message(value.to_string())
    }
}

impl From<std::io::Error> for AppErrorDetail {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for AppErrorDetail {
    fn from(value: serde_json::Error) -> Self {
        Self::Message(value.to_string())
    }
}

impl From<plugup_core::SourceError> for AppErrorDetail {
    fn from(value: plugup_core::SourceError) -> Self {
        Self::Source(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    SettingsLoadFailed {
        path: String,
        details: AppErrorDetail,
    },
    SettingsInvalid {
        reason: String,
    },
    InputReadFailed {
        input: String,
        details: AppErrorDetail,
    },
    OutputWriteFailed {
        output: String,
        details: AppErrorDetail,
    },
    HttpClientUnavailable {
        details: AppErrorDetail,
    },
}

impl AppError {
    pub fn settings_load_failed(path: impl Into<String>, details: impl Into<AppErrorDetail>) -> Self {
        Self::SettingsLoadFailed {
            path: path.into(),
            details: details.into(),
        }
    }

    pub fn settings_invalid(reason: impl Into<String>) -> Self {
        Self::SettingsInvalid {
            reason: reason.into(),
        }
    }

    pub fn input_read_failed(input: impl Into<String>, details: impl Into<AppErrorDetail>) -> Self {
        Self::InputReadFailed {
            input: input.into(),
            details: details.into(),
        }
    }

    pub fn output_write_failed(
        output: impl Into<String>,
        details: impl Into<AppErrorDetail>,
    ) -> Self {
        Self::OutputWriteFailed {
            output: output.into(),
            details: details.into(),
        }
    }

    pub fn http_client_unavailable(details: impl Into<AppErrorDetail>) -> Self {
        Self::HttpClientUnavailable {
            details: details.into(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SettingsLoadFailed { path, details } => {
                write!(f, "Failed to load settings from {path}: {details}")
            }
            Self::SettingsInvalid { reason } => write!(f, "Invalid settings: {reason}"),
            Self::InputReadFailed { input, details } => {
                write!(f, "Failed to read {input}: {details}")
            }
            Self::OutputWriteFailed { output, details } => {
                write!(f, "Failed to write {output}: {details}")
            }
            Self::HttpClientUnavailable { details } => {
                write!(f, "HTTP client unavailable: {details}")
            }
        }
    }
}

impl std::error::Error for AppError {}
