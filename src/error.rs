//! Errors raised while looking for capture devices.

/// Failures an enumerator can report.
///
/// Output that does not look the way the parsers expect is not an error; the
/// offending block is simply left out of the result.
#[derive(Debug, thiserror::Error)]
pub enum EnumerationError {
    #[error("{program} not found. {install_hint}")]
    ToolNotFound {
        program: String,
        install_hint: String
    },

    #[error("{program} {args} failed to run: {detail}")]
    ToolExecutionFailed {
        program: String,
        args: String,
        detail: String
    },

    #[error("Capture framework error: {message}")]
    Platform { message: String }
}

impl EnumerationError {
    pub fn platform(msg: impl Into<String>) -> Self {
        Self::Platform {
            message: msg.into()
        }
    }

    pub fn is_tool_not_found(&self) -> bool {
        matches!(self, Self::ToolNotFound { .. })
    }
}
