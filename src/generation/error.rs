use thiserror::Error;

/// Failure of a structured prompt call.
///
/// Every variant means the call produced no usable scene; callers surface a
/// single failure message and keep the variant for diagnostics.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The mood/theme was empty or whitespace-only
    #[error("mood or theme must not be empty")]
    EmptyMood,

    /// The generation service could not be reached
    #[error("generation service request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("generation service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered but produced no structured output
    #[error("generation service returned no output for '{prompt}'")]
    NoOutput { prompt: String },

    /// The output did not match the expected schema
    #[error("output of '{prompt}' does not match the expected schema: {source}")]
    InvalidOutput {
        prompt: String,
        source: serde_json::Error,
    },
}
