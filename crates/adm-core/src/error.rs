use crate::types::SourceSpan;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
#[error("{code}: {message}")]
pub struct AdmError {
    pub code: String,
    pub message: String,
    pub span: Option<SourceSpan>,
}

impl AdmError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            span: None,
        }
    }

    pub fn with_span(
        code: impl Into<String>,
        message: impl Into<String>,
        span: SourceSpan,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            span: Some(span),
        }
    }

    /// Attaches a span to an error built without one; an already-present
    /// span wins because it points closer to the offending text.
    pub fn at(mut self, span: SourceSpan) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }
}

pub fn invalid_value(field: &str, raw: &str, span: SourceSpan) -> AdmError {
    AdmError::with_span(
        "INVALID_VALUE",
        format!("Invalid value \"{}\" for \"{}\".", raw, field),
        span,
    )
}
