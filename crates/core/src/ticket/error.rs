use serde::Serialize;
use thiserror::Error;

/// Errors produced when validating ticket input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TicketError {
    #[error("Title is required")]
    TitleRequired,
    #[error("Title must have between {min} and {max} characters")]
    TitleLength { min: usize, max: usize },
    #[error("Description is required")]
    DescriptionRequired,
}

/// A single failing field, as reported to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field that failed validation for one request.
#[derive(Debug, Default, Error, Clone, PartialEq, Eq, Serialize)]
#[error("Validation failed: {}", summarize(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Wraps a request body that could not be parsed at all.
    pub fn body(message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new("body", message)],
        }
    }

    pub fn push(&mut self, field: &'static str, error: TicketError) {
        self.errors.push(FieldError::new(field, error.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
