//! Classification of extraction tool failures
//!
//! The tool only reports failures as free text, so the mapping to an HTTP status
//! and a user-facing message is a substring match. It lives behind
//! [`ErrorClassifier`] so the table can change without touching the handler.
//!
//! The patterns match the tool's English output while the messages are localized;
//! nothing guarantees the tool keeps that wording across releases.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Status and message chosen for a tool failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// HTTP status of the response
    pub status: StatusCode,
    /// Text placed in the `error` field of the response body
    pub message: String,
}

/// Maps the raw text of a tool failure to a response
pub trait ErrorClassifier: Send + Sync {
    /// Classify a tool error message
    fn classify(&self, tool_error: &str) -> Classification;
}

/// One row of the substring table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClassificationRule {
    /// Case-sensitive substring searched for in the tool's message
    pub pattern: String,
    /// HTTP status returned when the pattern matches
    pub status: u16,
    /// Message returned when the pattern matches
    pub message: String,
}

impl ClassificationRule {
    /// Create a rule
    pub fn new(pattern: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            status,
            message: message.into(),
        }
    }
}

/// The rules the service ships with
pub fn default_rules() -> Vec<ClassificationRule> {
    vec![
        ClassificationRule::new(
            "This video is unavailable",
            400,
            "Vídeo indisponível ou URL incorreta.",
        ),
        ClassificationRule::new(
            "Private video",
            403,
            "Este vídeo é privado e não pode ser baixado.",
        ),
        ClassificationRule::new(
            "age confirmation",
            403,
            "Este vídeo requer confirmação de idade.",
        ),
    ]
}

/// Ordered substring table; the first matching rule wins, no match is a 500
/// that surfaces the raw message.
#[derive(Clone, Debug)]
pub struct SubstringClassifier {
    rules: Vec<ClassificationRule>,
}

impl SubstringClassifier {
    /// Create a classifier from an ordered rule list
    pub fn new(rules: Vec<ClassificationRule>) -> Self {
        Self { rules }
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }
}

impl Default for SubstringClassifier {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl ErrorClassifier for SubstringClassifier {
    fn classify(&self, tool_error: &str) -> Classification {
        for rule in &self.rules {
            if tool_error.contains(rule.pattern.as_str()) {
                return Classification {
                    status: StatusCode::from_u16(rule.status)
                        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                    message: rule.message.clone(),
                };
            }
        }

        Classification {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Erro ao processar vídeo: {}", tool_error),
        }
    }
}
