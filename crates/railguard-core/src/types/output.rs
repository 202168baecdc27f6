//! Generated-output variants flowing through the pipeline.

use serde::{Deserialize, Serialize};

/// AI-generated output destined for an end user.
///
/// A tagged union instead of runtime shape-sniffing: every producer must
/// pick a variant, so disclaimer wrapping is exhaustive and shapes that
/// cannot be wrapped never reach the pipeline silently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeneratedOutput {
    PlainText { text: String },
    Structured { content: String },
}

impl GeneratedOutput {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::PlainText { text: text.into() }
    }

    pub fn structured(content: impl Into<String>) -> Self {
        Self::Structured {
            content: content.into(),
        }
    }

    /// The user-visible text of this output.
    pub fn text(&self) -> &str {
        match self {
            Self::PlainText { text } => text,
            Self::Structured { content } => content,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::PlainText { text } => text,
            Self::Structured { content } => content,
        }
    }
}

/// Caller context attached to an output as it moves through the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputContext {
    pub session_id: String,
    pub user_id: Option<String>,
    pub model_name: String,
    pub feature_flags_used: Vec<String>,
}
