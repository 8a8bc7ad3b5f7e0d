//! Text preparation ahead of embedding.
//!
//! Asymmetric retrieval models (E5 family) expect the search side and the
//! document side to be framed differently. The job description is the query,
//! each resume is a passage.

use serde::{Deserialize, Serialize};

/// Which side of the comparison a text plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The job description.
    Query,
    /// A candidate resume.
    Passage,
}

/// Instruction framing expected by the embedding model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixStyle {
    /// No role markers (sentence-transformers style).
    #[default]
    Symmetric,
    /// `query: ` / `passage: ` markers.
    E5,
}

impl PrefixStyle {
    /// Parses a config value (`none`, `symmetric`, or `e5`; case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "symmetric" => Some(Self::Symmetric),
            "e5" => Some(Self::E5),
            _ => None,
        }
    }

    fn marker(self, role: Role) -> Option<&'static str> {
        match (self, role) {
            (Self::Symmetric, _) => None,
            (Self::E5, Role::Query) => Some("query: "),
            (Self::E5, Role::Passage) => Some("passage: "),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    style: PrefixStyle,
}

impl TextNormalizer {
    pub fn new(style: PrefixStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> PrefixStyle {
        self.style
    }

    /// Trims surrounding whitespace and applies the role marker.
    ///
    /// Empty (or whitespace-only) input stays empty so callers can reject it;
    /// no marker is ever added to it. Length is never truncated here.
    pub fn normalize(&self, text: &str, role: Role) -> String {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return String::new();
        }

        match self.style.marker(role) {
            Some(marker) => {
                let mut prepared = String::with_capacity(marker.len() + trimmed.len());
                prepared.push_str(marker);
                prepared.push_str(trimmed);
                prepared
            }
            None => trimmed.to_string(),
        }
    }
}
