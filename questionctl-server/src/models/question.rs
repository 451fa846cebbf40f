//! Question entity and its identifier

use uuid::Uuid;

use super::ValidationError;

/// Validated question identifier.
///
/// Identifiers are opaque strings chosen by the caller (batch upsert) or
/// generated server-side (create). The only rule is that they are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuestionId(String);

impl QuestionId {
    /// Create a question id, rejecting empty input.
    ///
    /// # Example
    /// ```
    /// use questionctl_server::models::QuestionId;
    ///
    /// assert!(QuestionId::new("q-1").is_ok());
    /// assert!(QuestionId::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty {
                field: "question id",
            });
        }
        Ok(Self(s.to_owned()))
    }

    /// Generate a fresh random identifier (UUID v4, hyphenated).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an identifier read back from storage.
    pub(crate) fn from_storage(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for QuestionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A question as seen by callers: identifier plus free text.
///
/// Audit columns (`created_at`, `updated_at`, `deleted_at`) stay inside the
/// persistence layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
}

impl Question {
    pub fn new(id: QuestionId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}
