use std::fmt;

use crate::error::Error;

/// Identifier of an entry within one `SendMessageBatch` request.
///
/// SQS requires 1 to 80 characters drawn from alphanumerics, `-` and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryId(String);

impl EntryId {
    pub const MAX_LEN: usize = 80;

    pub fn new<S: Into<String>>(id: S) -> Result<Self, Error> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::InvalidEntryId("id cannot be empty".to_string()));
        }
        if id.len() > Self::MAX_LEN {
            return Err(Error::InvalidEntryId(format!(
                "'{}' exceeds maximum length: {} > {} characters",
                id,
                id.len(),
                Self::MAX_LEN
            )));
        }
        if let Some(c) = id
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && *c != '-' && *c != '_')
        {
            return Err(Error::InvalidEntryId(format!(
                "invalid character '{}' in '{}'; allowed: alphanumeric, '-', '_'",
                c, id
            )));
        }
        Ok(Self(id))
    }

    /// Content-addressed id: a version 5 UUID (URL namespace) over `content`,
    /// as 32 lowercase hex digits.
    ///
    /// Equal content always yields the same id.
    pub fn for_content(content: &[u8]) -> Self {
        Self(
            uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_URL, content)
                .simple()
                .to_string(),
        )
    }

    /// Appends `-{position}` so a repeated id stays unique within its batch.
    pub fn with_position(&self, position: usize) -> Result<Self, Error> {
        Self::new(format!("{}-{}", self.0, position))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EntryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
