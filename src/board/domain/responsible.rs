//! Household responsibles that tasks are assigned to.

use super::{BoardDomainError, ResponsibleId, blank};
use serde::{Deserialize, Serialize};

/// Colour used when a responsible has none recorded.
pub const DEFAULT_RESPONSIBLE_COLOR: &str = "#3b82f6";

/// A household member who can be assigned tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Responsible {
    id: ResponsibleId,
    #[serde(rename = "nome")]
    name: String,
    #[serde(rename = "cor", default, with = "blank")]
    color: Option<String>,
}

impl Responsible {
    /// Creates a responsible with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyResponsibleName`] when the name is
    /// blank.
    pub fn new(
        name: impl Into<String>,
        color: Option<String>,
    ) -> Result<Self, BoardDomainError> {
        Self::with_id(ResponsibleId::new(), name, color)
    }

    /// Creates a responsible with a caller-supplied identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyResponsibleName`] when the name is
    /// blank.
    pub fn with_id(
        id: ResponsibleId,
        name: impl Into<String>,
        color: Option<String>,
    ) -> Result<Self, BoardDomainError> {
        Ok(Self {
            id,
            name: validated_name(name.into())?,
            color: normalized_color(color),
        })
    }

    /// Returns the responsible identifier.
    #[must_use]
    pub const fn id(&self) -> &ResponsibleId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the recorded colour, if any.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Returns the recorded colour or [`DEFAULT_RESPONSIBLE_COLOR`].
    #[must_use]
    pub fn display_color(&self) -> &str {
        self.color().unwrap_or(DEFAULT_RESPONSIBLE_COLOR)
    }

    /// Returns whether the name contains `pattern`, ignoring case.
    #[must_use]
    pub fn name_matches(&self, pattern: &str) -> bool {
        self.name
            .to_lowercase()
            .contains(&pattern.trim().to_lowercase())
    }

    /// Replaces the name and colour. The identifier never changes.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyResponsibleName`] when the name is
    /// blank; the responsible is left untouched.
    pub fn rename(
        &mut self,
        name: impl Into<String>,
        color: Option<String>,
    ) -> Result<(), BoardDomainError> {
        self.name = validated_name(name.into())?;
        self.color = normalized_color(color);
        Ok(())
    }
}

fn validated_name(name: String) -> Result<String, BoardDomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptyResponsibleName);
    }
    Ok(trimmed.to_owned())
}

fn normalized_color(color: Option<String>) -> Option<String> {
    color
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
