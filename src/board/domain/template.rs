//! Daily task templates and the built-in household catalogs.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};

/// Recurring task created by daily generation.
///
/// A template with a `fixed_assignee` pattern is bound to the first
/// responsible whose name contains the pattern (ignoring case). Templates
/// without one rotate across all responsibles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTaskTemplate {
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fixed_assignee: Option<String>,
}

impl DailyTaskTemplate {
    /// Creates a rotating template.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTemplateTitle`] when the title is
    /// blank.
    pub fn rotating(title: impl Into<String>) -> Result<Self, BoardDomainError> {
        Ok(Self {
            title: validated_title(title.into())?,
            fixed_assignee: None,
        })
    }

    /// Creates a template bound to a responsible name pattern.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTemplateTitle`] when the title is
    /// blank.
    pub fn fixed(
        title: impl Into<String>,
        assignee_pattern: impl Into<String>,
    ) -> Result<Self, BoardDomainError> {
        let pattern = assignee_pattern.into().trim().to_owned();
        Ok(Self {
            title: validated_title(title.into())?,
            fixed_assignee: (!pattern.is_empty()).then_some(pattern),
        })
    }

    /// Returns the title given to generated tasks.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the fixed assignee name pattern, if any.
    #[must_use]
    pub fn fixed_assignee(&self) -> Option<&str> {
        self.fixed_assignee
            .as_deref()
            .map(str::trim)
            .filter(|pattern| !pattern.is_empty())
    }
}

fn validated_title(title: String) -> Result<String, BoardDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptyTemplateTitle);
    }
    Ok(trimmed.to_owned())
}

const DAILY_CATALOG: [(&str, Option<&str>); 14] = [
    ("Lavar panelas", None),
    ("Lavar potes", None),
    ("Lavar travessas", None),
    ("Aspirar Sala", None),
    ("Aspirar Corredor", None),
    ("Varrer chão da cozinha", None),
    ("Passar pano chão da cozinha", None),
    ("Passar pano chão da sala", None),
    ("Limpar as mesas", None),
    ("Fazer almoço", Some("Euclides")),
    ("Limpar vaso com lysoform e papel", None),
    ("Recolher os lixos", None),
    ("Descer com os lixos", Some("Euclides")),
    ("Lavar roupas", Some("Valeska")),
];

const QUICK_CATALOG: [&str; 23] = [
    "Lavar panelas (potes/travessas)",
    "Aspirar sala, corredor",
    "Varrer chão da cozinha",
    "Passar pano - chão da cozinha",
    "Passar pano - chão da sala",
    "Passar pano - corredor",
    "Passar pano - lavanderia",
    "Limpar a mesa 1 e 2 (Sala e Cozinha)",
    "Fazer marmita de proteína",
    "Lavar banheiro",
    "Limpar vaso com Lysform e papel",
    "Aspirar lavanderia",
    "Recolher o lixo",
    "Fazer Dezer o lixo (grande)",
    "Lavar saladas e frutas",
    "Limpar dentro e fora da geladeira",
    "Passar dezel nas tomadas",
    "Lavar roupas",
    "Limpar fogão (superfície)",
    "Cada um lava sua roupa",
    "Cada um lava sua própria cabeça/corpo",
    "Repor papel higiênico e sabonetes",
    "Sabão e pote de sobras",
];

/// Returns the built-in daily template catalog.
#[must_use]
pub fn default_daily_templates() -> Vec<DailyTaskTemplate> {
    DAILY_CATALOG
        .iter()
        .map(|(title, fixed)| DailyTaskTemplate {
            title: (*title).to_owned(),
            fixed_assignee: fixed.map(str::to_owned),
        })
        .collect()
}

/// Returns the built-in quick activity catalog.
#[must_use]
pub fn default_quick_activities() -> Vec<String> {
    QUICK_CATALOG.iter().map(|title| (*title).to_owned()).collect()
}
