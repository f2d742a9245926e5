//! Query options accepted by the character generator endpoint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;

pub const KNOWN_RACES: &[&str] = &[
    "Human",
    "Elf",
    "Dwarf",
    "Halfling",
    "Orc",
    "Gnome",
    "Tiefling",
    "Dragonborn",
    "Half-Elf",
    "Goblin",
];

pub const KNOWN_CLASSES: &[&str] = &[
    "Warrior",
    "Mage",
    "Rogue",
    "Cleric",
    "Ranger",
    "Paladin",
    "Barbarian",
    "Bard",
    "Druid",
    "Monk",
    "Warlock",
    "Necromancer",
];

/// Constraints for one query parameter.
#[derive(Debug, Clone, Copy)]
struct ParamRule {
    name: &'static str,
    required: bool,
    /// Accepted values, compared case-insensitively; empty means any
    allowed: &'static [&'static str],
}

const RULES: &[ParamRule] = &[
    ParamRule {
        name: "race",
        required: false,
        allowed: KNOWN_RACES,
    },
    ParamRule {
        name: "class",
        required: false,
        allowed: KNOWN_CLASSES,
    },
];

/// Optional filters for a generated character. Unset fields let the API pick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateCharacterQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race: Option<String>,
    #[serde(default, rename = "class", skip_serializing_if = "Option::is_none")]
    pub character_class: Option<String>,
}

impl GenerateCharacterQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_race(mut self, race: impl Into<String>) -> Self {
        self.race = Some(race.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.character_class = Some(class.into());
        self
    }

    fn param(&self, name: &str) -> Option<&str> {
        let value = match name {
            "race" => self.race.as_deref(),
            "class" => self.character_class.as_deref(),
            _ => None,
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// Query parameters to send, keyed by wire name. Empty values are skipped.
    pub fn to_query_params(&self) -> BTreeMap<String, String> {
        RULES
            .iter()
            .filter_map(|rule| {
                self.param(rule.name)
                    .map(|v| (rule.name.to_string(), v.trim().to_string()))
            })
            .collect()
    }

    /// Check every parameter against its rule, collecting all failures.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        let mut errors = Vec::new();

        for rule in RULES {
            let Some(value) = self.param(rule.name) else {
                if rule.required {
                    errors.push(format!("Required parameter [{}] is missing", rule.name));
                }
                continue;
            };

            let value = value.trim();
            if !rule.allowed.is_empty()
                && !rule.allowed.iter().any(|a| a.eq_ignore_ascii_case(value))
            {
                errors.push(format!(
                    "Parameter [{}] must be one of: {}",
                    rule.name,
                    rule.allowed.join(", ")
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(count = errors.len(), "query validation failed");
            Err(GeneratorError::validation(errors))
        }
    }
}
