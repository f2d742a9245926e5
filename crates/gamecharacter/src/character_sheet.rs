//! Character sheet types returned by the Game Character Generator API.
//!
//! Every field is optional on input: a missing key or an explicit `null`
//! leaves the field at its default (empty string, zero, empty list, or an
//! all-default nested record). Unknown keys are ignored at every level.
//!
//! Wire names are declared in [`crate::wire`]; the `#[serde]` attributes
//! here must agree with that table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;
use crate::wire::null_as_default;

// =============================================================================
// Root record
// =============================================================================

/// One generated character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CharacterSheet {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub race: RaceInfo,
    /// Wire key is always `class`
    #[serde(rename = "class", deserialize_with = "null_as_default")]
    pub character_class: ClassInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub background: String,
    #[serde(deserialize_with = "null_as_default")]
    pub personality: String,
    #[serde(deserialize_with = "null_as_default")]
    pub motivation: String,
    #[serde(deserialize_with = "null_as_default")]
    pub stats: AbilityScores,
    /// Wire key is `hp`
    #[serde(rename = "hp", deserialize_with = "null_as_default")]
    pub hit_points: i64,
}

// =============================================================================
// Nested records
// =============================================================================

/// Class descriptor (e.g. "Mage", primary stat "intelligence", hit die "d6").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub primary_stat: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hit_die: String,
}

/// Race descriptor with its racial traits in API order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RaceInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub traits: Vec<String>,
}

/// A raw ability score paired with its modifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AbilityScore {
    #[serde(deserialize_with = "null_as_default")]
    pub value: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub modifier: i64,
}

impl AbilityScore {
    pub fn new(value: i64, modifier: i64) -> Self {
        Self { value, modifier }
    }

    /// Score with the standard d20 modifier, `floor((value - 10) / 2)`.
    pub fn from_value(value: i64) -> Self {
        Self::new(value, value.saturating_sub(10).div_euclid(2))
    }
}

/// The six ability scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AbilityScores {
    #[serde(deserialize_with = "null_as_default")]
    pub strength: AbilityScore,
    #[serde(deserialize_with = "null_as_default")]
    pub dexterity: AbilityScore,
    #[serde(deserialize_with = "null_as_default")]
    pub constitution: AbilityScore,
    #[serde(deserialize_with = "null_as_default")]
    pub intelligence: AbilityScore,
    #[serde(deserialize_with = "null_as_default")]
    pub wisdom: AbilityScore,
    #[serde(deserialize_with = "null_as_default")]
    pub charisma: AbilityScore,
}

impl AbilityScores {
    pub fn get(&self, ability: Ability) -> AbilityScore {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn get_mut(&mut self, ability: Ability) -> &mut AbilityScore {
        match ability {
            Ability::Strength => &mut self.strength,
            Ability::Dexterity => &mut self.dexterity,
            Ability::Constitution => &mut self.constitution,
            Ability::Intelligence => &mut self.intelligence,
            Ability::Wisdom => &mut self.wisdom,
            Ability::Charisma => &mut self.charisma,
        }
    }

    /// Scores in canonical order (STR, DEX, CON, INT, WIS, CHA)
    pub fn iter(&self) -> impl Iterator<Item = (Ability, AbilityScore)> + '_ {
        Ability::ALL
            .into_iter()
            .map(move |ability| (ability, self.get(ability)))
    }
}

// =============================================================================
// Ability names
// =============================================================================

/// Names of the six fixed ability fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    /// Key used for this ability inside `stats`
    pub fn wire_name(&self) -> &'static str {
        match self {
            Ability::Strength => "strength",
            Ability::Dexterity => "dexterity",
            Ability::Constitution => "constitution",
            Ability::Intelligence => "intelligence",
            Ability::Wisdom => "wisdom",
            Ability::Charisma => "charisma",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Ability {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ability::ALL
            .into_iter()
            .find(|ability| ability.wire_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GeneratorError::parse(format!("Unknown ability: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ability_modifier_uses_floor_division() {
        assert_eq!(AbilityScore::from_value(1).modifier, -5);
        assert_eq!(AbilityScore::from_value(8).modifier, -1);
        assert_eq!(AbilityScore::from_value(9).modifier, -1);
        assert_eq!(AbilityScore::from_value(10).modifier, 0);
        assert_eq!(AbilityScore::from_value(15).modifier, 2);
        assert_eq!(AbilityScore::from_value(20).modifier, 5);
    }

    #[test]
    fn ability_modifier_saturates_at_extremes() {
        assert_eq!(AbilityScore::from_value(i64::MIN).modifier, i64::MIN / 2);
        assert_eq!(
            AbilityScore::from_value(i64::MIN + 9).modifier,
            i64::MIN / 2
        );
        assert_eq!(
            AbilityScore::from_value(i64::MAX).modifier,
            (i64::MAX - 10).div_euclid(2)
        );
    }

    #[test]
    fn ability_from_str_is_case_insensitive() {
        assert_eq!("Wisdom".parse::<Ability>().unwrap(), Ability::Wisdom);
        assert_eq!(" charisma ".parse::<Ability>().unwrap(), Ability::Charisma);
        let err = "luck".parse::<Ability>().unwrap_err();
        assert!(matches!(err, GeneratorError::Parse(_)));
    }

    #[test]
    fn ability_scores_iterate_in_canonical_order() {
        let mut stats = AbilityScores::default();
        *stats.get_mut(Ability::Dexterity) = AbilityScore::from_value(14);
        stats.charisma = AbilityScore::new(7, -2);

        let names: Vec<&str> = stats.iter().map(|(a, _)| a.wire_name()).collect();
        assert_eq!(
            names,
            [
                "strength",
                "dexterity",
                "constitution",
                "intelligence",
                "wisdom",
                "charisma"
            ]
        );
        assert_eq!(stats.get(Ability::Dexterity), AbilityScore::new(14, 2));
        assert_eq!(stats.get(Ability::Charisma).modifier, -2);
    }

    #[test]
    fn class_field_serializes_as_class() {
        let sheet = CharacterSheet {
            character_class: ClassInfo {
                name: "Mage".into(),
                primary_stat: "intelligence".into(),
                hit_die: "d6".into(),
                ..Default::default()
            },
            hit_points: 8,
            ..Default::default()
        };
        let value = serde_json::to_value(&sheet).unwrap();
        assert_eq!(value["class"]["name"], "Mage");
        assert_eq!(value["class"]["primaryStat"], "intelligence");
        assert_eq!(value["class"]["hitDie"], "d6");
        assert_eq!(value["hp"], 8);
        assert!(value.get("characterClass").is_none());
        assert!(value.get("hitPoints").is_none());
    }

    #[test]
    fn null_and_missing_fields_default() {
        let sheet: CharacterSheet = serde_json::from_value(json!({
            "name": null,
            "race": { "name": "Elf", "traits": null },
            "stats": { "wisdom": { "value": 12 } },
        }))
        .unwrap();
        assert_eq!(sheet.name, "");
        assert_eq!(sheet.race.name, "Elf");
        assert!(sheet.race.traits.is_empty());
        assert_eq!(sheet.character_class, ClassInfo::default());
        assert_eq!(sheet.stats.wisdom, AbilityScore::new(12, 0));
        assert_eq!(sheet.hit_points, 0);
    }
}
