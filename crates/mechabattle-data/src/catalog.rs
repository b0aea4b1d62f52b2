//! Part and medal catalogs.
//!
//! Record fields mirror the JSON data files. Every field is optional in
//! the file: numbers default to zero, ids to the registry default, and a
//! missing `attack` means the part has no offensive capability.

use std::path::Path;

use serde::{Deserialize, Serialize};

use mechabattle_core::components::{Medal, Part, PartOffense};
use mechabattle_core::enums::*;

use crate::error::DataError;

const BUILTIN_DATA: &str = include_str!("../data/default.json");

/// One part definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PartRecord {
    pub id: String,
    pub name: String,
    pub hp: u32,
    pub attack: Option<i32>,
    pub success: i32,
    pub mobility: i32,
    pub defense: i32,
    #[serde(rename = "trait")]
    pub trait_id: String,
    #[serde(rename = "skill")]
    pub skill_id: String,
    pub attribute: String,
    pub time_modifier: Option<f64>,
}

/// One medal definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MedalRecord {
    pub id: String,
    pub name: String,
    pub personality: String,
    pub attribute: String,
}

/// Part definitions grouped by slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PartCatalog {
    pub head: Vec<PartRecord>,
    pub right_arm: Vec<PartRecord>,
    pub left_arm: Vec<PartRecord>,
    pub legs: Vec<PartRecord>,
}

impl PartCatalog {
    pub fn slot(&self, slot: PartSlot) -> &[PartRecord] {
        match slot {
            PartSlot::Head => &self.head,
            PartSlot::RightArm => &self.right_arm,
            PartSlot::LeftArm => &self.left_arm,
            PartSlot::Legs => &self.legs,
        }
    }
}

/// The complete static data set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameData {
    pub parts: PartCatalog,
    pub medals: Vec<MedalRecord>,
}

impl GameData {
    /// Parse a data set from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a data set from a JSON file on disk.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Load a data set, substituting an empty one on failure.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!("Failed to load game data from {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// The data set shipped with this crate.
    pub fn builtin() -> Self {
        match Self::from_json_str(BUILTIN_DATA) {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!("Built-in game data is malformed: {err}");
                Self::default()
            }
        }
    }

    pub fn part(&self, slot: PartSlot, id: &str) -> Option<&PartRecord> {
        self.parts.slot(slot).iter().find(|p| p.id == id)
    }

    pub fn medal(&self, id: &str) -> Option<&MedalRecord> {
        self.medals.iter().find(|m| m.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.medals.is_empty() && PartSlot::ALL.iter().all(|&s| self.parts.slot(s).is_empty())
    }
}

impl PartRecord {
    /// Build the part component for `slot`.
    ///
    /// Legs never carry offense; other slots never carry mobility or defense.
    pub fn to_part(&self, slot: PartSlot) -> Part {
        let offense = match (slot, self.attack) {
            (PartSlot::Legs, _) | (_, None) => None,
            (_, Some(attack)) => Some(PartOffense {
                attack,
                success: self.success,
                trait_kind: parse_or_default(&self.trait_id, "trait", TraitKind::from_id),
                skill: parse_or_default(&self.skill_id, "skill", SkillKind::from_id),
                time_modifier: self.time_modifier.unwrap_or(1.0),
            }),
        };
        let (mobility, defense) = if slot == PartSlot::Legs {
            (self.mobility, self.defense)
        } else {
            (0, 0)
        };
        Part {
            slot,
            name: self.name.clone(),
            attribute: parse_or_default(&self.attribute, "attribute", Attribute::from_id),
            hp: self.hp,
            max_hp: self.hp,
            offense,
            mobility,
            defense,
        }
    }
}

impl MedalRecord {
    pub fn to_medal(&self) -> Medal {
        Medal {
            name: self.name.clone(),
            personality: parse_or_default(
                &self.personality,
                "personality",
                PersonalityKind::from_id,
            ),
            attribute: parse_or_default(&self.attribute, "attribute", Attribute::from_id),
        }
    }
}

/// Parse a registry id, falling back to the default variant.
///
/// An empty id is a silent default; an unrecognized one is logged.
pub fn parse_or_default<T: Default>(id: &str, kind: &str, parse: fn(&str) -> Option<T>) -> T {
    if id.is_empty() {
        return T::default();
    }
    parse(id).unwrap_or_else(|| {
        tracing::warn!("Unknown {kind} id '{id}', using default");
        T::default()
    })
}
