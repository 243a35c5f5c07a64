//! Record factory: turns raw PokeAPI payloads into validated catalog records.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a raw payload was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing or zero id")]
    MissingId,
    #[error("missing name")]
    MissingName,
    #[error("missing front sprite")]
    MissingImage,
    #[error("missing type list")]
    MissingTypes,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawPokemon {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sprites: RawSprites,
    #[serde(default)]
    pub types: Vec<RawTypeSlot>,
    #[serde(default)]
    pub stats: Vec<RawStatSlot>,
    #[serde(default)]
    pub moves: Vec<RawMoveSlot>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawSprites {
    pub front_default: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawTypeSlot {
    #[serde(rename = "type")]
    pub type_info: NamedRef,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawStatSlot {
    pub base_stat: u32,
    pub stat: NamedRef,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawMoveSlot {
    #[serde(rename = "move")]
    pub move_info: NamedRef,
}

/// `{name, url}` pair used throughout the API for item references.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NamedRef {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StatEntry {
    pub name: String,
    pub value: u32,
}

/// Normalized creature entity. Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Record {
    pub id: u32,
    pub name: String,
    pub image_url: String,
    pub primary_type: String,
    pub stats: Vec<StatEntry>,
    pub moves: Vec<String>,
}

impl Record {
    /// Validates a raw payload and builds a `Record`. The primary type is the
    /// first entry of the type list; stats and moves are optional extras.
    pub fn from_raw(raw: RawPokemon) -> Result<Self, ValidationError> {
        if raw.id == 0 {
            return Err(ValidationError::MissingId);
        }
        if raw.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        let image_url = raw
            .sprites
            .front_default
            .filter(|url| !url.is_empty())
            .ok_or(ValidationError::MissingImage)?;
        let primary_type = raw
            .types
            .first()
            .map(|slot| slot.type_info.name.clone())
            .filter(|name| !name.is_empty())
            .ok_or(ValidationError::MissingTypes)?;

        let stats = raw
            .stats
            .into_iter()
            .map(|slot| StatEntry {
                name: slot.stat.name,
                value: slot.base_stat,
            })
            .collect();
        let moves = raw
            .moves
            .into_iter()
            .map(|slot| slot.move_info.name)
            .collect();

        Ok(Record {
            id: raw.id,
            name: raw.name,
            image_url,
            primary_type,
            stats,
            moves,
        })
    }

    pub fn is_valid(&self) -> bool {
        self.id > 0
            && !self.name.is_empty()
            && !self.image_url.is_empty()
            && !self.primary_type.is_empty()
    }
}
