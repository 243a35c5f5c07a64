//! Remote data gateway against the PokeAPI REST endpoints.

use std::sync::OnceLock;

use serde::Deserialize;
use thiserror::Error;

use crate::record::{NamedRef, RawPokemon, Record, ValidationError};
use crate::state::{FilterKey, ALL_RANGE_END, ALL_RANGE_START};

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// A single lookup can fail in transit or on validation; both skip the item
/// in batch mode and surface an error card in search mode.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("invalid record: {0}")]
    Validation(#[from] ValidationError),
}

/// Outcome of a batch load: the valid subset plus how many items failed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchOutcome {
    pub records: Vec<Record>,
    pub skipped: usize,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeDetailResponse {
    pokemon: Vec<TypeMemberSlot>,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeMemberSlot {
    pokemon: NamedRef,
}

static API_BASE: OnceLock<String> = OnceLock::new();

/// Pins the gateway base URL for the process. Later calls are ignored.
pub fn set_api_base(url: String) {
    let _ = API_BASE.set(url.trim_end_matches('/').to_string());
}

fn api_base() -> &'static str {
    API_BASE.get_or_init(|| {
        std::env::var("POKEVERSE_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE.to_string())
    })
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

async fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, TransportError> {
    let response = http_client().get(url).send().await?;
    let response = response.error_for_status()?;
    Ok(response.json::<T>().await?)
}

/// One detail fetch plus record validation.
pub async fn fetch_record(key: &str) -> Result<Record, LookupError> {
    let url = format!("{}/pokemon/{key}", api_base());
    let raw: RawPokemon = fetch_json(&url).await?;
    Ok(Record::from_raw(raw)?)
}

/// Item references for one type filter.
pub async fn fetch_type_members(type_name: &str) -> Result<Vec<NamedRef>, TransportError> {
    let url = format!("{}/type/{type_name}", api_base());
    let response: TypeDetailResponse = fetch_json(&url).await?;
    Ok(response
        .pokemon
        .into_iter()
        .map(|slot| slot.pokemon)
        .collect())
}

fn all_range_refs() -> Vec<NamedRef> {
    (ALL_RANGE_START..=ALL_RANGE_END)
        .map(|id| NamedRef {
            name: id.to_string(),
            url: format!("pokemon/{id}"),
        })
        .collect()
}

/// Resolves the filter to item references, then fetches every detail one at
/// a time, in order. Per-item failures are counted and skipped; only the
/// outer reference fetch can fail the operation.
pub async fn load_filter(filter: FilterKey) -> Result<BatchOutcome, TransportError> {
    let refs = match filter.api_type() {
        Some(type_name) => fetch_type_members(type_name).await?,
        None => all_range_refs(),
    };

    let mut outcome = BatchOutcome {
        records: Vec::with_capacity(refs.len()),
        skipped: 0,
    };
    for item in refs {
        match fetch_record(&item.name).await {
            Ok(record) => outcome.records.push(record),
            Err(_) => outcome.skipped += 1,
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_range_covers_the_base_dex_in_order() {
        let refs = all_range_refs();
        assert_eq!(refs.len(), 151);
        assert_eq!(refs.first().map(|r| r.name.as_str()), Some("1"));
        assert_eq!(refs.last().map(|r| r.name.as_str()), Some("151"));
    }

    #[test]
    fn type_detail_payload_maps_to_refs() {
        let response: TypeDetailResponse = serde_json::from_value(serde_json::json!({
            "pokemon": [
                { "slot": 1, "pokemon": { "name": "charmander", "url": "u1" } },
                { "slot": 2, "pokemon": { "name": "vulpix", "url": "u2" } }
            ]
        }))
        .unwrap();
        let names: Vec<_> = response
            .pokemon
            .into_iter()
            .map(|slot| slot.pokemon.name)
            .collect();
        assert_eq!(names, vec!["charmander", "vulpix"]);
    }
}
