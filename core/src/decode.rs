//! JSON schemas of the remote API and their mapping onto the model.
//!
//! The wire structs below are the only place that knows the API's field
//! names (`base_experience`, `front_default`, `official-artwork`, ...).
//! Required fields that are missing or mistyped fail the whole decode;
//! optional ones decode to `None`.

use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;
use crate::model::{CatalogEntry, DetailRecord, Stat, TypeSlot};

#[derive(Deserialize)]
struct ListResponse {
    results: Vec<ListResult>,
}

#[derive(Deserialize)]
struct ListResult {
    name: String,
    url: String,
}

#[derive(Deserialize)]
struct PokemonWire {
    id: u64,
    name: String,
    height: u32,
    weight: u32,
    base_experience: Option<u32>,
    types: Vec<TypeSlotWire>,
    stats: Vec<StatWire>,
    sprites: SpritesWire,
}

#[derive(Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Deserialize)]
struct TypeSlotWire {
    slot: u32,
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Deserialize)]
struct StatWire {
    base_stat: u32,
    effort: u32,
    stat: NamedResource,
}

#[derive(Deserialize)]
struct SpritesWire {
    front_default: Option<String>,
    other: Option<OtherSprites>,
}

#[derive(Deserialize)]
struct OtherSprites {
    #[serde(rename = "official-artwork")]
    official_artwork: Option<Artwork>,
}

#[derive(Deserialize)]
struct Artwork {
    front_default: Option<String>,
}

/// Decode a list response body into its entries, in response order.
pub fn decode_catalog(body: &str) -> Result<Vec<CatalogEntry>, ApiError> {
    let list: ListResponse = serde_json::from_str(body)?;
    Ok(list
        .results
        .into_iter()
        .map(|r| CatalogEntry {
            name: r.name,
            reference_url: r.url,
        })
        .collect())
}

/// Decode a detail response body.
pub fn decode_detail(body: &str) -> Result<DetailRecord, ApiError> {
    let wire: PokemonWire = serde_json::from_str(body)?;

    let artwork = wire
        .sprites
        .other
        .and_then(|o| o.official_artwork)
        .and_then(|a| a.front_default);

    Ok(DetailRecord {
        id: wire.id,
        name: wire.name,
        height: wire.height,
        weight: wire.weight,
        base_experience: wire.base_experience,
        types: wire
            .types
            .into_iter()
            .map(|t| TypeSlot {
                slot: t.slot,
                type_name: t.kind.name,
            })
            .collect(),
        stats: wire
            .stats
            .into_iter()
            .map(|s| Stat {
                base_value: s.base_stat,
                effort: s.effort,
                stat_name: s.stat.name,
            })
            .collect(),
        image_url_primary: image_url(artwork, "official-artwork"),
        image_url_fallback: image_url(wire.sprites.front_default, "front_default"),
    })
}

/// Malformed image URLs are treated as absent.
fn image_url(raw: Option<String>, field: &'static str) -> Option<Url> {
    let raw = raw?;
    match Url::parse(&raw) {
        Ok(url) => Some(url),
        Err(err) => {
            debug!(field, url = %raw, error = %err, "dropping malformed image URL");
            None
        }
    }
}
