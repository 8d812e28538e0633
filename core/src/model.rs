//! Catalog and detail models plus the display fields derived from them.
//!
//! # Design
//! Raw records (`CatalogEntry`, `DetailRecord`) are what the decoder yields;
//! they are projected straight into what the presentation layer reads.
//! Optional data stays `Option` all the way through so "absent" never turns
//! into zero or an empty string.

use std::hash::{Hash, Hasher};

use reqwest::Url;

const SPRITE_BASE: &str = "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

/// One row of the list endpoint, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub reference_url: String,
}

/// A catalog row ready for display. Identity is `id` alone.
#[derive(Debug, Clone)]
pub struct CatalogItem {
    pub id: u64,
    pub name: String,
}

impl CatalogItem {
    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }

    /// `#025`-style label.
    pub fn display_number(&self) -> String {
        display_number(self.id)
    }

    /// Small sprite for list rows. `None` only for the id-0 fallback.
    pub fn sprite_url(&self) -> Option<Url> {
        if self.id == 0 {
            return None;
        }
        Url::parse(&format!("{SPRITE_BASE}/{}.png", self.id)).ok()
    }
}

impl From<CatalogEntry> for CatalogItem {
    fn from(entry: CatalogEntry) -> Self {
        Self {
            id: id_from_url(&entry.reference_url),
            name: entry.name,
        }
    }
}

impl PartialEq for CatalogItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CatalogItem {}

impl Hash for CatalogItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A type slot of a detail record, in API order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSlot {
    pub slot: u32,
    pub type_name: String,
}

/// A base stat of a detail record. Order is significant for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub base_value: u32,
    pub effort: u32,
    pub stat_name: String,
}

/// Full record for a single pokemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRecord {
    pub id: u64,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub base_experience: Option<u32>,
    pub types: Vec<TypeSlot>,
    pub stats: Vec<Stat>,
    /// Official artwork.
    pub image_url_primary: Option<Url>,
    /// Default front sprite.
    pub image_url_fallback: Option<Url>,
}

impl DetailRecord {
    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }

    pub fn display_number(&self) -> String {
        display_number(self.id)
    }

    /// Artwork if present, else the default sprite, else nothing.
    pub fn image_url(&self) -> Option<&Url> {
        self.image_url_primary
            .as_ref()
            .or(self.image_url_fallback.as_ref())
    }

    /// Type names capitalized and comma separated, e.g. `"Grass, Poison"`.
    pub fn types_display(&self) -> String {
        self.types
            .iter()
            .map(|t| display_name(&t.type_name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Numeric id encoded as the last numeric path segment of a reference URL.
///
/// `".../pokemon/25/"` yields 25. A URL without any numeric segment yields 0.
pub fn id_from_url(url: &str) -> u64 {
    url.rsplit('/')
        .find_map(|segment| segment.parse::<u64>().ok())
        .unwrap_or(0)
}

/// `name` with its first character upper-cased.
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn display_number(id: u64) -> String {
    format!("#{id:03}")
}
