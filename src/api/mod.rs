//! PokeAPI client and response models
//!
//! This module contains the HTTP client used to talk to the PokeAPI and the
//! serde models for the pieces of its responses the commands actually
//! consume. Unknown fields in the JSON payloads are ignored.

pub mod client;

pub use client::{ApiError, PokeApiClient};

use serde::{Deserialize, Deserializer, Serialize};

/// Deserializes a nullable integer field, mapping both null and a missing
/// field to zero
fn null_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}

/// A `{name, url}` pair, the unit the PokeAPI uses to reference resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    /// Resource name (e.g. an area or pokemon name)
    pub name: String,
    /// Canonical URL of the resource
    pub url: String,
}

/// One page of the location-area listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationAreaPage {
    /// Total number of location areas
    pub count: u32,
    /// URL of the next page, if any
    pub next: Option<String>,
    /// URL of the previous page, if any
    pub previous: Option<String>,
    /// The areas on this page
    pub results: Vec<NamedResource>,
}

/// A single location area with its pokemon encounters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationArea {
    /// Area name
    pub name: String,
    /// Pokemon that can be encountered in this area
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

/// One possible encounter within a location area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonEncounter {
    /// The pokemon that can be encountered
    pub pokemon: NamedResource,
}

/// The pokemon fields used by the catch and inspect commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pokemon {
    /// Pokemon name
    pub name: String,
    /// Base experience granted when defeated; drives catch difficulty.
    /// The API reports null for some newer pokemon; treated as 0.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub base_experience: u32,
    /// Height in decimetres
    pub height: u32,
    /// Weight in hectograms
    pub weight: u32,
    /// Base stat values
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    /// Type slots
    #[serde(default)]
    pub types: Vec<PokemonTypeSlot>,
}

/// A single base stat entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonStat {
    /// The stat value
    pub base_stat: u32,
    /// Which stat this is (hp, attack, ...)
    pub stat: NamedResource,
}

/// A typed slot (pokemon can have one or two types)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonTypeSlot {
    /// Slot index, 1-based
    pub slot: u32,
    /// The type itself
    #[serde(rename = "type")]
    pub type_: NamedResource,
}
