//! Screen-ready projections of the records.
//!
//! Everything here is pure formatting: the list card, the detail page rows,
//! and the fixed strings the screens show while loading or after a failure.

use serde::Serialize;

use crate::lifecycle::LoadState;
use crate::types::{PokemonDetail, PokemonSummary};

pub const LIST_LOADING_MESSAGE: &str = "Loading Pokémon...";
pub const DETAIL_ERROR_MESSAGE: &str = "Failed to load Pokemon details";
pub const DETAIL_MISSING_MESSAGE: &str = "Pokemon not found";

/// `Loading Pokemon #25...`
pub fn loading_message(id: &str) -> String {
    format!("Loading Pokemon #{id}...")
}

/// Text the detail screen shows instead of the record, or `None` once the
/// record is loaded. Every failure, `NotFound` included, shows the fixed
/// failure text; the not-found text covers a screen with no record at all.
pub fn detail_status_message(id: &str, state: &LoadState<PokemonDetail>) -> Option<String> {
    match state {
        LoadState::Loaded(_) => None,
        LoadState::Loading => Some(loading_message(id)),
        LoadState::Failed(_) => Some(DETAIL_ERROR_MESSAGE.to_string()),
        LoadState::Idle => Some(DETAIL_MISSING_MESSAGE.to_string()),
    }
}

/// Upper-case the first character, leave the rest untouched.
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Only the first hyphen becomes a space: `special-attack` -> `special attack`.
fn humanize(name: &str) -> String {
    name.replacen('-', " ", 1)
}

/// Deci-units to display units: `69` -> `6.9`, `20` -> `2`.
fn tenths(value: u32) -> String {
    match value % 10 {
        0 => (value / 10).to_string(),
        rest => format!("{}.{rest}", value / 10),
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SummaryCard {
    pub id: u32,
    pub number: String,
    pub display_name: String,
    pub image: String,
}

impl From<&PokemonSummary> for SummaryCard {
    fn from(summary: &PokemonSummary) -> Self {
        Self {
            id: summary.id,
            number: format!("#{}", summary.id),
            display_name: display_name(&summary.name),
            image: summary.image.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatRow {
    pub label: String,
    pub value: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub number: String,
    pub image: String,
    pub types: Vec<String>,
    pub stats: Vec<StatRow>,
    pub abilities: Vec<String>,
    /// `"0.4 m"`, absent when upstream omits height.
    pub height: Option<String>,
    /// `"6 kg"`, absent when upstream omits weight.
    pub weight: Option<String>,
}

impl DetailView {
    /// `id` is the identifier the screen was opened with; the image is derived
    /// from it rather than from the payload.
    pub fn new(id: &str, detail: &PokemonDetail, image: String) -> Self {
        Self {
            title: display_name(&detail.name),
            number: format!("#{id}"),
            image,
            types: detail
                .types
                .iter()
                .map(|slot| slot.kind.name.to_uppercase())
                .collect(),
            stats: detail
                .stats
                .iter()
                .map(|slot| StatRow {
                    label: humanize(&slot.stat.name).to_uppercase(),
                    value: slot.base_stat,
                })
                .collect(),
            abilities: detail
                .abilities
                .iter()
                .map(|slot| {
                    let label = humanize(&slot.ability.name);
                    if slot.is_hidden {
                        format!("{label} (Hidden)")
                    } else {
                        label
                    }
                })
                .collect(),
            height: detail.height.map(|h| format!("{} m", tenths(h))),
            weight: detail.weight.map(|w| format!("{} kg", tenths(w))),
        }
    }
}
