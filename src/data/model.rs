use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AnimalPolicy – whether a listing accepts pets
// ---------------------------------------------------------------------------

/// Pet policy of a listing, as written in the source dataset
/// (`acept` / `not acept`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimalPolicy {
    #[serde(rename = "acept", alias = "accepted", alias = "accept")]
    Accepted,
    #[serde(rename = "not acept", alias = "not accepted", alias = "not accept")]
    NotAccepted,
}

impl AnimalPolicy {
    /// Parse the raw cell text used by the CSV and Parquet sources.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "acept" | "accept" | "accepted" => Some(AnimalPolicy::Accepted),
            "not acept" | "not accept" | "not accepted" => Some(AnimalPolicy::NotAccepted),
            _ => None,
        }
    }
}

impl fmt::Display for AnimalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimalPolicy::Accepted => write!(f, "accepted"),
            AnimalPolicy::NotAccepted => write!(f, "not accepted"),
        }
    }
}

// ---------------------------------------------------------------------------
// Listing – one row of the dataset
// ---------------------------------------------------------------------------

/// A single rental unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub city: String,
    pub rooms: u32,
    /// Floor area in m². Not guaranteed positive by the source data.
    pub area: f64,
    #[serde(rename = "rent amount (R$)", alias = "rent_amount")]
    pub rent_amount: f64,
    #[serde(rename = "animal")]
    pub animals: AnimalPolicy,
}

// ---------------------------------------------------------------------------
// ListingStore – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The immutable record store with pre-computed column summaries.
#[derive(Debug, Clone, Default)]
pub struct ListingStore {
    listings: Vec<Listing>,
    /// Distinct cities in order of first appearance.
    cities: Vec<String>,
    /// `(min, max)` room count, `None` when empty.
    room_bounds: Option<(u32, u32)>,
    /// `(min, max)` rent amount, `None` when empty.
    rent_bounds: Option<(f64, f64)>,
}

impl ListingStore {
    /// Build column summaries from the loaded listings.
    pub fn new(listings: Vec<Listing>) -> Self {
        let mut cities: Vec<String> = Vec::new();
        let mut room_bounds: Option<(u32, u32)> = None;
        let mut rent_bounds: Option<(f64, f64)> = None;

        for l in &listings {
            if !cities.iter().any(|c| c == &l.city) {
                cities.push(l.city.clone());
            }
            room_bounds = Some(match room_bounds {
                Some((lo, hi)) => (lo.min(l.rooms), hi.max(l.rooms)),
                None => (l.rooms, l.rooms),
            });
            rent_bounds = Some(match rent_bounds {
                Some((lo, hi)) => (lo.min(l.rent_amount), hi.max(l.rent_amount)),
                None => (l.rent_amount, l.rent_amount),
            });
        }

        ListingStore {
            listings,
            cities,
            room_bounds,
            rent_bounds,
        }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn get(&self, index: usize) -> Option<&Listing> {
        self.listings.get(index)
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn room_bounds(&self) -> Option<(u32, u32)> {
        self.room_bounds
    }

    pub fn rent_bounds(&self) -> Option<(f64, f64)> {
        self.rent_bounds
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
