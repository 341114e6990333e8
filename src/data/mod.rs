/// Data layer: core types, loading, and the filtering/aggregation pipeline.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ListingStore
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ ListingStore  │  Vec<Listing>, cities, bounds (immutable)
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  city / rooms / rent, then animals → FilteredView
///   └──────────┘
///        │
///        ├──────────────┬───────────────┐
///        ▼              ▼               ▼
///   ┌─────────┐   ┌───────────┐   ┌───────────┐
///   │ derive  │   │ aggregate │   │ histogram │
///   └─────────┘   └───────────┘   └───────────┘
/// ```

pub mod aggregate;
pub mod derive;
pub mod filter;
pub mod histogram;
pub mod loader;
pub mod model;
