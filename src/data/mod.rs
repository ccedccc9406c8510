/// Data layer: keyword reports, reconciliation and filtering.
///
/// Architecture:
/// ```text
///  positions.csv      ideas_1.csv … ideas_n.csv
///        │                    │
///        ▼                    ▼
///   ┌──────────────────────────────┐
///   │  loader   rename, bucket,     │  bucket: rank / difficulty → range label
///   │           tag source, dedup   │
///   └──────────────────────────────┘
///        │                    │
///        ▼                    ▼
///   ┌──────────────────────────────┐
///   │  reconcile  missing / common  │  case-insensitive hash-set joins
///   └──────────────────────────────┘
///        │
///        ▼
///   ┌──────────────────────────────┐
///   │  filter   ranges, then regex  │
///   └──────────────────────────────┘
///        │
///        ▼
///   ┌──────────────────────────────┐
///   │  summary  count, volume total │  → export: delimited text
///   └──────────────────────────────┘
/// ```
///
/// `pipeline` drives the whole chain and recovers each step's errors.

pub mod bucket;
pub mod error;
pub mod events;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod reconcile;
pub mod summary;
