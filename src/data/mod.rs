/// Data layer: core types, loading, filtering, aggregation, and export.
///
/// Architecture:
/// ```text
///  remote sheet / .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + normalize headers → RecordTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ RecordTable  │  Vec<Record>, column index
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  ConstraintSet → filtered indices, aggregates, metrics
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  filtered view → CSV download
///   └──────────┘
/// ```
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;
