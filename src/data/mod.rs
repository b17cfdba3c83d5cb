/// Data layer: core types, loading, and aggregation.
///
/// Architecture:
/// ```text
///  cars.json / cars.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, drop rows with missing required fields
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ CarDataset  │  Vec<Car>, unique manufacturers/years/origins
///   └────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  selection filtering, group means, extents
///   └───────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
