/// Data layer: input parsing and the core record types.
///
/// Architecture:
/// ```text
///  price history .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  skip header, parse field 4 → Series
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Series  │  (index, value) samples, contiguous indices
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
