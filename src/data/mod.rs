/// Data layer: rider records, race-time parsing and loading.
///
/// Architecture:
/// ```text
///  .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<Record>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  validated records + parsed RaceTimes
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
