/// Data layer: cell/table types, loading, cleaning and joining.
///
/// Architecture:
/// ```text
///  archive.csv        world_population.csv
///        │                    │
///        ▼                    ▼
///   ┌──────────┐         ┌──────────┐
///   │  loader   │         │  loader   │  parse file → Table
///   └──────────┘         └──────────┘
///        │                    │
///        ▼                    ▼
///   ┌──────────┐         ┌──────────┐
///   │  clean    │         │  clean    │  project, sort, rename
///   └──────────┘         └──────────┘
///        │                    │
///        └────────┬───────────┘
///                 ▼
///           ┌──────────┐
///           │   join    │  Birth Country = Country/Territory
///           └──────────┘
/// ```

pub mod clean;
pub mod join;
pub mod loader;
pub mod model;
pub mod schema;
