/// Aggregations over the cleaned and joined tables, and the descriptive
/// statistics printed between charts.
pub mod aggregate;
pub mod describe;
