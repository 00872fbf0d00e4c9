/// Reporting: chart descriptions built from the aggregations, the sinks that
/// present them, and the console statistics tables.
pub mod chart;
pub mod console;
pub mod sink;
