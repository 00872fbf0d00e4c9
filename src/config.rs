use std::path::PathBuf;

use clap::Parser;

/// Nobel Prize laureates per capita, by birth country and prize category.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "nobel-per-capita", version, about)]
pub struct Config {
    /// Laureate records (csv, json or parquet)
    #[arg(long, default_value = "data/archive.csv")]
    pub laureates: PathBuf,

    /// Population records (csv, json or parquet)
    #[arg(long, default_value = "data/world_population.csv")]
    pub population: PathBuf,

    /// Write charts as JSON files instead of opening a window per chart
    #[arg(long)]
    pub headless: bool,

    /// Chart output directory when headless
    #[arg(long, default_value = "charts")]
    pub out_dir: PathBuf,

    /// Rows shown in table previews
    #[arg(long, default_value_t = 10)]
    pub preview_rows: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_data_directory() {
        let c = Config::parse_from(["nobel-per-capita"]);
        assert_eq!(c.laureates, PathBuf::from("data/archive.csv"));
        assert_eq!(c.population, PathBuf::from("data/world_population.csv"));
        assert!(!c.headless);
        assert_eq!(c.preview_rows, 10);
    }

    #[test]
    fn flags_override_defaults() {
        let c = Config::parse_from([
            "nobel-per-capita",
            "--headless",
            "--out-dir",
            "/tmp/out",
            "--preview-rows",
            "3",
        ]);
        assert!(c.headless);
        assert_eq!(c.out_dir, PathBuf::from("/tmp/out"));
        assert_eq!(c.preview_rows, 3);
    }
}
