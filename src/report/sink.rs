use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::chart::Chart;

/// Destination for rendered charts. Charts are presented one at a time, in
/// pipeline order; `present` returns once the chart is done with.
pub trait ChartSink {
    fn present(&mut self, chart: &Chart) -> Result<()>;
}

// ---------------------------------------------------------------------------
// JSON files – headless runs
// ---------------------------------------------------------------------------

/// Writes every chart to `<dir>/<NN>-<slug>.json`, numbered from 01.
#[derive(Debug)]
pub struct JsonSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl JsonSink {
    pub fn new(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating chart directory {}", dir.display()))?;
        Ok(JsonSink {
            dir: dir.to_path_buf(),
            written: Vec::new(),
        })
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ChartSink for JsonSink {
    fn present(&mut self, chart: &Chart) -> Result<()> {
        let path = self
            .dir
            .join(format!("{:02}-{}.json", self.written.len() + 1, chart.slug));
        let text = serde_json::to_string_pretty(chart).context("serializing chart")?;
        fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Wrote chart '{}' to {}", chart.title, path.display());
        self.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::chart::per_capita_bar;

    #[test]
    fn charts_are_numbered_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonSink::new(&dir.path().join("charts")).unwrap();
        let chart = per_capita_bar(&[]);
        sink.present(&chart).unwrap();
        sink.present(&chart).unwrap();

        let names: Vec<_> = sink
            .written()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["01-per-capita.json", "02-per-capita.json"]);

        let text = fs::read_to_string(&sink.written()[0]).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["kind"], "bar");
    }
}
