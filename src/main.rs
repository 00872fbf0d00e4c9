use std::io;

use anyhow::Result;
use clap::Parser;

use nobel_per_capita::config::Config;
use nobel_per_capita::pipeline;
use nobel_per_capita::report::sink::{ChartSink, JsonSink};
use nobel_per_capita::ui::app::WindowSink;

fn main() -> Result<()> {
    env_logger::init();
    let config = Config::parse();
    log::debug!("{config:?}");

    let mut sink: Box<dyn ChartSink> = if config.headless {
        Box::new(JsonSink::new(&config.out_dir)?)
    } else {
        Box::new(WindowSink)
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let analysis = pipeline::run(&config, sink.as_mut(), &mut out)?;

    log::info!(
        "Done: {} countries ranked per capita from {} joined laureate rows",
        analysis.per_capita.len(),
        analysis.joined.len()
    );
    Ok(())
}
