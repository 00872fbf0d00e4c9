//! The analysis, top to bottom: load, clean, join, aggregate, report.
//!
//! Every stage takes the previous stage's tables as arguments and returns new
//! values; statistics go to `out` and charts to the sink in a fixed order.

use std::io::Write;

use anyhow::{Context, Result};

use crate::analysis::aggregate::{
    self, CategoryMatrix, CollaborationHistograms, CountryTrend, PerCapita, PopulationShare,
    SexPoint,
};
use crate::analysis::describe;
use crate::config::Config;
use crate::data::clean::{self, Renames};
use crate::data::join::inner_join;
use crate::data::loader::load_file;
use crate::data::model::Table;
use crate::data::schema::{laureate, population, Category};
use crate::report::chart;
use crate::report::console;
use crate::report::sink::ChartSink;

pub const TOP_COUNTRIES: usize = 10;
pub const TOP_POPULOUS: usize = 5;
pub const BIN_WIDTH: i64 = 3;
pub const STRIP_JITTER: f64 = 0.3;
const JITTER_SEED: u64 = 1901;

/// Everything the run computed, for callers that want more than the output.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub laureates: Table,
    pub population: Table,
    pub joined: Table,
    pub trends: Vec<CountryTrend>,
    pub populous: Vec<PopulationShare>,
    pub sexes: Vec<SexPoint>,
    pub country_counts: Vec<(String, usize)>,
    pub per_capita: Vec<PerCapita>,
    pub matrix: CategoryMatrix,
    pub category_totals: Vec<(Category, usize)>,
    pub collaboration: CollaborationHistograms,
}

fn section(out: &mut dyn Write, title: &str, body: &str) -> Result<()> {
    writeln!(out, "\n== {title} ==\n{body}").context("writing report")
}

/// Load both input files named by the configuration.
pub fn load(config: &Config) -> Result<(Table, Table)> {
    let laureates = load_file(&config.laureates)?;
    let population = load_file(&config.population)?;
    Ok((laureates, population))
}

pub fn run(config: &Config, sink: &mut dyn ChartSink, out: &mut dyn Write) -> Result<Analysis> {
    let (laureates, population) = load(config)?;
    analyse(
        &laureates,
        &population,
        &Renames::default(),
        config.preview_rows,
        sink,
        out,
    )
}

/// Clean, join, aggregate and report on already-loaded tables.
pub fn analyse(
    raw_laureates: &Table,
    raw_population: &Table,
    renames: &Renames,
    preview_rows: usize,
    sink: &mut dyn ChartSink,
    out: &mut dyn Write,
) -> Result<Analysis> {
    // ---- Clean ----
    let laureates = clean::clean_laureates(raw_laureates, renames)?;
    section(out, "Laureates", &console::preview(&laureates, preview_rows)?)?;
    section(
        out,
        "Laureates info",
        &console::info(&describe::info(&laureates), laureates.len())?,
    )?;
    section(
        out,
        "Laureates describe (object)",
        &console::categorical(&describe::describe_categorical(&laureates))?,
    )?;

    let stateless = clean::stateless_rows(&laureates)?;
    section(
        out,
        "Prizes without birth or organization country",
        &console::preview(&stateless, stateless.len())?,
    )?;

    let pop_2000 = clean::clean_population(raw_population)?;
    section(out, "Population 2000", &console::preview(&pop_2000, preview_rows)?)?;
    section(
        out,
        "Population info",
        &console::info(&describe::info(&pop_2000), pop_2000.len())?,
    )?;

    // ---- Raw counts, population and sex ----
    let trends = aggregate::top_countries_trend(&laureates, TOP_COUNTRIES)?;
    log::debug!("top countries: {:?}", trends.iter().map(|t| &t.country).collect::<Vec<_>>());
    sink.present(&chart::trend_chart(&trends))?;

    let populous = aggregate::population_ranking(&pop_2000, TOP_POPULOUS)?;
    sink.present(&chart::population_pie(&populous))?;
    section(
        out,
        "2000 Population describe",
        &console::numeric(&describe::describe_numeric(
            &pop_2000.select(&[population::POPULATION_2000])?,
        ))?,
    )?;

    let sexes = aggregate::sex_distribution(&laureates)?;
    sink.present(&chart::sex_strip(&sexes, STRIP_JITTER, JITTER_SEED))?;

    // ---- Join ----
    let joined = inner_join(
        &laureates,
        laureate::BIRTH_COUNTRY,
        &pop_2000,
        population::COUNTRY,
    )?;
    log::info!(
        "Joined {} of {} laureate rows on birth country",
        joined.len(),
        laureates.len()
    );

    let country_counts = aggregate::birth_country_counts(&joined)?;
    section(
        out,
        "Laureates per birth country",
        &console::pairs("Birth Country", "count", &country_counts)?,
    )?;
    let counts: Vec<f64> = country_counts.iter().map(|(_, n)| *n as f64).collect();
    section(
        out,
        "Laureates per birth country describe",
        &console::numeric(&[("count".to_string(), describe::NumericSummary::of(&counts))])?,
    )?;

    // ---- Per capita ----
    let total = aggregate::total_population(&pop_2000)?;
    let per_capita = aggregate::per_capita_ranking(&joined, total)?;
    sink.present(&chart::per_capita_bar(&per_capita))?;
    let scores: Vec<f64> = per_capita.iter().map(|p| p.score).collect();
    section(
        out,
        "Relative Population describe",
        &console::numeric(&[(
            "Relative Population".to_string(),
            describe::NumericSummary::of(&scores),
        )])?,
    )?;

    // ---- Categories ----
    let matrix = aggregate::category_matrix(&joined)?;
    sink.present(&chart::category_scatter(&matrix))?;
    let category_totals = aggregate::category_totals(&joined)?;
    section(
        out,
        "Laureates per category",
        &console::pairs("Category", "count", &category_totals)?,
    )?;

    let collaboration = aggregate::collaboration_histograms(&joined, BIN_WIDTH)?;
    sink.present(&chart::collaboration_chart(&collaboration))?;

    Ok(Analysis {
        laureates,
        population: pop_2000,
        joined,
        trends,
        populous,
        sexes,
        country_counts,
        per_capita,
        matrix,
        category_totals,
        collaboration,
    })
}
