use std::fs;
use std::path::Path;

use anyhow::Result;
use approx::assert_relative_eq;
use tempfile::tempdir;

use nobel_per_capita::config::Config;
use nobel_per_capita::data::schema::Category;
use nobel_per_capita::pipeline;
use nobel_per_capita::report::chart::Chart;
use nobel_per_capita::report::sink::{ChartSink, JsonSink};

const ARCHIVE: &str = "\
Year,Category,Prize,Motivation,Prize Share,Laureate ID,Laureate Type,Full Name,Birth Date,Birth Country,Sex,Organization Name,Organization Country
2003,Peace,The Nobel Peace Prize 2003,\"for peace\",1/1,3,Individual,Person B,1950-01-01,B,Female,,
2001,Physics,The Nobel Prize in Physics 2001,\"for physics\",1/1,1,Individual,Person A1,1940-01-01,A,Male,Uni A,A
2002,Chemistry,The Nobel Prize in Chemistry 2002,\"for chemistry\",1/1,2,Individual,Person A2,1941-01-01,A,Male,Uni A,A
";

const POPULATION: &str = "\
Rank,CCA3,Country/Territory,Capital,Continent,2022 Population,2000 Population,World Population Percentage
2,BBB,B,Bcity,Europe,60,50,33.3
1,AAA,A,Acity,Europe,120,100,66.7
";

/// Records charts instead of drawing them.
#[derive(Default)]
struct Recorder {
    charts: Vec<Chart>,
}

impl ChartSink for Recorder {
    fn present(&mut self, chart: &Chart) -> Result<()> {
        self.charts.push(chart.clone());
        Ok(())
    }
}

fn config(dir: &Path, archive: &str, population: &str) -> Config {
    let laureates = dir.join("archive.csv");
    let pop = dir.join("world_population.csv");
    fs::write(&laureates, archive).unwrap();
    fs::write(&pop, population).unwrap();
    Config {
        laureates,
        population: pop,
        headless: true,
        out_dir: dir.join("charts"),
        preview_rows: 10,
    }
}

#[test]
fn equal_per_capita_scores_are_ordered_deterministically() -> Result<()> {
    let dir = tempdir()?;
    let cfg = config(dir.path(), ARCHIVE, POPULATION);
    let mut sink = Recorder::default();
    let mut out = Vec::new();

    let analysis = pipeline::run(&cfg, &mut sink, &mut out)?;

    let ranked: Vec<_> = analysis.per_capita.iter().map(|p| p.country.as_str()).collect();
    assert_eq!(ranked, vec!["B", "A"]);
    assert_relative_eq!(analysis.per_capita[0].score, 3.0);
    assert_relative_eq!(analysis.per_capita[1].score, 3.0);

    // The cleaner sorted by year before anything else saw the rows.
    let years: Vec<_> = analysis
        .laureates
        .column("Year")?
        .map(|v| v.as_i64().unwrap())
        .collect();
    assert_eq!(years, vec![2001, 2002, 2003]);

    assert_eq!(analysis.joined.len(), 3);
    assert_eq!(analysis.matrix.count(Category::Peace, "A"), Some(0));
    assert_eq!(analysis.matrix.count(Category::Peace, "B"), Some(1));

    let slugs: Vec<_> = sink.charts.iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(
        slugs,
        vec![
            "top-countries-trend",
            "population-pie",
            "sex-strip",
            "per-capita",
            "category-by-country",
            "collaboration",
        ]
    );
    Ok(())
}

#[test]
fn renamed_and_historical_countries_through_the_join() -> Result<()> {
    let archive = "\
Year,Category,Prize,Motivation,Laureate ID,Full Name,Sex,Organization Name,Birth Country,Organization Country
1907,Physics,P,m,1,US Born,Male,,United States of America,United States of America
1904,Physics,P,m,2,Russian Born,Male,,Russian Empire,
1917,Peace,P,m,3,Red Cross,,International Committee of the Red Cross,,
";
    let population = "\
Rank,Country/Territory,Continent,2000 Population,World Population Percentage
3,United States,North America,282398554,4.24
";
    let dir = tempdir()?;
    let cfg = config(dir.path(), archive, population);
    let mut out = Vec::new();

    let analysis = pipeline::run(&cfg, &mut Recorder::default(), &mut out)?;

    assert_eq!(analysis.joined.len(), 1);
    assert!(analysis.joined.len() <= analysis.laureates.len());
    let birth = analysis.joined.column_index("Birth Country")?;
    let country = analysis.joined.column_index("Country/Territory")?;
    for row in analysis.joined.rows() {
        assert_eq!(row[birth], row[country]);
    }
    assert_eq!(analysis.per_capita[0].country, "United States");
    assert_relative_eq!(analysis.per_capita[0].score, 1.0);

    let text = String::from_utf8(out)?;
    let stateless = text
        .find("== Prizes without birth or organization country ==")
        .expect("stateless section");
    assert!(text[stateless..].contains("Red Cross"));
    assert!(!text.contains("United States of America"));
    Ok(())
}

#[test]
fn float_population_column_runs_end_to_end() -> Result<()> {
    let population = "\
Rank,Country/Territory,Continent,2000 Population,World Population Percentage
2,B,Europe,50.0,33.3
1,A,Europe,100.0,66.7
";
    let dir = tempdir()?;
    let cfg = config(dir.path(), ARCHIVE, population);
    let mut sink = Recorder::default();

    let analysis = pipeline::run(&cfg, &mut sink, &mut Vec::<u8>::new())?;

    let ranked: Vec<_> = analysis.per_capita.iter().map(|p| p.country.as_str()).collect();
    assert_eq!(ranked, vec!["B", "A"]);
    assert_relative_eq!(analysis.per_capita[0].score, 3.0);
    assert_eq!(analysis.populous[0].country, "A");
    assert_eq!(sink.charts.len(), 6);
    Ok(())
}

#[test]
fn report_sections_come_in_order() -> Result<()> {
    let dir = tempdir()?;
    let cfg = config(dir.path(), ARCHIVE, POPULATION);
    let mut out = Vec::new();
    pipeline::run(&cfg, &mut Recorder::default(), &mut out)?;
    let text = String::from_utf8(out)?;

    let order = [
        "== Laureates ==",
        "== Laureates info ==",
        "== Laureates describe (object) ==",
        "== Prizes without birth or organization country ==",
        "== Population 2000 ==",
        "== Population info ==",
        "== 2000 Population describe ==",
        "== Laureates per birth country ==",
        "== Laureates per birth country describe ==",
        "== Relative Population describe ==",
        "== Laureates per category ==",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|h| text.find(h).unwrap_or_else(|| panic!("missing {h}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    Ok(())
}

#[test]
fn empty_join_is_not_an_error() -> Result<()> {
    let population = "\
Rank,Country/Territory,Continent,2000 Population,World Population Percentage
1,Atlantis,Ocean,10,100.0
";
    let dir = tempdir()?;
    let cfg = config(dir.path(), ARCHIVE, population);
    let mut sink = JsonSink::new(&cfg.out_dir)?;
    let mut out = Vec::new();

    let analysis = pipeline::run(&cfg, &mut sink, &mut out)?;

    assert!(analysis.joined.is_empty());
    assert!(analysis.per_capita.is_empty());
    assert!(analysis.matrix.countries.is_empty());
    assert_eq!(analysis.collaboration.shared_max, 0);
    assert_eq!(sink.written().len(), 6);
    assert!(sink.written()[0].ends_with("01-top-countries-trend.json"));
    assert!(sink.written()[5].ends_with("06-collaboration.json"));
    Ok(())
}

#[test]
fn missing_input_is_fatal() {
    let dir = tempdir().unwrap();
    let cfg = Config {
        laureates: dir.path().join("nope.csv"),
        population: dir.path().join("nope_either.csv"),
        headless: true,
        out_dir: dir.path().join("charts"),
        preview_rows: 10,
    };
    let err = pipeline::run(&cfg, &mut Recorder::default(), &mut Vec::<u8>::new()).unwrap_err();
    assert!(format!("{err:#}").contains("nope.csv"));
}
