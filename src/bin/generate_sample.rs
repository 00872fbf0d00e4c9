//! Writes a small, deterministic `archive.csv` / `world_population.csv` pair
//! shaped like the Kaggle exports, so the analysis can run without them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use nobel_per_capita::data::schema::Category;

#[derive(Parser, Debug)]
#[command(about = "Generate sample laureate and population CSV files")]
struct Args {
    /// Output directory
    #[arg(default_value = "data")]
    out_dir: PathBuf,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// (name in the population table, continent, 2000 population, laureate weight)
const COUNTRIES: &[(&str, &str, i64, u32)] = &[
    ("China", "Asia", 1_264_099_069, 2),
    ("India", "Asia", 1_059_633_675, 3),
    ("United States", "North America", 282_398_554, 40),
    ("Indonesia", "Asia", 214_072_421, 0),
    ("Brazil", "South America", 175_873_720, 1),
    ("Japan", "Asia", 126_803_861, 5),
    ("Germany", "Europe", 81_551_677, 14),
    ("France", "Europe", 58_665_453, 10),
    ("United Kingdom", "Europe", 58_850_043, 15),
    ("Italy", "Europe", 56_966_397, 4),
    ("Poland", "Europe", 38_504_431, 3),
    ("Netherlands", "Europe", 15_899_135, 4),
    ("Sweden", "Europe", 8_871_043, 6),
    ("Switzerland", "Europe", 7_182_059, 4),
    ("Norway", "Europe", 4_491_202, 2),
    ("Ireland", "Europe", 3_768_950, 1),
    ("Luxembourg", "Europe", 435_628, 1),
    ("Iceland", "Europe", 281_462, 1),
    ("Saint Lucia", "North America", 159_500, 1),
];

/// Birth countries spelled differently from the population table.
const UNMATCHED: &[&str] = &["United States of America", "Russian Empire", "Prussia (Germany)"];

const POPULATION_HEADER: &[&str] = &[
    "Rank",
    "CCA3",
    "Country/Territory",
    "Capital",
    "Continent",
    "2022 Population",
    "2000 Population",
    "Area (km²)",
    "World Population Percentage",
];

const ARCHIVE_HEADER: &[&str] = &[
    "Year",
    "Category",
    "Prize",
    "Motivation",
    "Prize Share",
    "Laureate ID",
    "Laureate Type",
    "Full Name",
    "Birth Country",
    "Sex",
    "Organization Name",
    "Organization Country",
];

fn pick_country(rng: &mut ChaCha8Rng) -> &'static str {
    if rng.gen::<f64>() < 0.25 {
        return UNMATCHED[rng.gen_range(0..UNMATCHED.len())];
    }
    let total: u32 = COUNTRIES.iter().map(|c| c.3).sum();
    let mut ticket = rng.gen_range(0..total);
    for &(name, _, _, weight) in COUNTRIES {
        if ticket < weight {
            return name;
        }
        ticket -= weight;
    }
    COUNTRIES[0].0
}

fn write_population(path: &Path) -> Result<()> {
    let mut w = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    w.write_record(POPULATION_HEADER)?;
    let world: i64 = COUNTRIES.iter().map(|c| c.2).sum();
    for (i, &(name, continent, pop, _)) in COUNTRIES.iter().enumerate() {
        let code: String = name.chars().filter(|c| c.is_alphabetic()).take(3).collect();
        w.write_record([
            (i + 1).to_string(),
            code.to_uppercase(),
            name.to_string(),
            String::new(),
            continent.to_string(),
            (pop + pop / 5).to_string(),
            pop.to_string(),
            "1000".to_string(),
            format!("{:.2}", pop as f64 * 100.0 / world as f64),
        ])?;
    }
    w.flush()?;
    Ok(())
}

fn write_archive(path: &Path, rng: &mut ChaCha8Rng) -> Result<usize> {
    let mut w = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    w.write_record(ARCHIVE_HEADER)?;

    let mut laureate_id = 0;
    for year in 1901..=2016 {
        for category in Category::ALL {
            if category == Category::Economics && year < 1969 {
                continue;
            }
            // Sciences are split more often, and more so in later years.
            let collaborative = matches!(
                category,
                Category::Physics | Category::Chemistry | Category::Medicine
            );
            let p_split = if collaborative {
                0.2 + 0.6 * (year - 1901) as f64 / 115.0
            } else {
                0.1
            };
            let winners = if rng.gen::<f64>() < p_split { rng.gen_range(2..4) } else { 1 };

            for _ in 0..winners {
                laureate_id += 1;
                let organization = category == Category::Peace && rng.gen::<f64>() < 0.15;
                let (birth, sex) = if organization {
                    (String::new(), String::new())
                } else {
                    let sex = if rng.gen::<f64>() < 0.05 + 0.1 * (year - 1901) as f64 / 115.0 {
                        "Female"
                    } else {
                        "Male"
                    };
                    (pick_country(rng).to_string(), sex.to_string())
                };
                w.write_record([
                    year.to_string(),
                    category.to_string(),
                    format!("The Nobel Prize in {category} {year}"),
                    format!("\"for contribution #{laureate_id}\""),
                    format!("1/{winners}"),
                    laureate_id.to_string(),
                    if organization { "Organization" } else { "Individual" }.to_string(),
                    format!("Laureate {laureate_id}"),
                    birth,
                    sex,
                    if organization {
                        format!("Organization {laureate_id}")
                    } else {
                        String::new()
                    },
                    String::new(),
                ])?;
            }
        }
    }
    w.flush()?;
    Ok(laureate_id)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let population = args.out_dir.join("world_population.csv");
    let archive = args.out_dir.join("archive.csv");
    write_population(&population)?;
    let rows = write_archive(&archive, &mut rng)?;

    println!(
        "Wrote {rows} laureate rows to {} and {} countries to {}",
        archive.display(),
        COUNTRIES.len(),
        population.display()
    );
    Ok(())
}
