use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::model::{Table, Value};
use crate::data::schema::{laureate, population, Category, Sex};
use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Typed cell access
// ---------------------------------------------------------------------------

fn invalid(column: &str, value: &Value) -> AnalysisError {
    AnalysisError::InvalidValue {
        column: column.to_string(),
        value: value.to_string(),
    }
}

fn int_cell(row: &[Value], idx: usize, column: &str) -> Result<i64, AnalysisError> {
    row[idx].as_i64().ok_or_else(|| invalid(column, &row[idx]))
}

/// A population count: integer or float, finite and positive.
fn population_cell(row: &[Value], idx: usize) -> Result<f64, AnalysisError> {
    match row[idx].as_f64() {
        Some(p) if p.is_finite() && p > 0.0 => Ok(p),
        _ => Err(invalid(population::POPULATION_2000, &row[idx])),
    }
}

/// Parse a category cell, logging and skipping anything unrecognised.
fn category_cell(row: &[Value], idx: usize) -> Option<Category> {
    let parsed = row[idx].as_str().map(str::parse::<Category>);
    match parsed {
        Some(Ok(c)) => Some(c),
        _ => {
            log::warn!("skipping row with unknown category {}", row[idx]);
            None
        }
    }
}

// ---------------------------------------------------------------------------
// 1. Top countries by raw laureate count, cumulative over the years
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryTrend {
    pub country: String,
    /// (year, running total of laureates up to and including that year)
    pub cumulative: Vec<(i64, usize)>,
}

/// The `n` birth countries with the most laureate rows (equal counts ordered
/// alphabetically), returned alphabetically, each with its cumulative count
/// by year.
pub fn top_countries_trend(laureates: &Table, n: usize) -> Result<Vec<CountryTrend>, AnalysisError> {
    let country_idx = laureates.column_index(laureate::BIRTH_COUNTRY)?;
    let year_idx = laureates.column_index(laureate::YEAR)?;

    let mut top: Vec<String> = laureates
        .value_counts(laureate::BIRTH_COUNTRY)?
        .into_iter()
        .take(n)
        .map(|(v, _)| v.to_string())
        .collect();
    top.sort();

    top.into_iter()
        .map(|country| -> Result<CountryTrend, AnalysisError> {
            let mut per_year: BTreeMap<i64, usize> = BTreeMap::new();
            for row in laureates.rows() {
                if row[country_idx].as_str() == Some(country.as_str()) {
                    *per_year
                        .entry(int_cell(row, year_idx, laureate::YEAR)?)
                        .or_default() += 1;
                }
            }
            let cumulative = per_year
                .into_iter()
                .scan(0usize, |total, (year, count)| {
                    *total += count;
                    Some((year, *total))
                })
                .collect();
            Ok(CountryTrend {
                country,
                cumulative,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// 2. Most populous countries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationShare {
    pub country: String,
    pub population: f64,
    /// Fraction of the summed population of the selected countries.
    pub share: f64,
}

/// The `n` most populous countries in 2000 (equal populations by rank).
pub fn population_ranking(pop: &Table, n: usize) -> Result<Vec<PopulationShare>, AnalysisError> {
    let rank_idx = pop.column_index(population::RANK)?;
    let country_idx = pop.column_index(population::COUNTRY)?;
    let pop_idx = pop.column_index(population::POPULATION_2000)?;

    let mut ranked = pop
        .rows()
        .iter()
        .map(|row| -> Result<(f64, i64, String), AnalysisError> {
            Ok((
                population_cell(row, pop_idx)?,
                int_cell(row, rank_idx, population::RANK)?,
                row[country_idx].to_string(),
            ))
        })
        .collect::<Result<Vec<_>, AnalysisError>>()?;
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
    ranked.truncate(n);

    let total: f64 = ranked.iter().map(|(p, _, _)| p).sum();
    Ok(ranked
        .into_iter()
        .map(|(population, _, country)| PopulationShare {
            country,
            population,
            share: population / total,
        })
        .collect())
}

// ---------------------------------------------------------------------------
// 3. Sex over time
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SexPoint {
    pub sex: Sex,
    pub year: i64,
}

/// One point per laureate row with a recorded sex. Organizations have none
/// and are left out.
pub fn sex_distribution(laureates: &Table) -> Result<Vec<SexPoint>, AnalysisError> {
    let sex_idx = laureates.column_index(laureate::SEX)?;
    let year_idx = laureates.column_index(laureate::YEAR)?;

    let mut points = Vec::new();
    for row in laureates.rows() {
        let Some(raw) = row[sex_idx].as_str() else {
            continue;
        };
        match raw.parse::<Sex>() {
            Ok(sex) => points.push(SexPoint {
                sex,
                year: int_cell(row, year_idx, laureate::YEAR)?,
            }),
            Err(e) => log::warn!("skipping row: {e}"),
        }
    }
    Ok(points)
}

// ---------------------------------------------------------------------------
// 4. Laureates per capita
// ---------------------------------------------------------------------------

/// Sum of the 2000 population over every country of the population table.
pub fn total_population(pop: &Table) -> Result<f64, AnalysisError> {
    let mut total = 0.0;
    for v in pop.column(population::POPULATION_2000)? {
        total += v
            .as_f64()
            .ok_or_else(|| invalid(population::POPULATION_2000, v))?;
    }
    Ok(total)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerCapita {
    pub country: String,
    pub laureates: usize,
    pub population: f64,
    /// Sum over the country's rows of `total_population / population`.
    pub score: f64,
}

/// Relative per-capita laureate score of every birth country in the joined
/// table, highest first.
///
/// Equal scores put the country with fewer laureate rows first (the same
/// score from fewer laureates means a smaller population), then order by
/// name.
pub fn per_capita_ranking(joined: &Table, total_population: f64) -> Result<Vec<PerCapita>, AnalysisError> {
    let country_idx = joined.column_index(laureate::BIRTH_COUNTRY)?;
    let pop_idx = joined.column_index(population::POPULATION_2000)?;

    let mut by_country: BTreeMap<String, PerCapita> = BTreeMap::new();
    for row in joined.rows() {
        let population = population_cell(row, pop_idx)?;
        let relative = total_population / population;
        let country = row[country_idx].to_string();
        let entry = by_country
            .entry(country.clone())
            .or_insert_with(|| PerCapita {
                country,
                laureates: 0,
                population,
                score: 0.0,
            });
        entry.laureates += 1;
        entry.score += relative;
    }

    let mut ranking: Vec<PerCapita> = by_country.into_values().collect();
    ranking.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(a.laureates.cmp(&b.laureates))
            .then_with(|| a.country.cmp(&b.country))
    });
    Ok(ranking)
}

// ---------------------------------------------------------------------------
// 5. Category by country
// ---------------------------------------------------------------------------

/// Laureate row counts per (category, country), zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMatrix {
    /// Alphabetical.
    pub countries: Vec<String>,
    pub categories: Vec<Category>,
    /// `counts[c][k]` is the count for `categories[c]` and `countries[k]`.
    pub counts: Vec<Vec<usize>>,
}

impl CategoryMatrix {
    pub fn row(&self, category: Category) -> Option<&[usize]> {
        self.categories
            .iter()
            .position(|&c| c == category)
            .map(|i| self.counts[i].as_slice())
    }

    pub fn count(&self, category: Category, country: &str) -> Option<usize> {
        let k = self.countries.iter().position(|c| c == country)?;
        self.row(category).map(|r| r[k])
    }
}

pub fn category_matrix(joined: &Table) -> Result<CategoryMatrix, AnalysisError> {
    let country_idx = joined.column_index(laureate::BIRTH_COUNTRY)?;
    let cat_idx = joined.column_index(laureate::CATEGORY)?;

    let mut cells: BTreeMap<(Category, String), usize> = BTreeMap::new();
    let mut countries: Vec<String> = Vec::new();
    for row in joined.rows() {
        let country = row[country_idx].to_string();
        if !countries.contains(&country) {
            countries.push(country.clone());
        }
        if let Some(cat) = category_cell(row, cat_idx) {
            *cells.entry((cat, country)).or_default() += 1;
        }
    }
    countries.sort();

    let categories = Category::ALL.to_vec();
    let counts = categories
        .iter()
        .map(|&cat| {
            countries
                .iter()
                .map(|country| cells.get(&(cat, country.clone())).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    Ok(CategoryMatrix {
        countries,
        categories,
        counts,
    })
}

/// Joined row count per category, largest first (equal counts in category
/// order). Categories with no rows are listed with 0.
pub fn category_totals(joined: &Table) -> Result<Vec<(Category, usize)>, AnalysisError> {
    let cat_idx = joined.column_index(laureate::CATEGORY)?;
    let mut totals: BTreeMap<Category, usize> = Category::ALL.iter().map(|&c| (c, 0)).collect();
    for row in joined.rows() {
        if let Some(cat) = category_cell(row, cat_idx) {
            *totals.entry(cat).or_default() += 1;
        }
    }
    let mut out: Vec<(Category, usize)> = totals.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    Ok(out)
}

/// Joined row count per birth country, largest first.
pub fn birth_country_counts(joined: &Table) -> Result<Vec<(String, usize)>, AnalysisError> {
    Ok(joined
        .value_counts(laureate::BIRTH_COUNTRY)?
        .into_iter()
        .map(|(v, n)| (v.to_string(), n))
        .collect())
}

// ---------------------------------------------------------------------------
// 6. Collaborative awards over time
// ---------------------------------------------------------------------------

/// Categories whose prizes are most often split between several laureates.
pub const COLLABORATIVE: [Category; 3] = [Category::Physics, Category::Chemistry, Category::Medicine];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bin {
    pub start: i64,
    pub end: i64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub category: Category,
    pub bins: Vec<Bin>,
}

impl Histogram {
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollaborationHistograms {
    pub bin_width: i64,
    pub panels: Vec<Histogram>,
    /// Largest bin count over every panel, for a shared y-axis.
    pub shared_max: usize,
}

/// Bin `years` into `[start, start + width)` windows starting at the
/// earliest year. The last bin also takes its upper edge. A non-positive
/// width gives no bins.
pub fn histogram(years: &[i64], width: i64) -> Vec<Bin> {
    if width <= 0 {
        return Vec::new();
    }
    let (Some(&min), Some(&max)) = (years.iter().min(), years.iter().max()) else {
        return Vec::new();
    };
    let n_bins = ((max - min + width - 1) / width).max(1);
    let mut bins: Vec<Bin> = (0..n_bins)
        .map(|i| Bin {
            start: min + i * width,
            end: min + (i + 1) * width,
            count: 0,
        })
        .collect();
    for &y in years {
        let i = ((y - min) / width).min(n_bins - 1) as usize;
        bins[i].count += 1;
    }
    bins
}

pub fn collaboration_histograms(
    joined: &Table,
    bin_width: i64,
) -> Result<CollaborationHistograms, AnalysisError> {
    let cat_idx = joined.column_index(laureate::CATEGORY)?;
    let year_idx = joined.column_index(laureate::YEAR)?;

    let panels = COLLABORATIVE
        .iter()
        .map(|&category| -> Result<Histogram, AnalysisError> {
            let years = joined
                .rows()
                .iter()
                .filter(|row| row[cat_idx].as_str() == Some(category.name()))
                .map(|row| int_cell(row, year_idx, laureate::YEAR))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Histogram {
                category,
                bins: histogram(&years, bin_width),
            })
        })
        .collect::<Result<Vec<_>, AnalysisError>>()?;

    let shared_max = panels.iter().map(Histogram::max_count).max().unwrap_or(0);
    Ok(CollaborationHistograms {
        bin_width,
        panels,
        shared_max,
    })
}
