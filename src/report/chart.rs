use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::analysis::aggregate::{
    Bin, CategoryMatrix, CollaborationHistograms, CountryTrend, PerCapita, PopulationShare,
    SexPoint,
};
use crate::color::{generate_palette, Rgb};
use crate::data::schema::Sex;

// ---------------------------------------------------------------------------
// Chart description – what to draw, independent of where it is drawn
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    /// Short file-name friendly identifier.
    pub slug: String,
    pub x_label: String,
    pub y_label: String,
    #[serde(flatten)]
    pub body: ChartBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartBody {
    Lines {
        series: Vec<LineSeries>,
    },
    Pie {
        slices: Vec<PieSlice>,
    },
    Strip {
        categories: Vec<String>,
        jitter: f64,
        points: Vec<StripPoint>,
    },
    Scatter {
        x_labels: Vec<String>,
        series: Vec<ScatterSeries>,
    },
    Bar {
        color: Rgb,
        bars: Vec<BarEntry>,
    },
    Histograms {
        bin_width: i64,
        shared_y_max: usize,
        panels: Vec<HistogramPanel>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub name: String,
    pub color: Rgb,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub share: f64,
    /// Absolute value with thousands separators, drawn inside the wedge.
    pub text: String,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StripPoint {
    /// Index into `categories`.
    pub category: usize,
    pub offset: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub name: String,
    pub color: Rgb,
    /// One value per x label, drawn as crosses.
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarEntry {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramPanel {
    pub title: String,
    pub color: Rgb,
    pub bins: Vec<Bin>,
}

// ---------------------------------------------------------------------------
// Builders, one per aggregation
// ---------------------------------------------------------------------------

pub fn trend_chart(trends: &[CountryTrend]) -> Chart {
    let palette = generate_palette(trends.len());
    let series = trends
        .iter()
        .zip(palette)
        .map(|(t, color)| LineSeries {
            name: t.country.clone(),
            color,
            points: t
                .cumulative
                .iter()
                .map(|&(year, total)| [year as f64, total as f64])
                .collect(),
        })
        .collect();
    Chart {
        title: "Cumulative laureates of the top birth countries".into(),
        slug: "top-countries-trend".into(),
        x_label: "Year".into(),
        y_label: "Laureates".into(),
        body: ChartBody::Lines { series },
    }
}

pub fn population_pie(shares: &[PopulationShare]) -> Chart {
    let palette = generate_palette(shares.len());
    let slices = shares
        .iter()
        .zip(palette)
        .map(|(s, color)| PieSlice {
            label: s.country.clone(),
            value: s.population,
            share: s.share,
            text: thousands(s.population.round() as i64),
            color,
        })
        .collect();
    Chart {
        title: "Most populous countries in 2000".into(),
        slug: "population-pie".into(),
        x_label: String::new(),
        y_label: String::new(),
        body: ChartBody::Pie { slices },
    }
}

/// Jitter is drawn from a seeded generator so the chart is reproducible.
pub fn sex_strip(points: &[SexPoint], jitter: f64, seed: u64) -> Chart {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let categories: Vec<Sex> = Sex::ALL
        .into_iter()
        .filter(|s| points.iter().any(|p| p.sex == *s))
        .collect();
    let strip = points
        .iter()
        .filter_map(|p| {
            let category = categories.iter().position(|&s| s == p.sex)?;
            Some(StripPoint {
                category,
                offset: if jitter > 0.0 {
                    rng.gen_range(-jitter..jitter)
                } else {
                    0.0
                },
                y: p.year as f64,
            })
        })
        .collect();
    Chart {
        title: "Laureates by sex over time".into(),
        slug: "sex-strip".into(),
        x_label: "Sex".into(),
        y_label: "Year".into(),
        body: ChartBody::Strip {
            categories: categories.iter().map(|s| s.to_string()).collect(),
            jitter,
            points: strip,
        },
    }
}

pub fn per_capita_bar(ranking: &[PerCapita]) -> Chart {
    Chart {
        title: "Relative laureates per capita by birth country".into(),
        slug: "per-capita".into(),
        x_label: "Birth Country".into(),
        y_label: "Relative Population".into(),
        body: ChartBody::Bar {
            color: Rgb::STEEL,
            bars: ranking
                .iter()
                .map(|r| BarEntry {
                    label: r.country.clone(),
                    value: r.score,
                })
                .collect(),
        },
    }
}

pub fn category_scatter(matrix: &CategoryMatrix) -> Chart {
    let series = matrix
        .categories
        .iter()
        .zip(&matrix.counts)
        .map(|(cat, counts)| ScatterSeries {
            name: cat.to_string(),
            color: cat.color(),
            values: counts.iter().map(|&c| c as f64).collect(),
        })
        .collect();
    Chart {
        title: "Laureates per category and birth country".into(),
        slug: "category-by-country".into(),
        x_label: "Birth Country".into(),
        y_label: "Laureates".into(),
        body: ChartBody::Scatter {
            x_labels: matrix.countries.clone(),
            series,
        },
    }
}

pub fn collaboration_chart(h: &CollaborationHistograms) -> Chart {
    Chart {
        title: "Laureates in collaborative categories".into(),
        slug: "collaboration".into(),
        x_label: "Year".into(),
        y_label: "Count".into(),
        body: ChartBody::Histograms {
            bin_width: h.bin_width,
            shared_y_max: h.shared_max,
            panels: h
                .panels
                .iter()
                .map(|p| HistogramPanel {
                    title: p.category.to_string(),
                    color: p.category.color(),
                    bins: p.bins.clone(),
                })
                .collect(),
        },
    }
}

/// `1264099069` → `"1,264,099,069"`.
pub fn thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
