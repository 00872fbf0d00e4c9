//! Column names of the two input datasets and the typed enums parsed from
//! their categorical columns.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::color::Rgb;
use crate::error::AnalysisError;

/// Laureate dataset (`archive.csv`).
pub mod laureate {
    pub const YEAR: &str = "Year";
    pub const CATEGORY: &str = "Category";
    pub const PRIZE: &str = "Prize";
    pub const MOTIVATION: &str = "Motivation";
    pub const LAUREATE_ID: &str = "Laureate ID";
    pub const FULL_NAME: &str = "Full Name";
    pub const SEX: &str = "Sex";
    pub const ORGANIZATION_NAME: &str = "Organization Name";
    pub const BIRTH_COUNTRY: &str = "Birth Country";
    pub const ORGANIZATION_COUNTRY: &str = "Organization Country";

    /// Columns kept by the cleaner, in output order.
    pub const COLUMNS: [&str; 10] = [
        YEAR,
        CATEGORY,
        PRIZE,
        MOTIVATION,
        LAUREATE_ID,
        FULL_NAME,
        SEX,
        ORGANIZATION_NAME,
        BIRTH_COUNTRY,
        ORGANIZATION_COUNTRY,
    ];
}

/// Population dataset (`world_population.csv`).
pub mod population {
    pub const RANK: &str = "Rank";
    pub const COUNTRY: &str = "Country/Territory";
    pub const CONTINENT: &str = "Continent";
    pub const POPULATION_2000: &str = "2000 Population";
    pub const WORLD_PERCENTAGE: &str = "World Population Percentage";

    pub const COLUMNS: [&str; 5] = [RANK, COUNTRY, CONTINENT, POPULATION_2000, WORLD_PERCENTAGE];
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Nobel Prize category.
///
/// Declaration order is the display order: the order in which categories
/// first appear once the laureate table is sorted by year (Economics was
/// only introduced in 1969).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    Chemistry,
    Literature,
    Medicine,
    Peace,
    Physics,
    Economics,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Chemistry,
        Category::Literature,
        Category::Medicine,
        Category::Peace,
        Category::Physics,
        Category::Economics,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Chemistry => "Chemistry",
            Category::Literature => "Literature",
            Category::Medicine => "Medicine",
            Category::Peace => "Peace",
            Category::Physics => "Physics",
            Category::Economics => "Economics",
        }
    }

    /// Fixed scatter colour (red, green, blue, cyan, magenta, yellow).
    pub fn color(self) -> Rgb {
        match self {
            Category::Chemistry => Rgb::RED,
            Category::Literature => Rgb::GREEN,
            Category::Medicine => Rgb::BLUE,
            Category::Peace => Rgb::CYAN,
            Category::Physics => Rgb::MAGENTA,
            Category::Economics => Rgb::YELLOW,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| AnalysisError::InvalidValue {
                column: laureate::CATEGORY.to_string(),
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Sex
// ---------------------------------------------------------------------------

/// Laureate sex; organizations have none and are represented by an absent cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn name(self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sex {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Sex::Male),
            "Female" => Ok(Sex::Female),
            other => Err(AnalysisError::InvalidValue {
                column: laureate::SEX.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_name() {
        for c in Category::ALL {
            assert_eq!(c.name().parse::<Category>().unwrap(), c);
        }
        assert!("Mathematics".parse::<Category>().is_err());
    }

    #[test]
    fn sex_rejects_unknown() {
        assert_eq!("Female".parse::<Sex>().unwrap(), Sex::Female);
        assert!("org".parse::<Sex>().is_err());
    }
}
