//! The dataset catalog: which cities have data, where the CSV files live,
//! and which common misspellings map onto which city.
//!
//! The catalog is built once at startup and passed by reference into the
//! collectors and the loader, so tests can run against an alternate catalog
//! pointing at fixture files instead of the real datasets.

use std::path::{Path, PathBuf};

/// Directory searched for the city CSV files when no override is given.
pub const DEFAULT_DATA_DIR: &str = "data";

/// A city with available trip data, resolved from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    name: String,
    file: String,
}

impl City {
    /// Canonical lowercase name ("new york city").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// CSV file name within the catalog's data directory.
    pub fn file(&self) -> &str {
        &self.file
    }
}

/// Catalog of available city datasets plus the typo-correction table.
#[derive(Debug, Clone)]
pub struct Catalog {
    data_dir: PathBuf,
    cities: Vec<City>,
    typos: Vec<(String, String)>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(PathBuf::from(DEFAULT_DATA_DIR))
    }
}

impl Catalog {
    /// The standard three-city catalog rooted at `data_dir`.
    pub fn new(data_dir: PathBuf) -> Self {
        let cities = [
            ("chicago", "chicago.csv"),
            ("new york city", "new_york_city.csv"),
            ("washington", "washington.csv"),
        ];
        // Misspellings seen in the wild, each presumed to mean a valid city.
        let typos = [
            ("chicgo", "chicago"),
            ("chiago", "chicago"),
            ("chacago", "chicago"),
            ("chicargo", "chicago"),
            ("new york", "new york city"),
            ("nyc", "new york city"),
            ("newyorkcity", "new york city"),
            ("newyork", "new york city"),
            ("ny city", "new york city"),
            ("nycity", "new york city"),
            ("wash", "washington"),
        ];

        Self {
            data_dir,
            cities: cities
                .into_iter()
                .map(|(name, file)| City {
                    name: name.to_owned(),
                    file: file.to_owned(),
                })
                .collect(),
            typos: typos
                .into_iter()
                .map(|(typo, city)| (typo.to_owned(), city.to_owned()))
                .collect(),
        }
    }

    /// A catalog with explicit city entries, for tests.
    pub fn with_cities(data_dir: PathBuf, cities: &[(&str, &str)]) -> Self {
        Self {
            data_dir,
            cities: cities
                .iter()
                .map(|&(name, file)| City {
                    name: name.to_owned(),
                    file: file.to_owned(),
                })
                .collect(),
            typos: Vec::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path to a city's CSV file.
    pub fn data_file(&self, city: &City) -> PathBuf {
        self.data_dir.join(&city.file)
    }

    /// Canonical city names in catalog order.
    pub fn city_names(&self) -> Vec<&str> {
        self.cities.iter().map(|city| city.name.as_str()).collect()
    }

    /// Look up a city by its exact canonical name.
    pub fn find(&self, normalized: &str) -> Option<City> {
        self.cities
            .iter()
            .find(|city| city.name == normalized)
            .cloned()
    }

    /// Correct a known misspelling to its canonical city name.
    pub fn correct_typo(&self, normalized: &str) -> Option<&str> {
        self.typos
            .iter()
            .find(|(typo, _)| typo == normalized)
            .map(|(_, city)| city.as_str())
    }

    /// Match the input's first three characters against the first three
    /// characters of each catalog city. Input shorter than three characters
    /// never matches.
    pub fn prefix_match(&self, normalized: &str) -> Option<City> {
        let prefix: String = normalized.chars().take(3).collect();
        if prefix.chars().count() < 3 {
            return None;
        }
        self.cities
            .iter()
            .find(|city| city.name.chars().take(3).collect::<String>() == prefix)
            .cloned()
    }
}
