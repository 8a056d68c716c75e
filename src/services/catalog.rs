use crate::models::{Demographics, Factor, FactorScores, Neighborhood};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading a neighborhood catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported catalog format: {0} (expected .json or .toml)")]
    UnsupportedFormat(String),

    #[error("Neighborhood {id} has {factor} score {score}, expected 0-100")]
    ScoreOutOfRange { id: String, factor: Factor, score: u8 },

    #[error("Duplicate neighborhood id: {0}")]
    DuplicateId(String),
}

/// On-disk catalog layout, shared by the JSON and TOML formats
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    neighborhoods: Vec<Neighborhood>,
}

/// Read-only set of candidate neighborhoods, in insertion order
#[derive(Debug, Clone)]
pub struct Catalog {
    neighborhoods: Vec<Neighborhood>,
}

impl Catalog {
    /// Build a catalog, rejecting out-of-range scores and duplicate ids
    pub fn new(neighborhoods: Vec<Neighborhood>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for neighborhood in &neighborhoods {
            if let Some((factor, score)) = neighborhood.scores.out_of_range() {
                return Err(CatalogError::ScoreOutOfRange {
                    id: neighborhood.id.clone(),
                    factor,
                    score,
                });
            }
            if !seen.insert(neighborhood.id.as_str()) {
                return Err(CatalogError::DuplicateId(neighborhood.id.clone()));
            }
        }

        Ok(Self { neighborhoods })
    }

    /// Load a catalog file; the format is picked from the extension
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let file: CatalogFile = match extension.as_str() {
            "json" => serde_json::from_str(&contents)?,
            "toml" => toml::from_str(&contents)?,
            _ => return Err(CatalogError::UnsupportedFormat(path.display().to_string())),
        };

        let catalog = Self::new(file.neighborhoods)?;
        tracing::info!("Loaded {} neighborhoods from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// The five Seattle neighborhoods shipped as reference data
    pub fn canonical() -> Self {
        Self {
            neighborhoods: canonical_neighborhoods(),
        }
    }

    pub fn neighborhoods(&self) -> &[Neighborhood] {
        &self.neighborhoods
    }

    pub fn get(&self, id: &str) -> Option<&Neighborhood> {
        self.neighborhoods.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.neighborhoods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighborhoods.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::canonical()
    }
}

fn neighborhood(
    id: &str,
    name: &str,
    scores: [u8; 6],
    demographics: [u32; 3],
    key_features: &[&str],
    highlights: &[&str],
) -> Neighborhood {
    let [walkability, safety, affordability, nightlife, family_friendly, transit] = scores;
    let [median_age, median_income, population] = demographics;

    Neighborhood {
        id: id.to_string(),
        name: name.to_string(),
        city: "Seattle, WA".to_string(),
        scores: FactorScores {
            walkability,
            safety,
            affordability,
            nightlife,
            family_friendly,
            transit,
        },
        demographics: Demographics {
            median_age,
            median_income,
            population,
        },
        key_features: key_features.iter().map(|s| s.to_string()).collect(),
        highlights: highlights.iter().map(|s| s.to_string()).collect(),
    }
}

fn canonical_neighborhoods() -> Vec<Neighborhood> {
    vec![
        neighborhood(
            "1",
            "Capitol Hill",
            [95, 75, 60, 90, 65, 85],
            [29, 75000, 28000],
            &["Vibrant nightlife", "Walkable streets", "Arts scene", "Coffee culture"],
            &["Pike/Pine corridor", "Cal Anderson Park", "Light rail access"],
        ),
        neighborhood(
            "2",
            "Fremont",
            [85, 85, 70, 70, 80, 75],
            [35, 82000, 15000],
            &["Quirky character", "Local businesses", "Family-friendly", "Sunday market"],
            &["Fremont Troll", "Gas Works Park nearby", "Local breweries"],
        ),
        neighborhood(
            "3",
            "Ballard",
            [80, 80, 65, 85, 75, 70],
            [32, 78000, 22000],
            &["Historic charm", "Brewery scene", "Waterfront", "Nordic heritage"],
            &["Ballard Locks", "Sunday farmers market", "Maritime history"],
        ),
        neighborhood(
            "4",
            "Queen Anne",
            [75, 90, 55, 60, 85, 80],
            [38, 95000, 18000],
            &["Upscale living", "Seattle Center proximity", "Great views", "Low crime"],
            &["Space Needle views", "Seattle Center", "Kerry Park"],
        ),
        neighborhood(
            "5",
            "Georgetown",
            [65, 70, 85, 75, 60, 65],
            [31, 65000, 8000],
            &["Industrial charm", "Affordable", "Art studios", "Emerging area"],
            &["Georgetown Steam Plant", "Art galleries", "Craft breweries"],
        ),
    ]
}
