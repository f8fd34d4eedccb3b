//! ManualDataSource - Loads catalog documents from a dataset directory.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use super::{Catalog, CatalogError, IdolsDocument, ProduceCardsDocument, SupportCardsDocument};
use crate::domain::Idol;

const IDOLS_FILE: &str = "idols.json";
const PRODUCE_CARDS_FILE: &str = "produceCards.json";
const SUPPORT_CARDS_FILE: &str = "supportCards.json";

/// Which dataset to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    #[default]
    Dummy,
    Production,
}

impl DatasetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DatasetKind::Dummy => "dummy",
            DatasetKind::Production => "production",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dummy" => Ok(DatasetKind::Dummy),
            "production" => Ok(DatasetKind::Production),
            other => Err(format!("unknown dataset: {}", other)),
        }
    }
}

/// Location of the catalog documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataSourceConfig {
    pub dataset: DatasetKind,
    pub base_dir: PathBuf,
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetKind::Dummy,
            base_dir: PathBuf::from("external-data"),
        }
    }
}

impl DataSourceConfig {
    pub fn new(base_dir: impl Into<PathBuf>, dataset: DatasetKind) -> Self {
        Self {
            dataset,
            base_dir: base_dir.into(),
        }
    }

    /// `<base_dir>/<dataset>`
    pub fn dataset_dir(&self) -> PathBuf {
        self.base_dir.join(self.dataset.as_str())
    }
}

/// Reads the three catalog documents from disk and assembles a [`Catalog`].
///
/// Failures are returned as-is; there is no retry.
#[derive(Debug, Clone)]
pub struct ManualDataSource {
    config: DataSourceConfig,
}

impl ManualDataSource {
    pub fn new(config: DataSourceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DataSourceConfig {
        &self.config
    }

    /// Load idols, produce cards and support cards, then derive stories.
    pub fn fetch_catalog(&self) -> Result<Catalog, CatalogError> {
        let dir = self.config.dataset_dir();
        let idols: IdolsDocument = read_document(&dir, IDOLS_FILE)?;
        let produce_cards: ProduceCardsDocument = read_document(&dir, PRODUCE_CARDS_FILE)?;
        let support_cards: SupportCardsDocument = read_document(&dir, SUPPORT_CARDS_FILE)?;

        debug!(
            dataset = %self.config.dataset,
            dir = %dir.display(),
            idols_version = %idols.version,
            produce_cards_version = %produce_cards.version,
            support_cards_version = %support_cards.version,
            "loaded catalog documents"
        );

        Ok(Catalog::assemble(idols, produce_cards, support_cards))
    }

    /// Load only the idols document.
    pub fn fetch_idols(&self) -> Result<Vec<Idol>, CatalogError> {
        let document: IdolsDocument = read_document(&self.config.dataset_dir(), IDOLS_FILE)?;
        Ok(document.idols)
    }
}

fn read_document<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T, CatalogError> {
    let path = dir.join(file);
    let contents = fs::read_to_string(&path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&contents).map_err(|e| CatalogError::Parse {
        document: file.to_string(),
        message: e.to_string(),
    })
}
