//! Sample catalog loading

use std::collections::HashMap;
use std::io::Read;
use std::path::{
    Path,
    PathBuf,
};
use tracing::{
    info,
    instrument,
};

use crate::errors::FoodRepoError;
use crate::models::Sample;

/// The table of known samples, in file order.
#[derive(Debug, Clone, Default)]
pub struct SampleCatalog {
    samples: Vec<Sample>,
    index_by_id: HashMap<String, usize>,
}

impl SampleCatalog {
    /// Load the catalog from a CSV file with a header row.
    ///
    /// A missing or unreadable file is reported as `CatalogUnavailable` so
    /// callers can show a single warning instead of failing.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, FoodRepoError> {
        let file = std::fs::File::open(path).map_err(|e| FoodRepoError::CatalogUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let catalog = Self::from_reader(file, path.to_path_buf())?;
        info!(
            "Loaded {} samples from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parse catalog rows from any CSV source; `origin` is only used in errors.
    pub fn from_reader<R: Read>(reader: R, origin: PathBuf) -> Result<Self, FoodRepoError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let samples = rdr
            .deserialize::<Sample>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| FoodRepoError::CatalogFormat {
                path: origin,
                source: e,
            })?;
        Ok(Self::from_samples(samples))
    }

    /// Build a catalog from already-parsed samples.
    ///
    /// If an id repeats, lookups resolve to its first row.
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        let mut index_by_id = HashMap::with_capacity(samples.len());
        for (idx, sample) in samples.iter().enumerate() {
            index_by_id.entry(sample.id.clone()).or_insert(idx);
        }
        Self {
            samples,
            index_by_id,
        }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Sample> {
        self.index_by_id.get(id).map(|&idx| &self.samples[idx])
    }

    /// Catalog position of an id, used to order batches.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    /// Series label for a sample id, falling back to the bare id.
    pub fn label_for(&self, id: &str) -> String {
        match self.get(id) {
            Some(sample) => sample.series_label(),
            None => id.to_string(),
        }
    }

    /// Returns indices of all samples whose id, name or category contains `filter`.
    ///
    /// An empty filter matches every row.
    pub fn matching_indices(&self, filter: &str, out: &mut Vec<usize>) {
        out.clear();
        if filter.is_empty() {
            out.extend(0..self.samples.len());
            return;
        }
        let needle = filter.to_lowercase();
        out.extend(
            self.samples
                .iter()
                .enumerate()
                .filter(|(_, s)| {
                    s.id.to_lowercase().contains(&needle)
                        || s.display_name.to_lowercase().contains(&needle)
                        || s.category.to_lowercase().contains(&needle)
                })
                .map(|(idx, _)| idx),
        );
    }
}
