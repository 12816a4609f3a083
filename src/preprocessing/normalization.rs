use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use super::AssetError;

/// Column holding the informal spelling.
pub const INFORMAL_COLUMN: &str = "tidak_baku";
/// Column holding the canonical spelling.
pub const CANONICAL_COLUMN: &str = "kata_baku";

/// Informal/slang token → canonical token.
#[derive(Debug, Clone, Default)]
pub struct NormalizationDictionary {
    entries: HashMap<String, String>,
}

impl NormalizationDictionary {
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Load from a CSV with `tidak_baku` and `kata_baku` columns.
    ///
    /// Later rows override earlier ones for the same informal term.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| AssetError::Csv { path: path.to_path_buf(), source: e })?;

        let headers = reader
            .headers()
            .map_err(|e| AssetError::Csv { path: path.to_path_buf(), source: e })?
            .clone();
        let column = |name: &str| {
            headers.iter().position(|h| h == name).ok_or_else(|| AssetError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })
        };
        let informal = column(INFORMAL_COLUMN)?;
        let canonical = column(CANONICAL_COLUMN)?;

        let mut entries = HashMap::new();
        for record in reader.records() {
            let record = record.map_err(|e| AssetError::Csv { path: path.to_path_buf(), source: e })?;
            if let (Some(from), Some(to)) = (record.get(informal), record.get(canonical)) {
                if !from.is_empty() {
                    entries.insert(from.to_string(), to.to_string());
                }
            }
        }

        info!(entries = entries.len(), path = %path.display(), "loaded normalization dictionary");
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    /// Replace known tokens and rejoin with single spaces.
    pub fn apply(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|word| self.get(word).unwrap_or(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
