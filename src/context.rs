//! Application configuration and the state shared by every page.

use clap::Args;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{error, info, warn};

use crate::data::{ReviewCache, ReviewTable};
use crate::inference::{Analyzer, SentimentEngine, TopicEngine};
use crate::preprocessing::Preprocessor;

pub const DEFAULT_DATA_FILE: &str = "hasil_terstruktur_diperbaiki.csv";
pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// File locations, from flags or the environment.
#[derive(Args, Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Review CSV with the analysis results
    #[arg(long, env = "SENTIMEN_DATA", default_value = DEFAULT_DATA_FILE, global = true)]
    pub data: PathBuf,

    /// Directory holding models, reports and the normalization dictionary
    #[arg(long, env = "SENTIMEN_ASSETS", default_value = DEFAULT_ASSETS_DIR, global = true)]
    pub assets: PathBuf,

    /// Extra root words for the stemmer, one per line.
    ///
    /// The built-in list only covers a few hundred roots common in app
    /// reviews. Words whose root is missing are left unstemmed, so pass the
    /// full Indonesian root-word list (`kata-dasar.txt`) to stem general text.
    #[arg(long, env = "SENTIMEN_ROOT_WORDS", global = true)]
    pub root_words: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: PathBuf::from(DEFAULT_DATA_FILE),
            assets: PathBuf::from(DEFAULT_ASSETS_DIR),
            root_words: None,
        }
    }
}

impl AppConfig {
    pub fn normalization_path(&self) -> PathBuf {
        self.assets.join("kamuskatabaku.csv")
    }

    pub fn models_dir(&self) -> PathBuf {
        self.assets.join("models")
    }

    pub fn sentiment_model_path(&self) -> PathBuf {
        self.models_dir().join("model_sentimen_lstm.json")
    }

    pub fn tokenizer_path(&self) -> PathBuf {
        self.models_dir().join("tokenizer.json")
    }

    pub fn label_encoder_path(&self) -> PathBuf {
        self.models_dir().join("label_encoder.json")
    }

    pub fn lda_model_path(&self) -> PathBuf {
        self.models_dir().join("model_lda_terbaik_12topik.json")
    }

    pub fn lda_dictionary_path(&self) -> PathBuf {
        self.models_dir().join("model_lda_terbaik_12topik.dict.json")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.assets.join("reports")
    }

    pub fn report_path(&self, name: &str) -> PathBuf {
        self.reports_dir().join(name)
    }

    /// Confusion matrix of the baseline model.
    pub fn baseline_matrix_image(&self) -> PathBuf {
        self.assets.join("image_6737bc.png")
    }

    /// Confusion matrix of the stacked BiLSTM model.
    pub fn optimized_matrix_image(&self) -> PathBuf {
        self.assets.join("image_673b45.png")
    }

    pub fn lda_visualization_path(&self) -> PathBuf {
        self.assets.join("lda_visualization.html")
    }
}

/// Loaded assets plus the dataset cache, created once at startup.
#[derive(Debug)]
pub struct AppContext {
    config: AppConfig,
    reviews: ReviewCache,
    analyzer: Option<Analyzer>,
    asset_errors: Vec<String>,
}

impl AppContext {
    /// Load every asset in order: pre-processing, sentiment model, topic
    /// model, dataset. A failed asset is reported and disables the demo.
    pub fn initialize(config: AppConfig) -> Self {
        let mut asset_errors = Vec::new();

        let preprocessor = Preprocessor::load(&config.normalization_path(), config.root_words.as_deref())
            .map_err(|e| {
                error!("failed to load pre-processing assets: {}", e);
                asset_errors.push(format!("Gagal memuat aset pra-pemrosesan: {}", e));
            })
            .ok();

        let sentiment = SentimentEngine::load(
            &config.sentiment_model_path(),
            &config.tokenizer_path(),
            &config.label_encoder_path(),
        )
        .map_err(|e| {
            error!("failed to load sentiment model: {}", e);
            asset_errors.push(format!("Gagal memuat model sentimen dari '{}': {}", config.assets.display(), e));
        })
        .ok();

        let topic = TopicEngine::load(&config.lda_model_path(), &config.lda_dictionary_path())
            .map_err(|e| {
                error!("failed to load topic model: {}", e);
                asset_errors.push(format!(
                    "Gagal memuat model LDA 12 topik dari '{}': {}",
                    config.models_dir().display(),
                    e
                ));
            })
            .ok();

        let analyzer = match (preprocessor, sentiment, topic) {
            (Some(preprocessor), Some(sentiment), Some(topic)) => Some(Analyzer { preprocessor, sentiment, topic }),
            _ => {
                warn!("interactive analysis disabled for this session");
                None
            }
        };

        let context = Self { config, reviews: ReviewCache::new(), analyzer, asset_errors };
        if let Some(table) = context.reviews() {
            info!(reviews = table.len(), "dashboard ready");
        }
        context
    }

    /// Context with pre-built parts, for embedding and tests.
    pub fn with_parts(config: AppConfig, analyzer: Option<Analyzer>) -> Self {
        Self { config, reviews: ReviewCache::new(), analyzer, asset_errors: Vec::new() }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The configured dataset, loaded on first use.
    pub fn reviews(&self) -> Option<Rc<ReviewTable>> {
        self.reviews.get(&self.config.data)
    }

    /// The dataset when it loaded and has rows.
    pub fn non_empty_reviews(&self) -> Option<Rc<ReviewTable>> {
        self.reviews().filter(|table| !table.is_empty())
    }

    pub fn analyzer(&self) -> Option<&Analyzer> {
        self.analyzer.as_ref()
    }

    pub fn asset_errors(&self) -> &[String] {
        &self.asset_errors
    }

    pub fn data_file_name(&self) -> String {
        file_name(&self.config.data)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = AppConfig::default();
        assert_eq!(config.data, PathBuf::from("hasil_terstruktur_diperbaiki.csv"));
        assert_eq!(config.normalization_path(), PathBuf::from("assets/kamuskatabaku.csv"));
        assert_eq!(
            config.lda_dictionary_path(),
            PathBuf::from("assets/models/model_lda_terbaik_12topik.dict.json")
        );
        assert_eq!(config.report_path("lda_report.txt"), PathBuf::from("assets/reports/lda_report.txt"));
    }

    #[test]
    fn test_missing_assets_disable_demo() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data: dir.path().join("none.csv"),
            assets: dir.path().to_path_buf(),
            root_words: None,
        };
        let context = AppContext::initialize(config);
        assert!(context.analyzer().is_none());
        assert_eq!(context.asset_errors().len(), 3);
        assert!(context.reviews().is_none());
    }
}
