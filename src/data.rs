//! Pre-labeled review dataset: loading, caching and table queries.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::str::FromStr;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::topic::topic_id_for_label;

pub const TEXT_COLUMN: &str = "ulasan_lengkap";
pub const SENTIMENT_COLUMN: &str = "sentimen";
pub const TOPIC_COLUMN: &str = "deskripsi_topik";
pub const DETAIL_COLUMN: &str = "detail_topik";
pub const CONFIDENCE_COLUMN: &str = "confidence_score";
pub const LEGACY_CONFIDENCE_COLUMN: &str = "skor_sentimen";
pub const FRAGMENT_COLUMN: &str = "pecahan_kalimat";
pub const TOPIC_ID_COLUMN: &str = "id_topik";

const REQUIRED_COLUMNS: [&str; 4] = [TEXT_COLUMN, SENTIMENT_COLUMN, TOPIC_COLUMN, DETAIL_COLUMN];

/// Errors raised while reading the review CSV.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("data file not found: {0}")]
    NotFound(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(String),
}

/// One of the three sentiment classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sentiment {
    Positif,
    Netral,
    Negatif,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positif, Sentiment::Netral, Sentiment::Negatif];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positif => "Positif",
            Sentiment::Netral => "Netral",
            Sentiment::Negatif => "Negatif",
        }
    }

    /// Chart color.
    pub fn color(&self) -> &'static str {
        match self {
            Sentiment::Positif => "#28a745",
            Sentiment::Netral => "#ffc107",
            Sentiment::Negatif => "#dc3545",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Positif" => Ok(Sentiment::Positif),
            "Netral" => Ok(Sentiment::Netral),
            "Negatif" => Ok(Sentiment::Negatif),
            other => Err(format!("unknown sentiment '{}'", other)),
        }
    }
}

/// A single analyzed review.
#[derive(Clone, Debug, PartialEq)]
pub struct Review {
    pub text: String,
    pub sentiment: Sentiment,
    pub topic_id: Option<usize>,
    pub topic: String,
    pub detail: String,
    pub confidence: Option<f64>,
    pub fragment: String,
}

impl Review {
    /// Topic description and detail joined, the word cloud source.
    pub fn topic_text(&self) -> String {
        format!("{}, {}", self.topic, self.detail)
    }
}

/// Row filter for the review table. `None` means no restriction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReviewFilter {
    pub sentiment: Option<Sentiment>,
    pub topic: Option<String>,
    pub search: Option<String>,
}

impl ReviewFilter {
    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = if search.is_empty() { None } else { Some(search) };
        self
    }

    pub fn matches(&self, review: &Review) -> bool {
        if let Some(sentiment) = self.sentiment {
            if review.sentiment != sentiment {
                return false;
            }
        }
        if let Some(topic) = &self.topic {
            if &review.topic != topic {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !review.text.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// In-memory review table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReviewTable {
    reviews: Vec<Review>,
    has_confidence: bool,
}

impl ReviewTable {
    pub fn new(reviews: Vec<Review>, has_confidence: bool) -> Self {
        Self { reviews, has_confidence }
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Whether the source had a confidence column.
    pub fn has_confidence(&self) -> bool {
        self.has_confidence
    }

    pub fn sentiment_count(&self, sentiment: Sentiment) -> usize {
        self.reviews.iter().filter(|r| r.sentiment == sentiment).count()
    }

    /// Counts per present sentiment, largest first.
    pub fn count_by_sentiment(&self) -> Vec<(Sentiment, usize)> {
        let mut counts: Vec<(Sentiment, usize)> = Sentiment::ALL
            .iter()
            .map(|&s| (s, self.sentiment_count(s)))
            .filter(|&(_, n)| n > 0)
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    /// Percentage of each present sentiment; sums to 100 when non-empty.
    pub fn sentiment_share(&self) -> Vec<(Sentiment, f64)> {
        let total = self.len() as f64;
        self.count_by_sentiment()
            .into_iter()
            .map(|(s, n)| (s, n as f64 / total * 100.0))
            .collect()
    }

    /// The `n` most frequent topic descriptions, ties in first-seen order.
    pub fn top_topics(&self, n: usize) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for review in &self.reviews {
            match positions.get(review.topic.as_str()) {
                Some(&pos) => counts[pos].1 += 1,
                None => {
                    positions.insert(review.topic.as_str(), counts.len());
                    counts.push((review.topic.clone(), 1));
                }
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(n);
        counts
    }

    pub fn unique_sentiments(&self) -> Vec<Sentiment> {
        let mut seen = Vec::new();
        for review in &self.reviews {
            if !seen.contains(&review.sentiment) {
                seen.push(review.sentiment);
            }
        }
        seen
    }

    /// Topic descriptions in first-seen order.
    pub fn unique_topics(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for review in &self.reviews {
            if !seen.iter().any(|t| t == &review.topic) {
                seen.push(review.topic.clone());
            }
        }
        seen
    }

    pub fn filter(&self, filter: &ReviewFilter) -> ReviewTable {
        ReviewTable {
            reviews: self.reviews.iter().filter(|r| filter.matches(r)).cloned().collect(),
            has_confidence: self.has_confidence,
        }
    }

    /// Equal-width confidence bins over [0, 1] for one sentiment.
    ///
    /// `None` when the table has no confidence column. A score of exactly
    /// 1.0 lands in the last bin.
    pub fn confidence_histogram(&self, sentiment: Sentiment, bins: usize) -> Option<Vec<usize>> {
        if !self.has_confidence || bins == 0 {
            return None;
        }
        let mut counts = vec![0; bins];
        for review in self.reviews.iter().filter(|r| r.sentiment == sentiment) {
            if let Some(score) = review.confidence {
                let bin = ((score * bins as f64) as usize).min(bins - 1);
                counts[bin] += 1;
            }
        }
        Some(counts)
    }
}

struct ColumnIndex {
    text: usize,
    sentiment: usize,
    topic: usize,
    detail: usize,
    confidence: Option<usize>,
    fragment: Option<usize>,
    topic_id: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, DataError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| find(name).ok_or_else(|| DataError::MissingColumn(name.to_string()));

        for name in REQUIRED_COLUMNS {
            require(name)?;
        }

        let confidence = match (find(CONFIDENCE_COLUMN), find(LEGACY_CONFIDENCE_COLUMN)) {
            (Some(canonical), Some(_)) => {
                warn!("both '{}' and '{}' present, using '{}'", CONFIDENCE_COLUMN, LEGACY_CONFIDENCE_COLUMN, CONFIDENCE_COLUMN);
                Some(canonical)
            }
            (canonical, legacy) => canonical.or(legacy),
        };

        Ok(Self {
            text: require(TEXT_COLUMN)?,
            sentiment: require(SENTIMENT_COLUMN)?,
            topic: require(TOPIC_COLUMN)?,
            detail: require(DETAIL_COLUMN)?,
            confidence,
            fragment: find(FRAGMENT_COLUMN),
            topic_id: find(TOPIC_ID_COLUMN),
        })
    }
}

fn parse_row(record: &csv::StringRecord, columns: &ColumnIndex) -> Result<Review, String> {
    let field = |idx: usize| record.get(idx).unwrap_or("").to_string();

    let sentiment: Sentiment = field(columns.sentiment).parse()?;

    let confidence = match columns.confidence.map(field) {
        Some(raw) if !raw.trim().is_empty() => {
            let score: f64 = raw.trim().parse().map_err(|_| format!("unparsable confidence '{}'", raw))?;
            if !(0.0..=1.0).contains(&score) {
                return Err(format!("confidence {} outside [0, 1]", score));
            }
            Some(score)
        }
        _ => None,
    };

    let text = field(columns.text);
    let topic = field(columns.topic);
    let topic_id = columns
        .topic_id
        .and_then(|idx| record.get(idx))
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .or_else(|| topic_id_for_label(&topic));
    let fragment = columns
        .fragment
        .map(field)
        .unwrap_or_else(|| text.clone());

    Ok(Review {
        text,
        sentiment,
        topic_id,
        topic,
        detail: field(columns.detail),
        confidence,
        fragment,
    })
}

/// Read and validate the review CSV.
///
/// Rows with an unknown sentiment or an invalid confidence are skipped
/// with a warning.
pub fn load_reviews(path: &Path) -> Result<ReviewTable, DataError> {
    if !path.exists() {
        return Err(DataError::NotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_path(path)?;
    let columns = ColumnIndex::from_headers(reader.headers()?)?;

    let mut reviews = Vec::new();
    let mut skipped = 0;
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        match parse_row(&record, &columns) {
            Ok(review) => reviews.push(review),
            Err(reason) => {
                skipped += 1;
                warn!(row = line + 1, %reason, "skipping review row");
            }
        }
    }

    info!(rows = reviews.len(), skipped, path = %path.display(), "loaded reviews");
    Ok(ReviewTable::new(reviews, columns.confidence.is_some()))
}

/// [`load_reviews`] that logs failures instead of returning them.
pub fn load_data(path: &Path) -> Option<ReviewTable> {
    match load_reviews(path) {
        Ok(table) => Some(table),
        Err(DataError::NotFound(missing)) => {
            let absolute = std::env::current_dir().map(|cwd| cwd.join(&missing)).unwrap_or(missing);
            error!(path = %absolute.display(), "data file not found");
            None
        }
        Err(e) => {
            error!(path = %path.display(), "failed to load data: {}", e);
            None
        }
    }
}

/// Loads each dataset path at most once.
#[derive(Debug, Default)]
pub struct ReviewCache {
    tables: RefCell<HashMap<PathBuf, Option<Rc<ReviewTable>>>>,
}

impl ReviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached table for `path`; a failed load is cached too.
    pub fn get(&self, path: &Path) -> Option<Rc<ReviewTable>> {
        if let Some(cached) = self.tables.borrow().get(path) {
            return cached.clone();
        }
        let loaded = load_data(path).map(Rc::new);
        self.tables.borrow_mut().insert(path.to_path_buf(), loaded.clone());
        loaded
    }

    pub fn is_cached(&self, path: &Path) -> bool {
        self.tables.borrow().contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(text: &str, sentiment: Sentiment, topic: &str) -> Review {
        Review {
            text: text.to_string(),
            sentiment,
            topic_id: topic_id_for_label(topic),
            topic: topic.to_string(),
            detail: "detail".to_string(),
            confidence: Some(0.9),
            fragment: text.to_string(),
        }
    }

    fn table() -> ReviewTable {
        ReviewTable::new(
            vec![
                review("Bayar pajak mudah", Sentiment::Positif, "Pembayaran Pajak Kendaraan"),
                review("Antri lama di kantor", Sentiment::Negatif, "Urusan di Kantor Samsat"),
                review("Pajak lunas", Sentiment::Positif, "Pembayaran Pajak Kendaraan"),
                review("Biasa saja", Sentiment::Netral, "Urusan di Kantor Samsat"),
                review("Kurir telat", Sentiment::Negatif, "Pengiriman Dokumen Fisik"),
                review("Pajak beres", Sentiment::Positif, "Pengiriman Dokumen Fisik"),
            ],
            true,
        )
    }

    #[test]
    fn test_sentiment_parse() {
        assert_eq!(" Netral ".parse::<Sentiment>(), Ok(Sentiment::Netral));
        assert!("positif".parse::<Sentiment>().is_err());
    }

    #[test]
    fn test_counts_and_share() {
        let t = table();
        assert_eq!(
            t.count_by_sentiment(),
            vec![(Sentiment::Positif, 3), (Sentiment::Negatif, 2), (Sentiment::Netral, 1)]
        );
        let total: f64 = t.sentiment_share().iter().map(|(_, p)| p).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_topics_ties_keep_first_seen() {
        let top = table().top_topics(2);
        assert_eq!(
            top,
            vec![
                ("Pembayaran Pajak Kendaraan".to_string(), 2),
                ("Urusan di Kantor Samsat".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_filters_commute() {
        let t = table();
        let by_sentiment = ReviewFilter::default().with_sentiment(Sentiment::Positif);
        let by_search = ReviewFilter::default().with_search("PAJAK");
        let a = t.filter(&by_sentiment).filter(&by_search);
        let b = t.filter(&by_search).filter(&by_sentiment);
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_histogram_last_bin_is_closed() {
        let mut reviews = table().reviews().to_vec();
        reviews[0].confidence = Some(1.0);
        reviews[2].confidence = Some(0.0);
        let t = ReviewTable::new(reviews, true);
        let bins = t.confidence_histogram(Sentiment::Positif, 10).unwrap();
        assert_eq!(bins.iter().sum::<usize>(), 3);
        assert_eq!(bins[0], 1);
        assert_eq!(bins[9], 2);
    }
}
