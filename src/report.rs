//! Evaluation report files: verbatim reading and LDA report scraping.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Prefix of the text returned for a missing file.
pub const FILE_NOT_FOUND: &str = "File tidak ditemukan";

const KEYWORDS_START: &str = "Topik yang ditemukan oleh model terbaik (hanya keywords):";
const KEYWORDS_END: &str = "Topik yang ditemukan (dengan format asli";

static COHERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Skor Koherensi \(C_v\) Tertinggi: ([\d.]+)").expect("coherence pattern"));
static OPTIMAL_TOPICS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Jumlah Topik Optimal: (\d+)").expect("topic count pattern"));
static ALPHA: Lazy<Regex> = Lazy::new(|| Regex::new(r"- Alpha: ([\d\w.]+)").expect("alpha pattern"));
static ETA: Lazy<Regex> = Lazy::new(|| Regex::new(r"- Eta: ([\d\w.]+)").expect("eta pattern"));

/// Values scraped from the LDA tuning report. Absent fields did not match.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EvaluationReport {
    pub coherence_score: Option<f64>,
    pub optimal_topics: Option<u32>,
    pub alpha: Option<String>,
    pub eta: Option<String>,
    /// Topic name → keywords, in report order.
    pub topics: Option<Vec<(String, Vec<String>)>>,
}

impl EvaluationReport {
    /// Parse a report. Empty text or a missing-file sentinel gives an empty report.
    pub fn parse(text: &str) -> Self {
        if text.is_empty() || text.contains(FILE_NOT_FOUND) {
            return Self::default();
        }

        Self {
            coherence_score: capture(&COHERENCE, text).and_then(|v| v.parse().ok()),
            optimal_topics: capture(&OPTIMAL_TOPICS, text).and_then(|v| v.parse().ok()),
            alpha: capture(&ALPHA, text),
            eta: capture(&ETA, text),
            topics: parse_topic_keywords(text),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn parse_topic_keywords(text: &str) -> Option<Vec<(String, Vec<String>)>> {
    let start = text.find(KEYWORDS_START)? + KEYWORDS_START.len();
    // the section runs to the last end marker, as a greedy match would
    let end = text.rfind(KEYWORDS_END)?;
    if end < start {
        return None;
    }

    // a repeated name keeps its first position and its last keywords
    let mut topics: Vec<(String, Vec<String>)> = Vec::new();
    for line in text[start..end].trim().lines() {
        let mut parts = line.split(": ");
        let (Some(name), Some(keywords)) = (parts.next(), parts.next()) else {
            continue;
        };
        let name = name.trim().to_string();
        let keywords: Vec<String> = keywords.split(',').map(|kw| kw.trim().to_string()).collect();
        match topics.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = keywords,
            None => topics.push((name, keywords)),
        }
    }
    Some(topics)
}

/// File contents, or a sentinel line describing why they are unavailable.
pub fn load_text_file(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => format!("{}: {}", FILE_NOT_FOUND, path.display()),
        Err(e) => format!("Gagal membaca file: {} ({})", path.display(), e),
    }
}
