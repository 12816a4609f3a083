use std::io::{self, Write};

use crate::context::AppContext;
use crate::data::{ReviewTable, Sentiment};
use crate::render;

pub const NO_DATA: &str = "Data tidak tersedia. Tidak dapat menampilkan ringkasan. Silakan periksa file data Anda.";
const TOP_TOPICS: usize = 10;

/// Headline metrics and charts over the whole dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct OverviewView {
    pub total: usize,
    /// Positif, Netral, Negatif, always all three.
    pub sentiment_counts: Vec<(Sentiment, usize)>,
    /// Present sentiments, largest first.
    pub distribution: Vec<(Sentiment, usize)>,
    pub top_topics: Vec<(String, usize)>,
}

impl OverviewView {
    pub fn build(table: &ReviewTable) -> Self {
        Self {
            total: table.len(),
            sentiment_counts: Sentiment::ALL.iter().map(|&s| (s, table.sentiment_count(s))).collect(),
            distribution: table.count_by_sentiment(),
            top_topics: table.top_topics(TOP_TOPICS),
        }
    }

    pub fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        render::title(out, "Ringkasan Analisis Keseluruhan")?;
        writeln!(out, "Halaman ini menyajikan gambaran umum dari data ulasan yang dianalisis.")?;

        render::header(out, "Metrik Utama")?;
        render::metric(out, "Total Ulasan", &render::thousands(self.total), None)?;
        for &(sentiment, count) in &self.sentiment_counts {
            let share = if self.total > 0 { count as f64 / self.total as f64 } else { 0.0 };
            let delta = match sentiment {
                Sentiment::Negatif => format!("-{}", render::percent(share, 1)),
                _ => render::percent(share, 1),
            };
            render::metric(out, &format!("Sentimen {}", sentiment), &render::thousands(count), Some(&delta))?;
        }

        render::header(out, "Distribusi Sentimen")?;
        let rows: Vec<(String, f64)> = self
            .distribution
            .iter()
            .map(|(s, n)| (s.to_string(), *n as f64))
            .collect();
        let total = self.total.max(1) as f64;
        render::bar_chart(out, &rows, |v| format!("{} ({})", v as usize, render::percent(v / total, 1)))?;

        render::header(out, "Top 10 Topik yang Paling Sering Muncul")?;
        let rows: Vec<(String, f64)> = self.top_topics.iter().map(|(t, n)| (t.clone(), *n as f64)).collect();
        render::bar_chart(out, &rows, |v| (v as usize).to_string())
    }
}

pub fn run(context: &AppContext, out: &mut dyn Write) -> io::Result<()> {
    match context.non_empty_reviews() {
        Some(table) => OverviewView::build(&table).render(out),
        None => render::warning(out, NO_DATA),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Review;

    fn review(sentiment: Sentiment, topic: &str) -> Review {
        Review {
            text: "ulasan".to_string(),
            sentiment,
            topic_id: None,
            topic: topic.to_string(),
            detail: String::new(),
            confidence: None,
            fragment: "ulasan".to_string(),
        }
    }

    #[test]
    fn test_counts_include_absent_sentiment() {
        let table = ReviewTable::new(
            vec![review(Sentiment::Positif, "A"), review(Sentiment::Positif, "B"), review(Sentiment::Negatif, "A")],
            false,
        );
        let view = OverviewView::build(&table);
        assert_eq!(view.total, 3);
        assert_eq!(view.sentiment_counts[1], (Sentiment::Netral, 0));
        assert_eq!(view.distribution.len(), 2);
        assert_eq!(view.top_topics[0], ("A".to_string(), 2));

        let mut out = Vec::new();
        view.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Sentimen Negatif"));
        assert!(text.contains("(-33.3%)"));
    }
}
