use std::io::{self, Write};

use crate::context::AppContext;
use crate::data::{ReviewFilter, ReviewTable, Sentiment};
use crate::render;

pub const NO_DATA: &str = "Data tidak tersedia. Tidak dapat menampilkan analisis sentimen.";
pub const HISTOGRAM_BINS: usize = 10;
const TOP_TOPICS: usize = 10;

/// Sentiment breakdown with confidence histograms.
#[derive(Clone, Debug, PartialEq)]
pub struct SentimentView {
    pub counts: Vec<(Sentiment, usize)>,
    /// `None` when the dataset has no confidence column.
    pub histograms: Option<Vec<(Sentiment, Vec<usize>)>>,
    pub selected: Sentiment,
    pub top_topics: Vec<(String, usize)>,
}

impl SentimentView {
    pub fn build(table: &ReviewTable, selected: Sentiment) -> Self {
        let histograms = table.has_confidence().then(|| {
            table
                .unique_sentiments()
                .into_iter()
                .filter_map(|s| table.confidence_histogram(s, HISTOGRAM_BINS).map(|bins| (s, bins)))
                .collect()
        });
        let top_topics = table
            .filter(&ReviewFilter::default().with_sentiment(selected))
            .top_topics(TOP_TOPICS);
        Self { counts: table.count_by_sentiment(), histograms, selected, top_topics }
    }

    pub fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        render::title(out, "Analisis Sentimen Detail")?;
        writeln!(out, "Visualisasi distribusi sentimen dan analisis berdasarkan skor kepercayaan model.")?;

        render::header(out, "Jumlah Ulasan per Kategori Sentimen")?;
        let rows: Vec<(String, f64)> = self.counts.iter().map(|(s, n)| (s.to_string(), *n as f64)).collect();
        render::bar_chart(out, &rows, |v| (v as usize).to_string())?;

        render::header(out, "Distribusi Skor Kepercayaan")?;
        match &self.histograms {
            Some(histograms) => {
                for (sentiment, bins) in histograms {
                    writeln!(out, "{} ({})", sentiment, sentiment.color())?;
                    let rows: Vec<(String, f64)> = bins
                        .iter()
                        .enumerate()
                        .map(|(i, &n)| {
                            let low = i as f64 / HISTOGRAM_BINS as f64;
                            let high = (i + 1) as f64 / HISTOGRAM_BINS as f64;
                            (format!("{:.1}-{:.1}", low, high), n as f64)
                        })
                        .collect();
                    render::bar_chart(out, &rows, |v| (v as usize).to_string())?;
                }
            }
            None => render::info(out, "Kolom 'confidence_score' atau 'skor_sentimen' tidak tersedia untuk analisis ini.")?,
        }

        render::header(out, &format!("Topik yang Paling Sering Muncul untuk Sentimen '{}'", self.selected))?;
        if self.top_topics.is_empty() {
            render::info(out, &format!("Tidak ada ulasan dengan sentimen '{}' untuk dianalisis.", self.selected))
        } else {
            let rows: Vec<(String, f64)> = self.top_topics.iter().map(|(t, n)| (t.clone(), *n as f64)).collect();
            render::bar_chart(out, &rows, |v| (v as usize).to_string())
        }
    }
}

pub fn run(context: &AppContext, selected: Sentiment, out: &mut dyn Write) -> io::Result<()> {
    match context.non_empty_reviews() {
        Some(table) => SentimentView::build(&table, selected).render(out),
        None => render::warning(out, NO_DATA),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Review;

    fn review(sentiment: Sentiment, topic: &str, confidence: Option<f64>) -> Review {
        Review {
            text: "teks".to_string(),
            sentiment,
            topic_id: None,
            topic: topic.to_string(),
            detail: String::new(),
            confidence,
            fragment: "teks".to_string(),
        }
    }

    #[test]
    fn test_no_confidence_column() {
        let table = ReviewTable::new(vec![review(Sentiment::Negatif, "A", None)], false);
        let view = SentimentView::build(&table, Sentiment::Positif);
        assert!(view.histograms.is_none());
        assert!(view.top_topics.is_empty());

        let mut out = Vec::new();
        view.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("tidak tersedia untuk analisis ini"));
        assert!(text.contains("Tidak ada ulasan dengan sentimen 'Positif'"));
    }

    #[test]
    fn test_histograms_per_sentiment() {
        let table = ReviewTable::new(
            vec![
                review(Sentiment::Positif, "A", Some(0.95)),
                review(Sentiment::Positif, "B", Some(0.42)),
                review(Sentiment::Negatif, "A", Some(0.05)),
            ],
            true,
        );
        let view = SentimentView::build(&table, Sentiment::Positif);
        let histograms = view.histograms.unwrap();
        assert_eq!(histograms[0].0, Sentiment::Positif);
        assert_eq!(histograms[0].1[9], 1);
        assert_eq!(histograms[0].1[4], 1);
        assert_eq!(histograms[1].1[0], 1);
        assert_eq!(view.top_topics.len(), 2);
    }
}
