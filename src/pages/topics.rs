use std::collections::HashMap;
use std::io::{self, Write};

use crate::context::AppContext;
use crate::data::{Review, ReviewFilter, ReviewTable, Sentiment};
use crate::render;

pub const NO_DATA: &str = "Data tidak tersedia. Tidak dapat menampilkan analisis topik.";
const CLOUD_WORDS: usize = 30;
const EXAMPLES: usize = 10;

/// Word frequencies over `text`, most frequent first, ties alphabetical.
///
/// Words are lowercased runs of letters and digits, at least two long.
pub fn word_frequencies(text: &str, limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= 2)
    {
        *counts.entry(word.to_lowercase()).or_insert(0) += 1;
    }
    let mut words: Vec<(String, usize)> = counts.into_iter().collect();
    words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    words.truncate(limit);
    words
}

/// One topic in depth.
#[derive(Clone, Debug, PartialEq)]
pub struct TopicView {
    pub topic: String,
    pub word_cloud: Vec<(String, usize)>,
    pub sentiment_share: Vec<(Sentiment, f64)>,
    pub examples: Vec<Review>,
}

impl TopicView {
    /// View for `topic`, or the first topic seen when `None`.
    /// `None` when the topic has no reviews.
    pub fn build(table: &ReviewTable, topic: Option<&str>) -> Option<Self> {
        let topic = match topic {
            Some(topic) => topic.to_string(),
            None => table.unique_topics().into_iter().next()?,
        };
        let rows = table.filter(&ReviewFilter::default().with_topic(topic.clone()));
        if rows.is_empty() {
            return None;
        }

        let cloud_text = rows.reviews().iter().map(Review::topic_text).collect::<Vec<_>>().join(" ");
        Some(Self {
            word_cloud: word_frequencies(&cloud_text, CLOUD_WORDS),
            sentiment_share: rows.sentiment_share(),
            examples: rows.reviews().iter().take(EXAMPLES).cloned().collect(),
            topic,
        })
    }

    pub fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        render::title(out, "Analisis Topik Mendalam")?;
        writeln!(out, "Jelajahi topik-topik yang paling sering dibicarakan oleh pengguna dan sentimen yang terkait.")?;

        render::header(out, &format!("Word Cloud untuk Topik: '{}'", self.topic))?;
        if self.word_cloud.is_empty() {
            render::info(out, "Tidak ada kata kunci yang cukup untuk membuat Word Cloud pada topik ini.")?;
        } else {
            let rows: Vec<(String, f64)> = self.word_cloud.iter().map(|(w, n)| (w.clone(), *n as f64)).collect();
            render::bar_chart(out, &rows, |v| (v as usize).to_string())?;
        }

        render::header(out, &format!("Sentimen di Topik \"{}\"", self.topic))?;
        let rows: Vec<(String, f64)> = self.sentiment_share.iter().map(|(s, p)| (s.to_string(), *p)).collect();
        render::bar_chart(out, &rows, |p| format!("{:.1}%", p))?;

        render::header(out, "Contoh Ulasan Terkait")?;
        let rows: Vec<Vec<String>> = self
            .examples
            .iter()
            .map(|r| vec![r.text.clone(), r.sentiment.to_string(), r.detail.clone()])
            .collect();
        render::table(out, &["ulasan_lengkap", "sentimen", "detail_topik"], &rows)
    }
}

pub fn run(context: &AppContext, topic: Option<&str>, out: &mut dyn Write) -> io::Result<()> {
    let Some(table) = context.non_empty_reviews() else {
        return render::warning(out, NO_DATA);
    };
    match TopicView::build(&table, topic) {
        Some(view) => view.render(out),
        None => {
            render::warning(out, &format!("Topik '{}' tidak ditemukan dalam data.", topic.unwrap_or_default()))?;
            writeln!(out, "Topik yang tersedia:")?;
            for name in table.unique_topics() {
                writeln!(out, "  - {}", name)?;
            }
            Ok(())
        }
    }
}
