use std::io::{self, Write};

use crate::context::AppContext;
use crate::data::{ReviewFilter, ReviewTable};
use crate::render;

pub const NO_DATA: &str = "Data tidak tersedia. Tidak dapat menampilkan tabel ulasan.";

/// Filtered slice of the review table.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewsView {
    pub total: usize,
    pub selection: ReviewTable,
    pub limit: Option<usize>,
}

impl ReviewsView {
    pub fn build(table: &ReviewTable, filter: &ReviewFilter, limit: Option<usize>) -> Self {
        Self { total: table.len(), selection: table.filter(filter), limit }
    }

    pub fn summary(&self) -> String {
        format!(
            "Menampilkan {} dari {} total ulasan berdasarkan filter Anda.",
            self.selection.len(),
            self.total
        )
    }

    pub fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        render::title(out, "Explorer Data Ulasan")?;
        writeln!(out, "Cari, filter, dan lihat detail setiap ulasan yang telah dianalisis.")?;
        writeln!(out)?;
        render::info(out, &self.summary())?;

        let mut headers = vec!["ulasan_lengkap", "sentimen", "deskripsi_topik", "detail_topik"];
        if self.selection.has_confidence() {
            headers.push("Skor Kepercayaan");
        }
        let shown = self.limit.unwrap_or(self.selection.len());
        let rows: Vec<Vec<String>> = self
            .selection
            .reviews()
            .iter()
            .take(shown)
            .map(|r| {
                let mut row = vec![r.text.clone(), r.sentiment.to_string(), r.topic.clone(), r.detail.clone()];
                if self.selection.has_confidence() {
                    row.push(match r.confidence {
                        Some(score) => format!("{} {:.2}", render::progress(score, 10), score),
                        None => String::new(),
                    });
                }
                row
            })
            .collect();
        render::table(out, &headers, &rows)
    }
}

pub fn run(context: &AppContext, filter: &ReviewFilter, limit: Option<usize>, out: &mut dyn Write) -> io::Result<()> {
    match context.non_empty_reviews() {
        Some(table) => ReviewsView::build(&table, filter, limit).render(out),
        None => render::warning(out, NO_DATA),
    }
}
