use std::io::{self, Write};

use crate::context::AppContext;
use crate::render;

const PAGES: [(&str, &str); 5] = [
    ("Ringkasan Analisis", "Memberikan ringkasan statistik dan key insights dari keseluruhan data ulasan."),
    ("Analisis Topik", "Menyelami topik-topik spesifik, lengkap dengan word cloud dan distribusi sentimen per topik."),
    ("Analisis Sentimen", "Visualisasi distribusi sentimen secara keseluruhan dan berdasarkan skor kepercayaan model."),
    ("Tabel Ulasan", "Memungkinkan Anda untuk mencari, memfilter, dan melihat data ulasan mentah secara detail."),
    ("Demo & Evaluasi", "Mencoba demo interaktif model dan melihat metrik evaluasi kinerjanya."),
];

const COMMANDS: [&str; 5] = ["overview", "topics", "sentiment", "reviews", "demo"];

/// Welcome page.
#[derive(Clone, Debug, PartialEq)]
pub struct AboutView {
    pub review_count: Option<usize>,
    pub data_file: String,
}

impl AboutView {
    pub fn build(context: &AppContext) -> Self {
        Self {
            review_count: context.non_empty_reviews().map(|table| table.len()),
            data_file: context.data_file_name(),
        }
    }

    pub fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        render::title(out, "Selamat Datang di SentimenSignal Dashboard")?;
        writeln!(out, "Platform untuk menganalisis sentimen dan mengekstrak topik utama dari ulasan pengguna secara otomatis.")?;

        render::header(out, "Tentang Dashboard Ini")?;
        writeln!(
            out,
            "Dashboard ini mengklasifikasikan sentimen ulasan (Positif, Negatif, Netral) dan \
             mengidentifikasi topik yang paling sering dibicarakan oleh pengguna."
        )?;

        render::header(out, "Sumber Data")?;
        match self.review_count {
            Some(count) => render::info(
                out,
                &format!("Analisis ini didasarkan pada {} ulasan yang telah diproses.", render::thousands(count)),
            )?,
            None => render::error(
                out,
                &format!(
                    "Data ulasan tidak dapat dimuat. Pastikan file `{}` ada di direktori utama.",
                    self.data_file
                ),
            )?,
        }

        render::header(out, "Bagaimana Cara Menggunakan Dashboard Ini?")?;
        for (i, ((name, description), command)) in PAGES.iter().zip(COMMANDS).enumerate() {
            writeln!(out, "{}. {} (`{}`): {}", i + 1, name, command, description)?;
        }
        Ok(())
    }
}

pub fn run(context: &AppContext, out: &mut dyn Write) -> io::Result<()> {
    AboutView::build(context).render(out)
}
