use std::io::{self, Write};

use crate::context::{AppConfig, AppContext};
use crate::inference::Analysis;
use crate::report::{load_text_file, EvaluationReport};
use crate::render;

pub const DEFAULT_TEXT: &str =
    "Aplikasinya bagus dan sangat membantu sekali untuk bayar pajak tahunan, jadi tidak usah antri lagi di samsat.";
pub const BLANK_INPUT: &str = "Mohon masukkan kalimat untuk dianalisis.";
pub const DEMO_UNAVAILABLE: &str = "Satu atau lebih model/aset gagal dimuat. Fitur demo interaktif tidak tersedia.";

/// Outcome of the interactive part.
#[derive(Clone, Debug, PartialEq)]
pub enum DemoOutcome {
    Analyzed(Analysis),
    BlankInput,
    /// Asset load errors, in load order.
    Unavailable(Vec<String>),
}

/// Static evaluation of one sentiment model.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelEvaluation {
    pub title: &'static str,
    pub image: String,
    pub image_caption: &'static str,
    pub image_exists: bool,
    pub accuracy: &'static str,
    pub report: String,
    pub training_log: String,
}

/// Interactive analysis plus the static evaluation section.
#[derive(Clone, Debug, PartialEq)]
pub struct DemoView {
    pub input: String,
    pub outcome: DemoOutcome,
    pub baseline: ModelEvaluation,
    pub optimized: ModelEvaluation,
    pub lda: EvaluationReport,
    pub lda_report_raw: String,
    pub visualization: String,
    pub visualization_exists: bool,
    pub show_details: bool,
}

impl DemoView {
    pub fn build(context: &AppContext, text: &str, show_details: bool) -> Self {
        let outcome = match context.analyzer() {
            None => DemoOutcome::Unavailable(context.asset_errors().to_vec()),
            Some(_) if text.trim().is_empty() => DemoOutcome::BlankInput,
            Some(analyzer) => DemoOutcome::Analyzed(analyzer.analyze(text)),
        };

        let config = context.config();
        let lda_report_raw = load_text_file(&config.report_path("lda_report.txt"));
        let visualization = config.lda_visualization_path();
        Self {
            input: text.to_string(),
            outcome,
            baseline: evaluation(config, false),
            optimized: evaluation(config, true),
            lda: EvaluationReport::parse(&lda_report_raw),
            lda_report_raw,
            visualization_exists: visualization.exists(),
            visualization: visualization.display().to_string(),
            show_details,
        }
    }

    pub fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        render::title(out, "Demo Interaktif & Evaluasi Model")?;
        render::header(out, "Demo Analisis Terintegrasi")?;
        self.render_outcome(out)?;

        render::header(out, "Evaluasi Kinerja Model (Statis)")?;
        for evaluation in [&self.baseline, &self.optimized] {
            self.render_evaluation(out, evaluation)?;
        }

        render::header(out, "Analisis Pemodelan Topik (LDA)")?;
        self.render_lda(out)
    }

    fn render_outcome(&self, out: &mut dyn Write) -> io::Result<()> {
        match &self.outcome {
            DemoOutcome::Unavailable(errors) => {
                for e in errors {
                    render::error(out, e)?;
                }
                render::error(out, DEMO_UNAVAILABLE)
            }
            DemoOutcome::BlankInput => render::warning(out, BLANK_INPUT),
            DemoOutcome::Analyzed(analysis) => {
                writeln!(out, "Ulasan: {}", self.input)?;
                render::header(out, "Hasil Analisis Gabungan")?;
                writeln!(out, "Analisis Sentimen (LSTM)")?;
                let label = analysis.sentiment.to_uppercase();
                let marker = match analysis.sentiment.to_lowercase() {
                    s if s.contains("positif") => "+",
                    s if s.contains("negatif") => "-",
                    _ => "~",
                };
                writeln!(out, "  {} {}", marker, label)?;
                writeln!(
                    out,
                    "  Tingkat Keyakinan: {} {}",
                    render::percent(analysis.sentiment_confidence, 2),
                    render::progress(analysis.sentiment_confidence, 20)
                )?;
                writeln!(out, "Analisis Topik (LDA)")?;
                writeln!(out, "  {}", analysis.topic.label)?;
                writeln!(out, "  Kata Kunci: {}", analysis.topic.keywords)
            }
        }
    }

    fn render_evaluation(&self, out: &mut dyn Write, evaluation: &ModelEvaluation) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", evaluation.title)?;
        if evaluation.image_exists {
            writeln!(out, "  {}: {}", evaluation.image_caption, evaluation.image)?;
        } else {
            render::warning(out, &format!("File gambar tidak ditemukan: '{}'.", evaluation.image))?;
        }
        render::metric(out, "Akurasi", evaluation.accuracy, None)?;
        if self.show_details {
            render::code_block(out, &evaluation.report)?;
            render::code_block(out, &evaluation.training_log)?;
        }
        Ok(())
    }

    fn render_lda(&self, out: &mut dyn Write) -> io::Result<()> {
        if self.lda.is_empty() {
            return render::error(out, "File laporan `reports/lda_report.txt` tidak ditemukan atau gagal diparsing.");
        }

        let topics = self.lda.optimal_topics.map_or_else(|| "N/A".to_string(), |n| n.to_string());
        render::metric(out, "Jumlah Topik Optimal", &topics, None)?;
        render::metric(out, "Skor Koherensi (C_v)", &format!("{:.4}", self.lda.coherence_score.unwrap_or(0.0)), None)?;
        render::metric(
            out,
            "Hyperparameter (α / η)",
            &format!(
                "{} / {}",
                self.lda.alpha.as_deref().unwrap_or("N/A"),
                self.lda.eta.as_deref().unwrap_or("N/A")
            ),
            None,
        )?;

        if self.visualization_exists {
            render::info(out, &format!("Visualisasi LDA tersedia di `{}`.", self.visualization))?;
        } else {
            render::warning(out, &format!("File visualisasi tidak ditemukan di `{}`.", self.visualization))?;
        }

        render::header(out, "Rincian Topik yang Ditemukan")?;
        match &self.lda.topics {
            Some(topics) => {
                for (name, keywords) in topics {
                    writeln!(out, "{}", name)?;
                    writeln!(out, "  {}", keywords.join(", "))?;
                }
            }
            None => render::warning(out, "Tidak dapat menampilkan detail topik dari laporan.")?,
        }

        if self.show_details {
            render::header(out, "Log Lengkap Proses Pemodelan LDA")?;
            render::code_block(out, &self.lda_report_raw)?;
        }
        Ok(())
    }
}

fn evaluation(config: &AppConfig, optimized: bool) -> ModelEvaluation {
    let (title, image, caption, accuracy, suffix) = if optimized {
        ("Model Sesudah: Stacked Bi-LSTM", config.optimized_matrix_image(), "Confusion Matrix Model Optimal", "86.56%", "sesudah")
    } else {
        ("Model Sebelum: LSTM Sederhana", config.baseline_matrix_image(), "Confusion Matrix Model Dasar", "71.60%", "sebelum")
    };
    ModelEvaluation {
        title,
        image_exists: image.exists(),
        image: image.display().to_string(),
        image_caption: caption,
        accuracy,
        report: load_text_file(&config.report_path(&format!("report_{}.txt", suffix))),
        training_log: load_text_file(&config.report_path(&format!("training_log_{}.txt", suffix))),
    }
}

pub fn run(context: &AppContext, text: &str, show_details: bool, out: &mut dyn Write) -> io::Result<()> {
    DemoView::build(context, text, show_details).render(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_context(dir: &std::path::Path) -> AppContext {
        let config = AppConfig { data: dir.join("reviews.csv"), assets: dir.to_path_buf(), root_words: None };
        AppContext::with_parts(config, None)
    }

    #[test]
    fn test_unavailable_without_assets() {
        let dir = tempfile::tempdir().unwrap();
        let view = DemoView::build(&empty_context(dir.path()), DEFAULT_TEXT, false);
        assert!(matches!(view.outcome, DemoOutcome::Unavailable(_)));
        assert!(view.lda.is_empty());
        assert!(!view.baseline.image_exists);
        assert!(view.baseline.report.starts_with("File tidak ditemukan: "));

        let mut out = Vec::new();
        view.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(DEMO_UNAVAILABLE));
        assert!(text.contains("71.60%"));
        assert!(text.contains("86.56%"));
        assert!(text.contains("gagal diparsing"));
    }

    #[test]
    fn test_lda_metrics_from_report() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("reports")).unwrap();
        std::fs::write(
            dir.path().join("reports/lda_report.txt"),
            "Jumlah Topik Optimal: 12\nSkor Koherensi (C_v) Tertinggi: 0.51234\n- Alpha: auto\n",
        )
        .unwrap();
        let view = DemoView::build(&empty_context(dir.path()), "", true);
        let mut out = Vec::new();
        view.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("0.5123"));
        assert!(text.contains("auto / N/A"));
        assert!(text.contains("Tidak dapat menampilkan detail topik"));
    }
}
