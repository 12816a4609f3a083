#![allow(dead_code)]

use ndarray::{arr2, Array1, Array2};
use sentimen_signal::layers::bilstm_network::BiLSTMNetwork;
use sentimen_signal::layers::embedding::Embedding;
use sentimen_signal::layers::linear::LinearLayer;
use sentimen_signal::models::sentiment::{SentimentClassifier, SequenceEncoder};
use sentimen_signal::persistence::{ModelMetadata, ModelPersistence, PersistentModel};
use sentimen_signal::text::{LabelEncoder, SequenceTokenizer};
use sentimen_signal::{AppConfig, Dictionary, LdaModel};
use std::fs;
use std::path::Path;

pub const SAMPLE: &str =
    "Aplikasinya bagus dan sangat membantu sekali untuk bayar pajak tahunan, jadi tidak usah antri lagi di samsat.";

pub const VOCABULARY: [&str; 10] =
    ["samsat", "kantor", "antri", "rumah", "bayar", "pajak", "tahun", "kendara", "online", "kirim"];

pub const REVIEWS_CSV: &str = "\
ulasan_lengkap,sentimen,deskripsi_topik,detail_topik,skor_sentimen
\"Bayar pajak cepat, tidak antri\",Positif,Pembayaran Pajak Kendaraan,bayar pajak online,0.93
Kurir lama sekali,Negatif,Pengiriman Dokumen Fisik,kirim stnk,0.81
Biasa saja,Netral,Urusan di Kantor Samsat,kantor samsat,0.55
Tetap harus ke kantor,Negatif,Urusan di Kantor Samsat,kantor samsat antri,0.67
Pajak beres dari rumah,Positif,Layanan dari Rumah (Anti Antri),rumah antri,0.88
Tidak jelas,Campur,Urusan di Kantor Samsat,kantor,0.50
Skor aneh,Positif,Urusan di Kantor Samsat,kantor,1.5
";

/// Classifier whose zero weights and biased head always prefer `Positif`.
pub fn classifier(tokenizer_size: usize) -> SentimentClassifier {
    let embedding = Embedding::new(tokenizer_size + 1, 4);
    let encoder = SequenceEncoder::BiLstm(BiLSTMNetwork::new_concat(4, 3, 2));
    let head = LinearLayer::from_weights(Array2::zeros((3, 6)), arr2(&[[0.0], [0.5], [2.0]]));
    SentimentClassifier::new(embedding, encoder, head, 8)
}

pub fn tokenizer() -> SequenceTokenizer {
    SequenceTokenizer::fit_on_texts(
        &["aplikasi bagus bantu bayar pajak", "antri lama samsat", "kirim stnk lama"],
        Some("<OOV>"),
    )
}

pub fn labels() -> LabelEncoder {
    LabelEncoder::new(["Positif", "Netral", "Negatif"])
}

/// Twelve topics; topic 1 owns samsat/kantor, topic 2 antri/rumah and
/// topic 3 the payment words.
pub fn lda() -> LdaModel {
    let mut lambda = Array2::from_elem((12, VOCABULARY.len()), 0.01);
    lambda[[1, 0]] = 30.0;
    lambda[[1, 1]] = 20.0;
    lambda[[2, 2]] = 30.0;
    lambda[[2, 3]] = 20.0;
    for (term, weight) in [(4, 50.0), (5, 40.0), (6, 30.0), (7, 20.0), (8, 10.0)] {
        lambda[[3, term]] = weight;
    }
    LdaModel::new(Array1::from_elem(12, 1.0 / 12.0), lambda)
}

pub fn dictionary() -> Dictionary {
    Dictionary::from_tokens(VOCABULARY)
}

/// Write every asset and the dataset under `root`.
pub fn write_assets(root: &Path) -> AppConfig {
    let config = AppConfig {
        data: root.join("hasil_terstruktur_diperbaiki.csv"),
        assets: root.join("assets"),
        root_words: None,
    };
    fs::create_dir_all(config.models_dir()).unwrap();
    fs::create_dir_all(config.reports_dir()).unwrap();

    fs::write(&config.data, REVIEWS_CSV).unwrap();
    fs::write(config.normalization_path(), "tidak_baku,kata_baku\napk,aplikasi\ngak,tidak\n").unwrap();

    let tokenizer = tokenizer();
    classifier(tokenizer.size())
        .save(config.sentiment_model_path(), ModelMetadata::new("sentimen_bilstm", None))
        .unwrap();
    ModelPersistence::save(&tokenizer, config.tokenizer_path()).unwrap();
    ModelPersistence::save(&labels(), config.label_encoder_path()).unwrap();
    lda().save(config.lda_model_path(), ModelMetadata::new("lda_12", None)).unwrap();
    ModelPersistence::save(&dictionary(), config.lda_dictionary_path()).unwrap();

    fs::write(
        config.report_path("lda_report.txt"),
        "Jumlah Topik Optimal: 12\n\
         Skor Koherensi (C_v) Tertinggi: 0.48712\n\
         - Alpha: symmetric\n\
         - Eta: auto\n\
         Topik yang ditemukan oleh model terbaik (hanya keywords):\n\
         Topik 0: proses, lama, aplikasi\n\
         Topik 1: samsat, kantor\n\
         Topik yang ditemukan (dengan format asli):\n",
    )
    .unwrap();
    fs::write(config.report_path("report_sesudah.txt"), "accuracy 0.87").unwrap();
    config
}
