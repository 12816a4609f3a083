//! Topic model: LDA inference, its vocabulary, and the human-readable
//! labels of the twelve topics found in the review corpus.

pub mod dictionary;
pub mod lda;

pub use dictionary::Dictionary;
pub use lda::LdaModel;

/// Descriptions of topics 0..=11 of the trained model.
pub const TOPIC_LABELS: [&str; 12] = [
    "Keluhan Lamanya Proses Aplikasi",
    "Urusan di Kantor Samsat",
    "Layanan dari Rumah (Anti Antri)",
    "Pembayaran Pajak Kendaraan",
    "Pilihan Metode Layanan (Online/Pos)",
    "Pengiriman Dokumen Fisik",
    "Lama Proses & Layanan Antar Kota",
    "Fitur Cetak Bukti & Notifikasi",
    "Bantuan Pendaftaran Akun",
    "Perpanjang STNK (Luar Daerah)",
    "Urusan Kendaraan & Saran Pengguna",
    "Bantuan CS & Live Chat",
];

/// Label for a topic id, `Topik N` when the id has no description.
pub fn topic_label(topic_id: usize) -> String {
    TOPIC_LABELS
        .get(topic_id)
        .map(|label| label.to_string())
        .unwrap_or_else(|| format!("Topik {}", topic_id))
}

/// Reverse lookup of a description.
pub fn topic_id_for_label(label: &str) -> Option<usize> {
    TOPIC_LABELS.iter().position(|&l| l == label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_label_fallback() {
        assert_eq!(topic_label(3), "Pembayaran Pajak Kendaraan");
        assert_eq!(topic_label(11), "Bantuan CS & Live Chat");
        assert_eq!(topic_label(12), "Topik 12");
    }

    #[test]
    fn test_reverse_lookup() {
        assert_eq!(topic_id_for_label("Urusan di Kantor Samsat"), Some(1));
        assert_eq!(topic_id_for_label("Lainnya"), None);
    }
}
