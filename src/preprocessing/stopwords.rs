use std::collections::HashSet;

/// General Indonesian stopwords removed before sentiment classification.
pub const INDONESIAN_STOPWORDS: &[&str] = &[
    "yang", "untuk", "pada", "ke", "para", "namun", "menurut", "antara", "dia", "dua",
    "ia", "seperti", "jika", "sehingga", "kembali", "dan", "tidak", "ini", "karena",
    "kepada", "oleh", "saat", "harus", "sementara", "setelah", "belum", "kami", "sekitar",
    "bagi", "serta", "di", "dari", "telah", "sebagai", "masih", "hal", "ketika", "adalah",
    "itu", "dalam", "bisa", "bahwa", "atau", "hanya", "kita", "dengan", "akan", "juga",
    "ada", "mereka", "sudah", "saya", "terhadap", "secara", "agar", "lain", "anda",
    "begitu", "mengapa", "kenapa", "yaitu", "yakni", "daripada", "itulah", "lagi", "maka",
    "tentang", "demi", "dimana", "kemana", "pula", "sambil", "sebelum", "sesudah",
    "supaya", "guna", "kah", "pun", "sampai", "sedangkan", "selagi", "tetapi", "apakah",
    "kecuali", "sebab", "selain", "seolah", "seraya", "seterusnya", "tanpa", "agak",
    "boleh", "dapat", "dsb", "dst", "dll", "dahulu", "dulunya", "anu", "demikian", "tapi",
    "ingin", "nggak", "mari", "nanti", "melainkan", "oh", "ok", "seharusnya",
    "sebetulnya", "setiap", "setidaknya", "sesuatu", "pasti", "saja", "toh", "ya", "walau",
    "tolong", "tentu", "amat", "apalagi", "bagaimanapun",
];

/// Curated stopwords removed before topic inference: opinion words,
/// forms of address, fillers and app-generic terms that would otherwise
/// dominate every topic.
pub const TOPIC_STOPWORDS: &[&str] = &[
    "aman", "aneh", "bagus", "baik", "bingung", "buruk", "cepat", "cocok", "enak", "efisien",
    "gagal", "gercep", "hebat", "hemat", "jelek", "jelas", "kecewa", "keren", "lancar",
    "lambat", "lemot", "lumayan", "mahal", "malas", "mantap", "mantul", "membantu",
    "mending", "mudah", "nyaman", "ok", "paham", "parah", "praktis", "puas", "pusing",
    "repot", "ribet", "rumit", "salah", "sesuai", "sip", "sukses", "sulit", "super",
    "susah", "takut", "terbantu", "top", "admin", "anda", "bro", "gan", "kak", "kakak",
    "kamu", "min", "saya", "sis", "aja", "banget", "bolak", "coba", "deh", "dgn", "dll",
    "dong", "ga", "gak", "gk", "enggak", "kalo", "kalau", "kah", "kayak", "kok", "krn",
    "line", "nggak", "nih", "on", "sih", "yg", "alhamdulillah", "app", "aplikasi", "apk",
    "jadi", "kesah", "mohon", "moga", "semoga", "terima_kasih", "thanks", "tolong", "ulang",
    "amanah", "simpel", "banyak", "hasil", "metode", "terima", "kasih",
];

/// Removes whole space-separated tokens found in a word set.
#[derive(Debug, Clone)]
pub struct StopWordRemover {
    words: HashSet<String>,
}

impl StopWordRemover {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self { words: words.into_iter().map(|w| w.as_ref().to_string()).collect() }
    }

    pub fn indonesian() -> Self {
        Self::new(INDONESIAN_STOPWORDS)
    }

    pub fn topic() -> Self {
        Self::new(TOPIC_STOPWORDS)
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Drop stopword tokens and rejoin the rest with single spaces.
    ///
    /// Matching is exact, so a token carrying punctuation is kept.
    pub fn remove(&self, text: &str) -> String {
        text.split_whitespace()
            .filter(|word| !self.is_stop_word(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indonesian_remover() {
        let remover = StopWordRemover::indonesian();
        assert_eq!(remover.remove("bayar pajak di samsat dan tidak antri"), "bayar pajak samsat antri");
        // punctuation glued to a stopword keeps it
        assert_eq!(remover.remove("lagi, di"), "lagi,");
    }

    #[test]
    fn test_topic_list_keeps_general_stopwords() {
        let remover = StopWordRemover::topic();
        assert_eq!(remover.remove("aplikasi bagus untuk bayar pajak"), "untuk bayar pajak");
    }
}
