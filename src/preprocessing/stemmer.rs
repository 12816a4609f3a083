//! Indonesian stemming by confix stripping.
//!
//! Affixes are peeled off in the order particle → possessive → derivational
//! suffix → up to three derivational prefixes. A candidate is only accepted
//! when it is a known root word, so words without a known root come back
//! unchanged and stemming an already stemmed word is a no-op.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

const BUILTIN_ROOT_WORDS: &str = include_str!("kata_dasar.txt");

const PARTICLES: &[&str] = &["lah", "kah", "tah", "pun"];
const POSSESSIVES: &[&str] = &["nya", "ku", "mu"];
const DERIVATION_SUFFIXES: &[&str] = &["kan", "an", "i"];
const MAX_PREFIXES: usize = 3;
const MIN_STEM_LEN: usize = 2;

/// Trait for stemming algorithms.
pub trait Stemmer {
    /// Stem a single lowercase word.
    fn stem_word(&self, word: &str) -> String;

    /// Normalize a text and stem every word in it.
    ///
    /// Anything outside `a-z`, `0-9`, space and `-` becomes a space.
    fn stem(&self, text: &str) -> String {
        normalize_text(text)
            .split(' ')
            .filter(|w| !w.is_empty())
            .map(|word| self.stem_word(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Lowercase, blank out unsupported characters, collapse whitespace.
pub fn normalize_text(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|ch| match ch {
            'a'..='z' | '0'..='9' | '-' => ch,
            _ => ' ',
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Dictionary-gated Indonesian stemmer.
#[derive(Debug, Clone)]
pub struct IndonesianStemmer {
    roots: HashSet<String>,
}

impl Default for IndonesianStemmer {
    /// Built-in roots only: a small review-domain list, not the full
    /// Indonesian dictionary.
    fn default() -> Self {
        Self::new(BUILTIN_ROOT_WORDS.lines())
    }
}

impl IndonesianStemmer {
    pub fn new<I, S>(roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let roots = roots
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { roots }
    }

    /// Built-in roots plus one word per line from `path`.
    pub fn with_root_file(path: &Path) -> std::io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut stemmer = Self::default();
        stemmer.roots.extend(
            contents.lines().map(|w| w.trim().to_lowercase()).filter(|w| !w.is_empty()),
        );
        Ok(stemmer)
    }

    pub fn num_roots(&self) -> usize {
        self.roots.len()
    }

    pub fn is_root(&self, word: &str) -> bool {
        self.roots.contains(word)
    }

    fn stem_singular(&self, word: &str) -> String {
        if word.chars().count() <= 3 || self.is_root(word) {
            return word.to_string();
        }
        self.strip_confix(word).unwrap_or_else(|| word.to_string())
    }

    fn strip_confix(&self, word: &str) -> Option<String> {
        // Each stage removes one more suffix class; prefixes are tried on
        // the most stripped stage first, then on the less stripped ones.
        let mut stages = vec![word.to_string()];
        for suffixes in [PARTICLES, POSSESSIVES, DERIVATION_SUFFIXES] {
            let current = stages[stages.len() - 1].clone();
            if let Some(stripped) = strip_suffix(&current, suffixes) {
                if self.is_root(&stripped) {
                    return Some(stripped);
                }
                stages.push(stripped);
            }
        }

        stages.iter().rev().find_map(|stage| self.strip_prefixes(stage, MAX_PREFIXES))
    }

    fn strip_prefixes(&self, word: &str, depth: usize) -> Option<String> {
        if depth == 0 {
            return None;
        }
        for candidate in prefix_candidates(word) {
            if candidate.chars().count() < MIN_STEM_LEN {
                continue;
            }
            if self.is_root(&candidate) {
                return Some(candidate);
            }
            if let Some(root) = self.strip_prefixes(&candidate, depth - 1) {
                return Some(root);
            }
        }
        None
    }
}

impl Stemmer for IndonesianStemmer {
    fn stem_word(&self, word: &str) -> String {
        // Reduplication: "kali-kali" and "buku-bukunya" reduce to the shared root.
        if let Some((left, right)) = word.split_once('-') {
            let left_root = self.stem_singular(left);
            let right_root = self.stem_singular(right);
            if !left_root.is_empty() && left_root == right_root {
                return left_root;
            }
            return word.to_string();
        }
        self.stem_singular(word)
    }
}

fn strip_suffix(word: &str, suffixes: &[&str]) -> Option<String> {
    suffixes.iter().find_map(|suffix| {
        word.strip_suffix(suffix)
            .filter(|rest| rest.chars().count() >= MIN_STEM_LEN)
            .map(str::to_string)
    })
}

/// Possible words left after removing one prefix, most likely first.
///
/// Nasal prefixes also yield the recoded forms where the root's first
/// consonant was absorbed (`meny-` + s, `mem-` + p, `men-` + t, `meng-` + k).
fn prefix_candidates(word: &str) -> Vec<String> {
    let with = |initial: &str, rest: &str| format!("{}{}", initial, rest);

    if let Some(rest) = word.strip_prefix("meng") {
        return vec![rest.to_string(), with("k", rest)];
    }
    if let Some(rest) = word.strip_prefix("meny") {
        return vec![with("s", rest), rest.to_string()];
    }
    if let Some(rest) = word.strip_prefix("mem") {
        return vec![rest.to_string(), with("p", rest)];
    }
    if let Some(rest) = word.strip_prefix("men") {
        return vec![rest.to_string(), with("t", rest)];
    }
    if let Some(rest) = word.strip_prefix("me") {
        return vec![rest.to_string()];
    }
    if let Some(rest) = word.strip_prefix("peng") {
        return vec![rest.to_string(), with("k", rest)];
    }
    if let Some(rest) = word.strip_prefix("peny") {
        return vec![with("s", rest), rest.to_string()];
    }
    if let Some(rest) = word.strip_prefix("pem") {
        return vec![rest.to_string(), with("p", rest)];
    }
    if let Some(rest) = word.strip_prefix("pen") {
        return vec![rest.to_string(), with("t", rest)];
    }
    if let Some(rest) = word.strip_prefix("per") {
        return vec![rest.to_string(), format!("r{}", rest)];
    }
    if let Some(rest) = word.strip_prefix("pe") {
        return vec![rest.to_string()];
    }
    if let Some(rest) = word.strip_prefix("ber") {
        return vec![rest.to_string(), format!("r{}", rest)];
    }
    if let Some(rest) = word.strip_prefix("bel") {
        return vec![rest.to_string(), format!("l{}", rest)];
    }
    if let Some(rest) = word.strip_prefix("be") {
        return vec![rest.to_string()];
    }
    if let Some(rest) = word.strip_prefix("ter") {
        return vec![rest.to_string(), format!("r{}", rest)];
    }
    for prefix in ["di", "ke", "se", "te"] {
        if let Some(rest) = word.strip_prefix(prefix) {
            return vec![rest.to_string()];
        }
    }
    Vec::new()
}
