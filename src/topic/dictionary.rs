use std::collections::{BTreeMap, HashMap};
use serde::{Deserialize, Serialize};

/// Vocabulary of the topic model: token ↔ term id.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "DictionaryFile", into = "DictionaryFile")]
pub struct Dictionary {
    token2id: HashMap<String, usize>,
    id2token: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct DictionaryFile {
    token2id: BTreeMap<String, usize>,
}

impl From<DictionaryFile> for Dictionary {
    fn from(file: DictionaryFile) -> Self {
        Dictionary::from_token_ids(file.token2id)
    }
}

impl From<Dictionary> for DictionaryFile {
    fn from(dictionary: Dictionary) -> Self {
        DictionaryFile { token2id: dictionary.token2id.into_iter().collect() }
    }
}

impl Dictionary {
    /// Build from token → id pairs. Ids are expected to be dense from 0.
    pub fn from_token_ids<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, usize)>,
    {
        let token2id: HashMap<String, usize> = pairs.into_iter().collect();
        let size = token2id.values().copied().max().map_or(0, |max| max + 1);
        let mut id2token = vec![String::new(); size];
        for (token, &id) in &token2id {
            id2token[id] = token.clone();
        }
        Self { token2id, id2token }
    }

    /// Build from tokens in id order.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_token_ids(tokens.into_iter().enumerate().map(|(id, token)| (token.into(), id)))
    }

    pub fn len(&self) -> usize {
        self.id2token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id2token.is_empty()
    }

    pub fn id(&self, token: &str) -> Option<usize> {
        self.token2id.get(token).copied()
    }

    pub fn token(&self, id: usize) -> Option<&str> {
        self.id2token.get(id).map(String::as_str).filter(|t| !t.is_empty())
    }

    /// Count known tokens into (term id, count) pairs sorted by id.
    pub fn doc2bow<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<(usize, f64)> {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokens {
            if let Some(id) = self.id(token.as_ref()) {
                *counts.entry(id).or_insert(0.0) += 1.0;
            }
        }
        counts.into_iter().collect()
    }
}
