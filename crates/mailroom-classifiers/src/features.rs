//! TF-IDF feature extraction for the statistical strategy
//!
//! Mirrors the classic vectorizer pipeline: lowercase, word tokens of two
//! or more characters, English stop-word removal, unigrams plus bigrams,
//! vocabulary capped by corpus frequency, smoothed idf, L2-normalized rows.

use mailroom_core::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Default vocabulary cap
pub const DEFAULT_MAX_FEATURES: usize = 1000;

/// The frozen English stop-word list applied before n-gram formation
///
/// Spanish function words pass through untouched; that asymmetry is part of
/// the documented pipeline behavior, not an oversight to repair.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against",
    "all", "almost", "alone", "along", "already", "also", "although", "always",
    "am", "among", "amongst", "amoungst", "amount", "an", "and", "another",
    "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being",
    "below", "beside", "besides", "between", "beyond", "bill", "both",
    "bottom", "but", "by", "call", "can", "cannot", "cant", "co", "con",
    "could", "couldnt", "cry", "de", "describe", "detail", "do", "done",
    "down", "due", "during", "each", "eg", "eight", "either", "eleven",
    "else", "elsewhere", "empty", "enough", "etc", "even", "ever", "every",
    "everyone", "everything", "everywhere", "except", "few", "fifteen",
    "fifty", "fill", "find", "fire", "first", "five", "for", "former",
    "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her",
    "here", "hereafter", "hereby", "herein", "hereupon", "hers", "herself",
    "him", "himself", "his", "how", "however", "hundred", "i", "ie", "if",
    "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself",
    "keep", "last", "latter", "latterly", "least", "less", "ltd", "made",
    "many", "may", "me", "meanwhile", "might", "mill", "mine", "more",
    "moreover", "most", "mostly", "move", "much", "must", "my", "myself",
    "name", "namely", "neither", "never", "nevertheless", "next", "nine",
    "no", "nobody", "none", "noone", "nor", "not", "nothing", "now",
    "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out",
    "over", "own", "part", "per", "perhaps", "please", "put", "rather", "re",
    "same", "see", "seem", "seemed", "seeming", "seems", "serious", "several",
    "she", "should", "show", "side", "since", "sincere", "six", "sixty", "so",
    "some", "somehow", "someone", "something", "sometime", "sometimes",
    "somewhere", "still", "such", "system", "take", "ten", "than", "that",
    "the", "their", "them", "themselves", "then", "thence", "there",
    "thereafter", "thereby", "therefore", "therein", "thereupon", "these",
    "they", "thick", "thin", "third", "this", "those", "though", "three",
    "through", "throughout", "thru", "thus", "to", "together", "too", "top",
    "toward", "towards", "twelve", "twenty", "two", "un", "under", "until",
    "up", "upon", "us", "very", "via", "was", "we", "well", "were", "what",
    "whatever", "when", "whence", "whenever", "where", "whereafter",
    "whereas", "whereby", "wherein", "whereupon", "wherever", "whether",
    "which", "while", "whither", "who", "whoever", "whole", "whom", "whose",
    "why", "will", "with", "within", "without", "would", "yet", "you",
    "your", "yours", "yourself", "yourselves",
];

fn token_regex() -> &'static Regex {
    static TOKENS: OnceLock<Regex> = OnceLock::new();
    // Unicode word characters, two or more per token
    TOKENS.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token regex compiles"))
}

fn stop_words() -> &'static HashSet<&'static str> {
    static WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    WORDS.get_or_init(|| ENGLISH_STOP_WORDS.iter().copied().collect())
}

/// Lowercased word tokens with stop words removed
fn content_tokens(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_regex()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .filter(|token| !stop_words().contains(token.as_str()))
        .collect()
}

/// Unigrams plus bigrams over the stop-filtered token stream
fn analyze(text: &str) -> Vec<String> {
    let tokens = content_tokens(text);
    let mut terms = tokens.clone();
    for window in tokens.windows(2) {
        terms.push(format!("{} {}", window[0], window[1]));
    }
    terms
}

/// Term-frequency / inverse-document-frequency vectorizer
///
/// Serializable so a fitted model round-trips through the persisted
/// artifact untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    max_features: usize,
    vocabulary: HashMap<String, usize>,
    terms: Vec<String>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Create an unfitted vectorizer with the given vocabulary cap
    pub fn new(max_features: usize) -> Self {
        Self {
            max_features,
            vocabulary: HashMap::new(),
            terms: Vec::new(),
            idf: Vec::new(),
        }
    }

    /// Whether `fit` has produced a vocabulary
    pub fn is_fitted(&self) -> bool {
        !self.terms.is_empty()
    }

    /// Whether the vocabulary, term table, and idf weights agree in shape
    ///
    /// `transform` indexes `idf` and `terms` by vocabulary entry, so a
    /// deserialized vectorizer whose tables disagree must be rejected
    /// before it is used.
    pub fn is_coherent(&self) -> bool {
        self.terms.len() == self.idf.len()
            && self.vocabulary.len() == self.terms.len()
            && self
                .vocabulary
                .iter()
                .all(|(term, &index)| self.terms.get(index) == Some(term))
    }

    /// Number of features in the fitted vocabulary
    pub fn vocabulary_len(&self) -> usize {
        self.terms.len()
    }

    /// Term at a vocabulary index
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    /// Learn the vocabulary and idf weights from a document corpus
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        if documents.is_empty() {
            return Err(Error::insufficient_data(
                "cannot fit a vectorizer on an empty corpus",
            ));
        }

        let mut corpus_counts: HashMap<String, u64> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for document in documents {
            let terms = analyze(document);
            let mut seen: HashSet<&str> = HashSet::new();
            for term in &terms {
                *corpus_counts.entry(term.clone()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *doc_freq.entry(term.clone()).or_insert(0) += 1;
                }
            }
        }

        // Cap by corpus frequency, ties broken alphabetically, then index
        // the surviving terms in alphabetical order
        let mut ranked: Vec<(&String, u64)> =
            corpus_counts.iter().map(|(t, c)| (t, *c)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features);

        let mut kept: Vec<String> = ranked.into_iter().map(|(t, _)| t.clone()).collect();
        kept.sort();

        let n_docs = documents.len() as f32;
        self.vocabulary = kept
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        self.idf = kept
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f32;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        self.terms = kept;

        Ok(())
    }

    /// Produce the L2-normalized tf-idf vector for one document
    ///
    /// Terms outside the fitted vocabulary contribute nothing; a document
    /// sharing no terms with the vocabulary maps to the zero vector.
    pub fn transform(&self, document: &str) -> Vec<f32> {
        let mut weights = vec![0.0f32; self.terms.len()];
        for term in analyze(document) {
            if let Some(&index) = self.vocabulary.get(&term) {
                weights[index] += self.idf[index];
            }
        }

        let norm = weights.iter().map(|w| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for weight in &mut weights {
                *weight /= norm;
            }
        }
        weights
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FEATURES)
    }
}

/// Expose the analyzer to sibling strategies that reuse the token pipeline
pub(crate) fn content_bearing_tokens(text: &str) -> Vec<String> {
    content_tokens(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<String> {
        vec![
            "Quiero comprar sus productos".to_string(),
            "Necesito una cotización para mi proyecto".to_string(),
            "Tengo un problema con mi cuenta".to_string(),
            "La aplicación no funciona correctamente".to_string(),
        ]
    }

    #[test]
    fn tokens_drop_stop_words_and_short_words() {
        let terms = analyze("the price of the offer");
        assert_eq!(
            terms,
            vec!["price".to_string(), "offer".to_string(), "price offer".to_string()]
        );
    }

    #[test]
    fn tokens_keep_accents() {
        let tokens = content_tokens("¿Cuánto cuesta la aplicación?");
        assert!(tokens.contains(&"cuánto".to_string()));
        assert!(tokens.contains(&"aplicación".to_string()));
    }

    #[test]
    fn bigrams_span_the_filtered_stream() {
        // "de" sits on the English stop list, so the bigram bridges it
        let terms = analyze("desarrollo de aplicaciones");
        assert!(terms.contains(&"desarrollo aplicaciones".to_string()));
    }

    #[test]
    fn fit_then_transform_normalizes_rows() {
        let mut vectorizer = TfidfVectorizer::default();
        vectorizer.fit(&corpus()).unwrap();
        assert!(vectorizer.is_fitted());

        let vector = vectorizer.transform("Quiero comprar una cotización");
        let norm: f32 = vector.iter().map(|w| w * w).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn unseen_document_maps_to_zero_vector() {
        let mut vectorizer = TfidfVectorizer::default();
        vectorizer.fit(&corpus()).unwrap();

        let vector = vectorizer.transform("xyzzy plugh");
        assert!(vector.iter().all(|w| *w == 0.0));
    }

    #[test]
    fn rare_terms_get_higher_idf_than_common_ones() {
        let docs = vec![
            "precio precio".to_string(),
            "precio soporte".to_string(),
            "precio cuenta".to_string(),
        ];
        let mut vectorizer = TfidfVectorizer::default();
        vectorizer.fit(&docs).unwrap();

        let common = vectorizer.vocabulary["precio"];
        let rare = vectorizer.vocabulary["cuenta"];
        assert!(vectorizer.idf[rare] > vectorizer.idf[common]);
    }

    #[test]
    fn vocabulary_respects_max_features() {
        let mut vectorizer = TfidfVectorizer::new(3);
        vectorizer.fit(&corpus()).unwrap();
        assert_eq!(vectorizer.vocabulary_len(), 3);
    }

    #[test]
    fn empty_corpus_is_rejected() {
        let mut vectorizer = TfidfVectorizer::default();
        assert!(vectorizer.fit(&[]).is_err());
    }

    #[test]
    fn fitted_vectorizer_round_trips_through_json() {
        let mut vectorizer = TfidfVectorizer::default();
        vectorizer.fit(&corpus()).unwrap();

        let json = serde_json::to_string(&vectorizer).unwrap();
        let restored: TfidfVectorizer = serde_json::from_str(&json).unwrap();
        assert_eq!(
            restored.transform("Quiero comprar"),
            vectorizer.transform("Quiero comprar")
        );
    }

    #[test]
    fn fitted_vectorizer_is_coherent() {
        let mut vectorizer = TfidfVectorizer::default();
        vectorizer.fit(&corpus()).unwrap();
        assert!(vectorizer.is_coherent());
    }

    #[test]
    fn mismatched_tables_are_not_coherent() {
        let mut vectorizer = TfidfVectorizer::default();
        vectorizer.fit(&corpus()).unwrap();

        vectorizer.idf.clear();
        assert!(!vectorizer.is_coherent());
    }

    #[test]
    fn dangling_vocabulary_index_is_not_coherent() {
        let mut vectorizer = TfidfVectorizer::default();
        vectorizer.fit(&corpus()).unwrap();

        let out_of_range = vectorizer.vocabulary_len() + 7;
        vectorizer.vocabulary.insert("cuenta".to_string(), out_of_range);
        assert!(!vectorizer.is_coherent());
    }
}
