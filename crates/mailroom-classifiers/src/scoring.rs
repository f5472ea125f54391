//! Keyword and phrase-pattern scoring engine
//!
//! The leaf component of every lexicon-driven decision: it reports which
//! sales/support terms are present in a message and folds them into a
//! weighted score. It never decides policy beyond the strict-win rule.

use aho_corasick::AhoCorasick;
use mailroom_core::{Category, Error, Result};
use std::collections::BTreeSet;

/// Sales keyword lexicon (Spanish and English)
const SALES_KEYWORDS: &[&str] = &[
    "comprar",
    "precio",
    "costo",
    "cotización",
    "presupuesto",
    "venta",
    "producto",
    "servicio",
    "oferta",
    "descuento",
    "comercial",
    "adquirir",
    "cuánto cuesta",
    "me interesa",
    "quisiera",
    "necesito",
    "contratar",
    "buy",
    "price",
    "quote",
    "purchase",
    "sale",
    "offer",
    "discount",
    "cost",
    "interested",
    "need",
    "want",
    "hire",
];

/// Support keyword lexicon (Spanish and English)
const SUPPORT_KEYWORDS: &[&str] = &[
    "problema",
    "error",
    "bug",
    "ayuda",
    "soporte",
    "técnico",
    "falla",
    "no funciona",
    "roto",
    "arreglar",
    "reparar",
    "urgente",
    "emergencia",
    "support",
    "help",
    "issue",
    "technical",
    "assistance",
    "trouble",
    "fix",
    "repair",
    "maintenance",
    "broken",
    "not working",
    "urgent",
];

/// Sales patterns: phrases and the currency marker, stronger category
/// evidence than single keywords
const SALES_PATTERNS: &[&str] = &[
    "cuánto",
    "precio",
    "$",
    "comprar",
    "contratar",
    "me interesa",
    "quisiera saber",
    "necesito información",
];

/// Support patterns: phrases, stronger category evidence than single
/// keywords
const SUPPORT_PATTERNS: &[&str] = &[
    "no funciona",
    "problema con",
    "error en",
    "ayuda con",
    "no puedo",
    "está roto",
    "falla",
];

/// Weight applied to phrase-pattern hits relative to keyword hits
const PATTERN_WEIGHT: usize = 2;

/// One compiled lexicon: an Aho-Corasick automaton plus its source terms
struct Lexicon {
    matcher: AhoCorasick,
    terms: Vec<String>,
}

impl Lexicon {
    fn build(terms: &[&str]) -> Result<Self> {
        let terms: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
        let matcher = AhoCorasick::builder()
            .build(&terms)
            .map_err(|e| Error::classifier(format!("failed to build lexicon matcher: {e}")))?;
        Ok(Self { matcher, terms })
    }

    /// Distinct terms present in the text, in lexicon order
    ///
    /// Overlapping search is required here: non-overlapping iteration would
    /// hide a term nested inside a longer hit ("precio" inside "precios").
    fn present_terms(&self, text: &str) -> Vec<String> {
        let mut seen = BTreeSet::new();
        for m in self.matcher.find_overlapping_iter(text) {
            seen.insert(m.pattern().as_usize());
        }
        seen.into_iter().map(|i| self.terms[i].clone()).collect()
    }
}

/// Match evidence collected for one category
#[derive(Debug, Clone, Default)]
pub struct MatchEvidence {
    /// Distinct keywords present, in lexicon order
    pub keywords: Vec<String>,

    /// Distinct phrase patterns present, in lexicon order
    pub patterns: Vec<String>,
}

impl MatchEvidence {
    /// Combined score: keywords count once, phrase patterns double
    pub fn score(&self) -> usize {
        self.keywords.len() + PATTERN_WEIGHT * self.patterns.len()
    }

    /// All matched terms, keywords before patterns
    ///
    /// A term listed in both lexicons appears twice, matching how the score
    /// counts it twice.
    pub fn matched_terms(&self) -> Vec<String> {
        self.keywords
            .iter()
            .chain(self.patterns.iter())
            .cloned()
            .collect()
    }
}

/// Raw scoring output for both scored categories
///
/// `other` is never scored directly: it is the outcome when neither side
/// strictly wins.
#[derive(Debug, Clone)]
pub struct MessageScores {
    /// Sales-side evidence
    pub sales: MatchEvidence,

    /// Support-side evidence
    pub support: MatchEvidence,
}

impl MessageScores {
    /// Decide the category: a side must strictly outscore the other; any
    /// tie, including zero-zero, resolves to `other`
    pub fn decide(&self) -> Category {
        let sales = self.sales.score();
        let support = self.support.score();
        if sales > support {
            Category::Sales
        } else if support > sales {
            Category::Support
        } else {
            Category::Other
        }
    }

    /// Sum of both combined scores
    pub fn total(&self) -> usize {
        self.sales.score() + self.support.score()
    }
}

/// Computes raw keyword and phrase-pattern evidence for a message
pub struct ScoringEngine {
    sales_keywords: Lexicon,
    support_keywords: Lexicon,
    sales_patterns: Lexicon,
    support_patterns: Lexicon,
}

impl ScoringEngine {
    /// Build the engine from the default bilingual lexicons
    pub fn new() -> Result<Self> {
        Ok(Self {
            sales_keywords: Lexicon::build(SALES_KEYWORDS)?,
            support_keywords: Lexicon::build(SUPPORT_KEYWORDS)?,
            sales_patterns: Lexicon::build(SALES_PATTERNS)?,
            support_patterns: Lexicon::build(SUPPORT_PATTERNS)?,
        })
    }

    /// Score a message against both category lexicons
    ///
    /// Matching is case-insensitive substring presence over the lowercased
    /// message; each lexicon term counts at most once regardless of how
    /// often it repeats.
    pub fn score(&self, message: &str) -> MessageScores {
        let lowered = message.to_lowercase();
        MessageScores {
            sales: MatchEvidence {
                keywords: self.sales_keywords.present_terms(&lowered),
                patterns: self.sales_patterns.present_terms(&lowered),
            },
            support: MatchEvidence {
                keywords: self.support_keywords.present_terms(&lowered),
                patterns: self.support_patterns.present_terms(&lowered),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ScoringEngine {
        ScoringEngine::new().unwrap()
    }

    #[test]
    fn sales_message_outscores_support() {
        let scores = engine().score("Quisiera comprar su producto, ¿qué precio tiene?");
        assert!(scores.sales.score() > scores.support.score());
        assert_eq!(scores.decide(), Category::Sales);
    }

    #[test]
    fn support_message_outscores_sales() {
        let scores = engine().score("Hay un error en el sistema y necesito soporte");
        assert_eq!(scores.decide(), Category::Support);
    }

    #[test]
    fn keyword_nested_in_longer_word_still_matches() {
        // "precios" contains "precio"; overlapping search must find it
        let scores = engine().score("me gustan sus precios");
        assert!(scores.sales.keywords.contains(&"precio".to_string()));
    }

    #[test]
    fn repeated_keyword_counts_once() {
        let once = engine().score("quiero comprar");
        let thrice = engine().score("comprar comprar comprar");
        assert_eq!(once.sales.score(), thrice.sales.score());
    }

    #[test]
    fn uppercase_and_accents_are_matched() {
        let scores = engine().score("NECESITO SOPORTE TÉCNICO URGENTE");
        assert!(scores.support.keywords.contains(&"técnico".to_string()));
        assert!(scores.support.keywords.contains(&"urgente".to_string()));
    }

    #[test]
    fn pattern_hit_scores_double() {
        // "quisiera saber" is a phrase pattern; "quisiera" alone a keyword
        let scores = engine().score("quisiera saber más");
        assert_eq!(scores.sales.keywords, vec!["quisiera".to_string()]);
        assert_eq!(scores.sales.patterns, vec!["quisiera saber".to_string()]);
        assert_eq!(scores.sales.score(), 1 + 2);
    }

    #[test]
    fn currency_marker_counts_as_sales_evidence() {
        let scores = engine().score("puedo pagar 50$ ahora mismo");
        assert!(scores.sales.patterns.contains(&"$".to_string()));
        assert_eq!(scores.decide(), Category::Sales);
    }

    #[test]
    fn zero_zero_is_a_tie() {
        let scores = engine().score("hola, saludos cordiales");
        assert_eq!(scores.total(), 0);
        assert_eq!(scores.decide(), Category::Other);
    }

    #[test]
    fn equal_nonzero_scores_tie_to_other() {
        // one sales keyword vs one support keyword
        let scores = engine().score("quiero adquirir algo pero hay un bug");
        assert_eq!(scores.sales.score(), scores.support.score());
        assert_eq!(scores.decide(), Category::Other);
    }

    #[test]
    fn matched_terms_keep_lexicon_order() {
        let scores = engine().score("necesito una cotización del producto");
        let terms = scores.sales.matched_terms();
        let cot = terms.iter().position(|t| t == "cotización").unwrap();
        let prod = terms.iter().position(|t| t == "producto").unwrap();
        // cotización precedes producto in the lexicon
        assert!(cot < prod);
    }
}
