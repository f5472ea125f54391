//! Strategy contract integration tests
//!
//! Exercises every strategy through the shared `Classifier` trait object,
//! the way the intake service consumes them, plus the factory selection
//! paths and the keyword scoring scenarios end to end.

use mailroom_classifiers::prelude::*;
use mailroom_classifiers::ClassificationDetails;

const PRICING_INQUIRY: &str = "Quisiera saber cuánto cuesta sus servicios y obtener una cotización";
const URGENT_PROBLEM: &str = "Tengo un problema urgente con mi sistema, necesito ayuda técnica";
const GREETING: &str = "Hola, solo quería saludar";
const MIXED_SIGNALS: &str = "Hola, me interesa comprar y tengo un problema";

fn build(kind: StrategyKind) -> Box<dyn Classifier> {
    StrategyFactory::default()
        .create(Some(kind))
        .unwrap_or_else(|e| panic!("failed to build {kind}: {e}"))
}

#[tokio::test]
async fn every_strategy_reports_well_formed_results() {
    for kind in StrategyKind::ALL {
        let classifier = build(kind);
        let result = classifier.classify(PRICING_INQUIRY).await.unwrap();

        assert!(
            (0.0..=1.0).contains(&result.confidence),
            "{kind}: confidence out of range: {}",
            result.confidence
        );
        for category in Category::ALL {
            let p = result.probabilities.get(category);
            assert!(
                (0.0..=1.0).contains(&p),
                "{kind}: probability for {category} out of range: {p}"
            );
        }
    }
}

#[tokio::test]
async fn every_strategy_rejects_blank_messages() {
    for kind in StrategyKind::ALL {
        let classifier = build(kind);
        let err = classifier.classify("   \n\t").await.unwrap_err();
        assert!(
            matches!(err, Error::InvalidInput(_)),
            "{kind}: expected invalid input, got {err:?}"
        );
    }
}

#[tokio::test]
async fn classification_is_deterministic() {
    for kind in StrategyKind::ALL {
        let classifier = build(kind);
        let first = classifier.classify(URGENT_PROBLEM).await.unwrap();
        let second = classifier.classify(URGENT_PROBLEM).await.unwrap();

        assert_eq!(first.category, second.category, "{kind}: category drifted");
        assert_eq!(
            first.confidence, second.confidence,
            "{kind}: confidence drifted"
        );
        assert_eq!(
            first.probabilities, second.probabilities,
            "{kind}: probabilities drifted"
        );
        assert_eq!(
            first.matched_keywords, second.matched_keywords,
            "{kind}: keywords drifted"
        );
    }
}

#[tokio::test]
async fn pricing_inquiry_resolves_to_sales() {
    let classifier = build(StrategyKind::KeywordBased);
    let result = classifier.classify(PRICING_INQUIRY).await.unwrap();

    assert_eq!(result.category, Category::Sales);
    assert!(result.matched_keywords.contains(&"cotización".to_string()));
    assert!(result.matched_keywords.contains(&"cuánto".to_string()));
}

#[tokio::test]
async fn urgent_problem_resolves_to_support() {
    let classifier = build(StrategyKind::KeywordBased);
    let result = classifier.classify(URGENT_PROBLEM).await.unwrap();

    assert_eq!(result.category, Category::Support);
    assert!(result.matched_keywords.contains(&"urgente".to_string()));
}

#[tokio::test]
async fn greeting_falls_back_to_other() {
    let classifier = build(StrategyKind::KeywordBased);
    let result = classifier.classify(GREETING).await.unwrap();

    assert_eq!(result.category, Category::Other);
    assert_eq!(result.confidence, 0.5);
    assert_eq!(result.probabilities.get(Category::Sales), 0.33);
    assert_eq!(result.probabilities.get(Category::Support), 0.33);
    assert_eq!(result.probabilities.get(Category::Other), 0.34);
    assert!(result.matched_keywords.is_empty());
}

#[tokio::test]
async fn details_report_both_sides_of_the_score() {
    let classifier = KeywordClassifier::new().unwrap();
    let details: ClassificationDetails =
        classifier.classification_details(MIXED_SIGNALS).unwrap();

    assert!(!details.sales_matches.is_empty());
    assert!(!details.support_matches.is_empty());
    assert_eq!(details.final_category, Category::Sales);

    // classify resolves the same message with the same scoring rule
    let result = classifier.classify(MIXED_SIGNALS).await.unwrap();
    assert_eq!(result.category, details.final_category);
}

#[tokio::test]
async fn statistical_probabilities_sum_to_one() {
    let classifier = build(StrategyKind::Statistical);
    let result = classifier.classify(URGENT_PROBLEM).await.unwrap();

    assert!((result.probabilities.sum() - 1.0).abs() < 1e-4);
}

#[tokio::test]
async fn keyword_probabilities_stay_within_unit_mass() {
    let classifier = build(StrategyKind::KeywordBased);

    for message in [PRICING_INQUIRY, URGENT_PROBLEM, GREETING, MIXED_SIGNALS] {
        let result = classifier.classify(message).await.unwrap();
        assert!(
            result.probabilities.sum() <= 1.0 + 1e-4,
            "probability mass exceeded 1.0 for {message:?}"
        );
    }
}

#[tokio::test]
async fn statistical_training_needs_enough_balanced_input() {
    let mut classifier = build(StrategyKind::Statistical);

    let few: Vec<String> = (0..3).map(|i| format!("mensaje {i}")).collect();
    let few_labels = vec![Category::Other; 3];
    let err = classifier.train(&few, &few_labels).await.unwrap_err();
    assert!(matches!(err, Error::InsufficientData(_)));

    let many: Vec<String> = (0..12).map(|i| format!("mensaje {i}")).collect();
    let short_labels = vec![Category::Other; 11];
    let err = classifier.train(&many, &short_labels).await.unwrap_err();
    assert!(matches!(err, Error::InsufficientData(_)));
}

#[tokio::test]
async fn retraining_keeps_the_strategy_usable() {
    let mut classifier = build(StrategyKind::Statistical);

    let messages: Vec<String> = [
        "quiero comprar el plan grande",
        "necesito el precio del servicio",
        "me interesa una cotización",
        "quisiera contratar soporte premium",
        "cuánto cuesta la licencia",
        "oferta y descuento por volumen",
        "la aplicación no funciona bien",
        "tengo un error en la pantalla",
        "necesito ayuda con mi cuenta",
        "el sistema está roto otra vez",
        "problema urgente con el pago",
        "falla técnica en el servidor",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    let labels = vec![
        Category::Sales,
        Category::Sales,
        Category::Sales,
        Category::Sales,
        Category::Sales,
        Category::Sales,
        Category::Support,
        Category::Support,
        Category::Support,
        Category::Support,
        Category::Support,
        Category::Support,
    ];

    classifier.train(&messages, &labels).await.unwrap();
    assert!(classifier.is_trained());

    let result = classifier
        .classify("quiero comprar y me interesa el precio")
        .await
        .unwrap();
    assert_eq!(result.category, Category::Sales);
}

#[tokio::test]
async fn factory_default_matches_configuration() {
    let config = ClassifierConfig::from_yaml("strategy: zero-shot").unwrap();
    let classifier = StrategyFactory::new(config).create(None).unwrap();
    assert_eq!(classifier.name(), "zero-shot");

    let fallback = StrategyFactory::default().create(None).unwrap();
    assert_eq!(fallback.name(), "statistical");
}

#[test]
fn unknown_selector_is_a_configuration_error() {
    let err = ClassifierConfig::from_yaml("strategy: transformer").unwrap_err();
    assert!(matches!(err, Error::Config(_)));

    let err = "transformer".parse::<StrategyKind>().unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
