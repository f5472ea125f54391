mod cli;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use cli::{Cli, Commands};
use mailroom_automation::AutomationService;
use mailroom_classifiers::{
    ClassificationResult, Classifier, ClassifierConfig, KeywordClassifier, StrategyFactory,
    StrategyKind,
};
use mailroom_core::{Category, ContactRecord, ContactRequest};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Classify {
            message,
            strategy,
            config,
            json,
            verbose,
        } => {
            init_logging(verbose);

            let factory = StrategyFactory::new(load_config(config.as_deref())?);
            let classifier = factory.create(strategy)?;
            let result = classifier.classify(&message).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!();
                println!("  Strategy:   {}", classifier.name());
                print_result(&result);
                println!();
            }
        }

        Commands::Preview {
            message,
            json,
            verbose,
        } => {
            init_logging(verbose);

            let classifier = KeywordClassifier::new()?;
            let details = classifier.classification_details(&message)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&details)?);
            } else {
                println!();
                println!("  Preview:         {}", details.message_preview);
                println!("  Sales matches:   {}", format_matches(&details.sales_matches));
                println!(
                    "  Support matches: {}",
                    format_matches(&details.support_matches)
                );
                println!("  Category:        {}", details.final_category);
                println!();
            }
        }

        Commands::Intake {
            message,
            name,
            email,
            strategy,
            config,
            json,
            verbose,
        } => {
            init_logging(verbose);

            let request = ContactRequest::new(name, email, message);
            request.validate()?;

            let factory = StrategyFactory::new(load_config(config.as_deref())?);
            let classifier = factory.create(strategy)?;
            let result = classifier.classify(&request.message).await?;

            let record = ContactRecord::from_request(
                Utc::now().timestamp_millis(),
                request,
                result.category,
            );
            let outcome = AutomationService::new().execute(&record).await?;

            if json {
                let payload = serde_json::json!({
                    "contact": record,
                    "classification": result,
                    "automation": outcome,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!();
                println!("  Contact:    {} <{}>", record.name, record.email);
                println!("  Category:   {}", record.category);
                println!("  Confidence: {:.2}", result.confidence);
                println!("  Automation: {}", outcome.action());
                println!();
            }
        }

        Commands::Compare {
            message,
            config,
            verbose,
        } => {
            init_logging(verbose);

            let factory = StrategyFactory::new(load_config(config.as_deref())?);
            let mut classifiers = Vec::new();
            for kind in StrategyKind::ALL {
                classifiers.push(factory.create(Some(kind))?);
            }

            let results = futures::future::join_all(
                classifiers
                    .iter()
                    .map(|classifier| classifier.classify(&message)),
            )
            .await;

            println!();
            println!(
                "  {:<22} {:<10} {:<12} keywords",
                "strategy", "category", "confidence"
            );
            for (classifier, result) in classifiers.iter().zip(results) {
                match result {
                    Ok(result) => println!(
                        "  {:<22} {:<10} {:<12.2} {}",
                        classifier.name(),
                        result.category.label(),
                        result.confidence,
                        result.matched_keywords.join(", ")
                    ),
                    Err(e) => println!("  {:<22} failed: {e}", classifier.name()),
                }
            }
            println!();
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ClassifierConfig> {
    match path {
        Some(path) => {
            let config = ClassifierConfig::from_file(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?;
            tracing::info!(path = %path.display(), "loaded configuration file");
            Ok(config)
        }
        None => Ok(ClassifierConfig::default()),
    }
}

fn print_result(result: &ClassificationResult) {
    println!("  Category:   {}", result.category);
    println!("  Confidence: {:.2}", result.confidence);
    println!("  Probabilities:");
    for category in Category::ALL {
        println!(
            "    {:<8} {:.3}",
            category.label(),
            result.probabilities.get(category)
        );
    }
    if !result.matched_keywords.is_empty() {
        println!("  Keywords:   {}", result.matched_keywords.join(", "));
    }
}

fn format_matches(matches: &[String]) -> String {
    if matches.is_empty() {
        "(none)".to_string()
    } else {
        matches.join(", ")
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "mailroom=debug,mailroom_core=debug,mailroom_classifiers=debug,mailroom_automation=debug"
    } else {
        "mailroom=info,mailroom_core=info,mailroom_classifiers=info,mailroom_automation=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
