//! CLI command execution.

use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::SurfError;
use crate::gemini::GeminiClient;
use crate::models::{Accuracy, ConditionsSuggestion, RecommendationOutcome, SessionInput};
use crate::parser::paragraphs;
use crate::server;
use crate::shell::Shell;
use crate::store::{FeedbackStore, JsonFileStore, MemoryStore};

use super::args::{Cli, Commands};

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        Self {
            api_key: cli
                .api_key
                .clone()
                .or_else(|| std::env::var("API_KEY").ok()),
            model: cli.model.clone(),
            base_url: cli.base_url.clone(),
            data_dir: cli.data_dir.clone(),
            no_persist: cli.no_persist,
        }
    }
}

/// Pick the feedback store for this run.
fn build_store(config: &Config) -> Arc<dyn FeedbackStore> {
    if config.no_persist {
        return Arc::new(MemoryStore::default());
    }
    match config.feedback_path() {
        Some(path) => {
            let store = JsonFileStore::new(path);
            debug!(path = %store.path().display(), "Using feedback file");
            Arc::new(store)
        }
        None => {
            warn!("Could not find home directory; feedback will not be saved");
            Arc::new(MemoryStore::default())
        }
    }
}

fn build_shell(config: &Config) -> Shell {
    Shell::new(Arc::new(GeminiClient::new(config)), build_store(config))
}

// === Command Execution ===

pub async fn execute(cli: Cli) -> Result<()> {
    let config = Config::from(&cli);
    let shell = build_shell(&config);

    match cli.command {
        Commands::Recommend {
            session,
            autofill,
            json,
        } => recommend(&shell, session.into(), autofill, json).await,
        Commands::Autofill { spots } => lookup_conditions(&shell, &spots.join(" ")).await,
        Commands::Feedback { accuracy, comments } => {
            submit_feedback(&shell, accuracy.into(), &comments.join(" "))
        }
        Commands::History { corrections } => {
            show_history(&shell, corrections);
            Ok(())
        }
        Commands::Serve { port, open } => server::start_server(shell, port, open).await,
    }
}

async fn recommend(
    shell: &Shell,
    mut input: SessionInput,
    autofill: bool,
    json: bool,
) -> Result<()> {
    if autofill {
        match shell.autofill(&mut input).await {
            Ok(()) => println!("Filled conditions from live search."),
            Err(e) => {
                eprintln!("Warning: {e}");
                eprintln!("Continuing with the conditions you entered...");
            }
        }
    }

    if !json {
        println!("Analyzing the waves...");
    }

    let outcome = match shell.recommend(&input).await {
        Ok(outcome) => outcome,
        Err(e) => bail!(e.recommendation_message()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
        println!();
        println!("How was this forecast? Run: surfsensei feedback <accurate|inaccurate> [comment]");
    }
    Ok(())
}

fn print_outcome(outcome: &RecommendationOutcome) {
    let Some(recommendation) = &outcome.recommendation else {
        if let Some(notice) = &outcome.parse_notice {
            eprintln!("{notice}");
        }
        println!("{}", outcome.raw);
        return;
    };

    for (title, body) in recommendation.sections() {
        println!();
        println!("{title}");
        println!("{}", "-".repeat(title.len()));
        for paragraph in paragraphs(body) {
            println!("{paragraph}");
        }
    }
}

async fn lookup_conditions(shell: &Shell, spots: &str) -> Result<()> {
    if spots.trim().is_empty() {
        return Err(SurfError::MissingSpots.into());
    }
    let suggestion = shell.fetch_conditions(spots).await?;
    print_conditions(&suggestion);
    Ok(())
}

fn print_conditions(suggestion: &ConditionsSuggestion) {
    let rows = [
        ("Swell height (ft)", &suggestion.swell_height),
        ("Swell period (s)", &suggestion.swell_period),
        ("Swell direction", &suggestion.swell_direction),
        ("Wind speed (mph)", &suggestion.wind_speed),
        ("Wind direction", &suggestion.wind_direction),
        ("Tide height (ft)", &suggestion.tide_height),
    ];
    for (label, value) in rows {
        println!("{label:<20} {}", value.as_deref().unwrap_or("-"));
    }
    println!("{:<20} {}", "Tide direction", suggestion.tide_direction);
}

fn submit_feedback(shell: &Shell, accuracy: Accuracy, comments: &str) -> Result<()> {
    shell.submit_feedback(accuracy, comments)?;
    println!("Thanks for your feedback!");
    if accuracy == Accuracy::Inaccurate {
        println!("SurfSensei will use this to improve future recommendations.");
    }
    Ok(())
}

fn show_history(shell: &Shell, corrections_only: bool) {
    let history = shell.history();
    let records: Vec<_> = history
        .iter()
        .filter(|r| !corrections_only || r.correction().is_some())
        .collect();

    if records.is_empty() {
        println!("No feedback found.");
        return;
    }

    println!("{:<20} {:<12} {}", "TIMESTAMP", "ACCURACY", "COMMENTS");
    println!("{}", "-".repeat(60));
    for record in records {
        let comments = if record.comments.trim().is_empty() {
            "-"
        } else {
            record.comments.as_str()
        };
        println!(
            "{:<20} {:<12} {}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.accuracy,
            comments
        );
    }
}
