use anyhow::{Context, Result};
use chrono::NaiveDate;

use mneme_lib::review::ReviewOutcome;

use crate::app::{excerpt, App};
use crate::OutputFormat;

/// CLI spelling of a review outcome
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Outcome {
    Remembered,
    Forgot,
}

impl From<Outcome> for ReviewOutcome {
    fn from(o: Outcome) -> Self {
        match o {
            Outcome::Remembered => ReviewOutcome::Remembered,
            Outcome::Forgot => ReviewOutcome::Forgot,
        }
    }
}

pub fn run(
    app: &mut App,
    id_prefix: &str,
    outcome: Outcome,
    today: NaiveDate,
    format: &OutputFormat,
) -> Result<()> {
    let item = app.find_item(id_prefix)?;
    let updated = app
        .store
        .review(item.id, outcome.into(), today)
        .context("Item not found")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": updated.id.to_string(),
                "stage": updated.stage,
                "stageLabel": updated.stage_label(),
                "nextReview": updated.next_review.map(|d| d.to_string()),
                "mastered": updated.mastered,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let label = excerpt(&updated.content, 50);
            if updated.mastered {
                println!("\"{}\" is mastered. No more reviews scheduled.", label);
            } else if let Some(next) = updated.next_review {
                println!(
                    "\"{}\" -> stage {} ({}), next review {}",
                    label,
                    updated.stage,
                    updated.stage_label().unwrap_or("?"),
                    next
                );
            }
        }
    }

    Ok(())
}
