use anyhow::{bail, Result};
use chrono::NaiveDate;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, content: &str, today: NaiveDate, format: &OutputFormat) -> Result<()> {
    let Some(item) = app.store.add(content, today) else {
        bail!("Nothing to add: content is empty");
    };

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": item.id.to_string(),
                "content": item.content,
                "createdAt": item.created_at.to_string(),
                "nextReview": item.next_review.map(|d| d.to_string()),
                "stage": item.stage,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Tracking \"{}\"", item.content);
            if let Some(next) = item.next_review {
                println!("  First review: {}", next);
            }
            println!("  ID: {}", item.id);
        }
    }

    Ok(())
}
