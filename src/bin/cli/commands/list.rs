use anyhow::Result;
use chrono::NaiveDate;

use mneme_lib::review::ReviewItem;

use crate::app::{excerpt, short_id, App};
use crate::{ListFilter, OutputFormat};

pub fn run(app: &App, filter: ListFilter, today: NaiveDate, format: &OutputFormat) -> Result<()> {
    let parts = app.store.classify(today);
    let rows: Vec<&ReviewItem> = match filter {
        ListFilter::Due => parts.due,
        ListFilter::Upcoming => parts.future,
        ListFilter::Mastered => parts.mastered,
        ListFilter::All => app.store.items().iter().collect(),
    };

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = rows
                .iter()
                .map(|item| {
                    serde_json::json!({
                        "id": item.id.to_string(),
                        "content": item.content,
                        "createdAt": item.created_at.to_string(),
                        "nextReview": item.next_review.map(|d| d.to_string()),
                        "stage": item.stage,
                        "stageLabel": item.stage_label(),
                        "mastered": item.mastered,
                        "reviewCount": item.history.len(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if rows.is_empty() {
                let slice = match filter {
                    ListFilter::Due => "due",
                    ListFilter::Upcoming => "upcoming",
                    ListFilter::Mastered => "mastered",
                    ListFilter::All => "tracked",
                };
                println!("No {} items.", slice);
                return Ok(());
            }

            let content_width = 44;
            println!(
                "{:<8} {:<10} {:<20} {}",
                "ID", "Next", "Stage", "Content"
            );
            println!(
                "{} {} {} {}",
                "\u{2500}".repeat(8),
                "\u{2500}".repeat(10),
                "\u{2500}".repeat(20),
                "\u{2500}".repeat(content_width)
            );

            for item in &rows {
                let next = item
                    .next_review
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string());
                let stage = if item.mastered {
                    "mastered".to_string()
                } else {
                    item.stage_label().unwrap_or("?").to_string()
                };

                println!(
                    "{:<8} {:<10} {:<20} {}",
                    short_id(&item.id),
                    next,
                    stage,
                    excerpt(&item.content, content_width)
                );
            }

            println!("\n{} items", rows.len());
        }
    }

    Ok(())
}
