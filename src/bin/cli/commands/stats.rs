use anyhow::Result;
use chrono::NaiveDate;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, today: NaiveDate, format: &OutputFormat) -> Result<()> {
    let stats = app.store.stats(today);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "total": stats.total,
                "due": stats.due,
                "upcoming": stats.upcoming,
                "mastered": stats.mastered,
                "reviewsToday": stats.reviews_today,
                "rememberedToday": stats.remembered_today,
                "masteryRate": stats.mastery_rate(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Tracked items: {}", stats.total);
            println!("  Due today:   {}", stats.due);
            println!("  Upcoming:    {}", stats.upcoming);
            println!("  Mastered:    {} ({}%)", stats.mastered, stats.mastery_rate());
            if stats.reviews_today > 0 {
                println!(
                    "Reviewed today: {} ({} remembered)",
                    stats.reviews_today, stats.remembered_today
                );
            }
        }
    }

    Ok(())
}
