use std::collections::HashSet;
use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use chrono::NaiveDate;
use uuid::Uuid;

use mneme_lib::connectivity::{ConnectivityMonitor, NetProbe};
use mneme_lib::review::{ReviewOutcome, UNDO_WINDOW};

use crate::app::{short_id, App};
use crate::OutputFormat;

pub fn run(app: &mut App, today: NaiveDate, format: &OutputFormat) -> Result<()> {
    if matches!(format, OutputFormat::Json) {
        bail!("'review' is interactive; use 'mark' for scripted reviews");
    }

    let mut monitor = ConnectivityMonitor::new(NetProbe::default());
    let (online, _) = monitor.poll();

    let due = app.store.classify(today).due.len();
    if due == 0 {
        println!("Nothing due today.");
        return Ok(());
    }
    println!(
        "{} item(s) due{}",
        due,
        if online { "" } else { "  [OFFLINE]" }
    );

    let stdin = io::stdin();
    let mut skipped: HashSet<Uuid> = HashSet::new();

    loop {
        let next = {
            let parts = app.store.classify(today);
            parts
                .due
                .into_iter()
                .find(|i| !skipped.contains(&i.id))
                .cloned()
        };
        let Some(item) = next else { break };

        println!();
        println!("  {}", item.content);
        println!(
            "  stage {} ({})  id {}",
            item.stage,
            item.stage_label().unwrap_or("?"),
            short_id(&item.id)
        );
        print!("[r]emembered  [f]orgot  [d]elete  [s]kip  [u]ndo  [q]uit > ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        match input.trim() {
            "r" => {
                if let Some(updated) = app.store.review(item.id, ReviewOutcome::Remembered, today) {
                    if updated.mastered {
                        println!("Mastered. No more reviews scheduled.");
                    } else if let Some(next) = updated.next_review {
                        println!(
                            "Up to stage {} ({}), next review {}",
                            updated.stage,
                            updated.stage_label().unwrap_or("?"),
                            next
                        );
                    }
                }
            }
            "f" => {
                if let Some(updated) = app.store.review(item.id, ReviewOutcome::Forgot, today) {
                    if let Some(next) = updated.next_review {
                        println!("Back to stage 0, again {}", next);
                    }
                }
            }
            "d" => {
                app.store.delete(item.id);
                println!("Deleted (u within {} s to undo)", UNDO_WINDOW.as_secs());
            }
            "s" => {
                skipped.insert(item.id);
            }
            "u" => {
                if app.store.restore() {
                    println!("Undone.");
                } else {
                    println!("Nothing to undo (window elapsed).");
                }
            }
            "q" => break,
            other => println!("Unrecognized '{}': use r, f, d, s, u or q", other),
        }

        let (online, changed) = monitor.poll();
        if changed {
            println!("[{}]", if online { "back online" } else { "offline" });
        }
    }

    let stats = app.store.stats(today);
    let still_due = {
        let parts = app.store.classify(today);
        parts
            .due
            .iter()
            .filter(|i| !skipped.contains(&i.id))
            .count()
    };
    println!();
    println!(
        "Reviewed {} today; {} still due.",
        stats.reviews_today, still_due
    );

    Ok(())
}
