use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Result;

use mneme_lib::review::UNDO_WINDOW;

use crate::app::{excerpt, App};
use crate::OutputFormat;

pub fn run(app: &mut App, id_prefix: &str, assume_yes: bool, format: &OutputFormat) -> Result<()> {
    let item = app.find_item(id_prefix)?;
    let label = excerpt(&item.content, 50);

    if !assume_yes {
        print!("Delete \"{}\"? [y/N] ", label);
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    app.store.delete(item.id);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "deleted": item.id.to_string() });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Deleted \"{}\"", label);
            // transient undo affordance; skipped when scripted with --yes
            if !assume_yes {
                print!("Type u + Enter within {} s to undo: ", UNDO_WINDOW.as_secs());
                io::stdout().flush()?;
                let undo_requested = read_line_within(UNDO_WINDOW)
                    .map_or(false, |line| line.trim() == "u");
                if undo_requested && app.store.restore() {
                    println!("Restored \"{}\"", label);
                } else {
                    println!();
                }
            }
        }
    }

    Ok(())
}

/// Read one stdin line, giving up after `window`
fn read_line_within(window: Duration) -> Option<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_ok() {
            let _ = tx.send(line);
        }
    });
    rx.recv_timeout(window).ok()
}
