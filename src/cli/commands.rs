use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;

use crate::app::App;
use crate::config::AppConfig;
use crate::listing::{ListingRow, NoteListing};
use crate::storage::{NoteSummary, VaultStore};

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Print a JSON array instead of aligned text
    #[arg(long)]
    pub json: bool,
}

pub fn run_tui(config: Arc<AppConfig>, store: VaultStore) -> Result<()> {
    if !atty::is(atty::Stream::Stdout) || !atty::is(atty::Stream::Stdin) {
        bail!("gotion needs an interactive terminal; try `gotion list` instead");
    }
    let mut app = App::new(config, store);
    app.run()
}

pub fn list_notes(store: &VaultStore, args: ListArgs) -> Result<()> {
    let notes = NoteListing::new(store.clone())
        .refresh()
        .context("listing vault")?;
    let output = if args.json {
        format_json(&notes)?
    } else {
        format_table(&notes)
    };
    print!("{output}");
    Ok(())
}

fn format_json(notes: &[NoteSummary]) -> Result<String> {
    let rows: Vec<ListingRow<'_>> = notes.iter().map(ListingRow::from).collect();
    let mut json = serde_json::to_string_pretty(&rows).context("serializing listing")?;
    json.push('\n');
    Ok(json)
}

fn format_table(notes: &[NoteSummary]) -> String {
    if notes.is_empty() {
        return "No notes found.\n".to_string();
    }
    let width = notes
        .iter()
        .map(|note| note.title.chars().count())
        .max()
        .unwrap_or(0);
    let mut output = String::new();
    for note in notes {
        let _ = writeln!(
            output,
            "{:<width$}  {}",
            note.title,
            note.description(),
            width = width
        );
    }
    output
}
