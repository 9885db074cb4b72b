//! History commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::history::{History, HistoryEntry};
use crate::output::{display_option, print_output, print_single, print_success, OutputFormat};

use super::{parse_kind, CommandContext};

/// Show and manage generation history.
#[derive(Debug, Args)]
pub struct HistoryCommand {
    #[command(subcommand)]
    command: HistorySubcommand,
}

#[derive(Debug, Subcommand)]
enum HistorySubcommand {
    /// List recorded identifiers, newest first.
    List(ListHistoryArgs),

    /// Mark or unmark an entry as favorite.
    Favorite(FavoriteArgs),

    /// Remove entries. Favorites are kept unless --all is given.
    Clear(ClearArgs),
}

#[derive(Debug, Args)]
struct ListHistoryArgs {
    /// Only entries of this kind.
    #[arg(long)]
    kind: Option<String>,

    /// Only favorites.
    #[arg(long)]
    favorites: bool,

    /// Maximum number of entries to show.
    #[arg(long, default_value = "20")]
    limit: usize,
}

#[derive(Debug, Args)]
struct FavoriteArgs {
    /// Entry number as shown by `history list`.
    number: usize,
}

#[derive(Debug, Args)]
struct ClearArgs {
    /// Remove favorites too.
    #[arg(long)]
    all: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct HistoryRow {
    #[tabled(rename = "#")]
    number: usize,

    #[tabled(rename = "Kind")]
    kind: String,

    #[tabled(rename = "Value")]
    formatted: String,

    #[tabled(rename = "Brand", display = "display_option")]
    brand: Option<String>,

    #[tabled(rename = "Created")]
    created_at: String,

    #[tabled(rename = "Fav", display = "display_favorite")]
    favorite: bool,
}

fn display_favorite(favorite: &bool) -> String {
    if *favorite { "*" } else { "" }.to_string()
}

impl HistoryRow {
    fn new(number: usize, entry: &HistoryEntry) -> Self {
        Self {
            number,
            kind: entry.kind.label().to_string(),
            formatted: entry.formatted.clone(),
            brand: entry.brand.map(|b| b.to_string()),
            created_at: entry.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            favorite: entry.favorite,
        }
    }
}

impl HistoryCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            HistorySubcommand::List(args) => list(ctx, args),
            HistorySubcommand::Favorite(args) => favorite(ctx, args),
            HistorySubcommand::Clear(args) => clear(ctx, args),
        }
    }
}

fn list(ctx: CommandContext, args: ListHistoryArgs) -> Result<()> {
    let kind = args.kind.as_deref().map(parse_kind).transpose()?;
    let history = History::open(&ctx.home)?;
    let entries = history.list(kind, args.favorites);

    match ctx.format {
        OutputFormat::Table => {
            let rows: Vec<HistoryRow> = entries
                .iter()
                .take(args.limit)
                .map(|(number, entry)| HistoryRow::new(*number, entry))
                .collect();
            print_output(&rows, ctx.format);
        }
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct Numbered<'a> {
                number: usize,
                #[serde(flatten)]
                entry: &'a HistoryEntry,
            }
            let items: Vec<Numbered<'_>> = entries
                .iter()
                .take(args.limit)
                .map(|(number, entry)| Numbered {
                    number: *number,
                    entry,
                })
                .collect();
            print_single(&items);
        }
    }
    Ok(())
}

fn favorite(ctx: CommandContext, args: FavoriteArgs) -> Result<()> {
    let mut history = History::open(&ctx.home)?;
    let now_favorite = history.toggle_favorite(args.number)?;
    history.save()?;

    match ctx.format {
        OutputFormat::Json => print_single(&serde_json::json!({
            "number": args.number,
            "favorite": now_favorite,
        })),
        OutputFormat::Table if now_favorite => {
            print_success(&format!("Entry #{} marked as favorite", args.number))
        }
        OutputFormat::Table => print_success(&format!("Entry #{} unmarked", args.number)),
    }
    Ok(())
}

fn clear(ctx: CommandContext, args: ClearArgs) -> Result<()> {
    let mut history = History::open(&ctx.home)?;
    let removed = history.clear(args.all);
    history.save()?;

    match ctx.format {
        OutputFormat::Json => print_single(&serde_json::json!({
            "removed": removed,
            "remaining": history.len(),
        })),
        OutputFormat::Table => print_success(&format!("Removed {removed} history entries")),
    }
    Ok(())
}
