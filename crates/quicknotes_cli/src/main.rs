//! Terminal host for QuickNotes.
//!
//! # Responsibility
//! - Drive `NotesController` from command-line arguments.
//! - Print the rendered grid as text cards, a node outline, or HTML.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quicknotes_core::{
    init_logging, init_stderr_logging, open_repository, Element, NodeContainer, NoteId,
    NotesConfig, NotesController, Outcome, Renderer, UiEvent, NOTE_DATE_CLASS, NOTE_TEXT_CLASS,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quicknotes")]
#[command(version, about = "Minimal persistent note cards")]
struct Cli {
    /// Extra config file layered over user/project config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite file holding the notes slot
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Locale tag for date labels (e.g. en-US, en-GB, de-DE)
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Add a note; whitespace-only text is ignored
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Delete a note by id
    Delete { id: String },
    /// Show all notes, newest first
    List,
    /// Print the rendered card tree
    Render {
        /// Emit HTML instead of an outline
        #[arg(long)]
        html: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = NotesConfig::load(cli.config.as_deref()).context("failed to load config")?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    init_host_logging(&config, cli.verbose);

    let repo = open_repository(&config)
        .with_context(|| format!("failed to open notes store `{}`", config.db_path.display()))?;
    let renderer = Renderer::new(NodeContainer::new(), config.date_format());
    let mut controller = NotesController::new(repo, renderer);
    controller.mount();

    match cli.command {
        Command::Add { text } => {
            if controller.add_text(text.join(" ")) == Outcome::Ignored {
                println!("Nothing to add: note text is empty.");
            }
            print_grid(controller.target());
        }
        Command::Delete { id } => {
            controller.handle(UiEvent::DeleteClicked(NoteId::new(id)));
            print_grid(controller.target());
        }
        Command::List => print_grid(controller.target()),
        Command::Render { html } => {
            let target = controller.target();
            if html {
                println!("{}", target.to_html());
            } else {
                for node in target.children() {
                    print!("{}", node.outline());
                }
            }
        }
    }

    Ok(())
}

fn init_host_logging(config: &NotesConfig, verbose: bool) {
    let result = if verbose {
        init_stderr_logging("debug")
    } else if let Some(dir) = &config.log_dir {
        init_logging(&config.log_level, &dir.to_string_lossy())
    } else {
        return;
    };
    if let Err(err) = result {
        eprintln!("warning: logging disabled: {err}");
    }
}

fn print_grid(container: &NodeContainer) {
    if let Some(message) = container.placeholder() {
        println!("{message}");
        return;
    }
    for card in container.cards() {
        println!("{}", format_card(card));
    }
}

fn format_card(card: &Element) -> String {
    let id = card.attribute("data-id").unwrap_or_default();
    let date = card
        .find_by_class(NOTE_DATE_CLASS)
        .map(Element::text_content)
        .unwrap_or_default();
    let text = card
        .find_by_class(NOTE_TEXT_CLASS)
        .map(Element::text_content)
        .unwrap_or_default();
    let body = text
        .lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("[{id}] {date}\n{body}\n")
}
