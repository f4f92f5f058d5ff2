//! mp3tagger: interactive batch tag editor with MusicBrainz / Discogs lookup.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use tunekit::core::config;
use tunekit::core::error::PromptError;
use tunekit::core::lookup::{DiscogsClient, Lookup, MusicBrainzClient};
use tunekit::core::ports::{FolderPicker, Interaction};
use tunekit::core::tags::Id3Store;
use tunekit::term::picker::{OsaCoverPicker, OsaFolderPicker};
use tunekit::term::stdio::StdinIo;
use tunekit::term::tagger::{TagSession, offer_discogs_setup};
use tunekit::term::{init_tracing, spawn_interrupt_watcher};

#[derive(Parser, Debug)]
#[command(name = "mp3tagger")]
#[command(about = "Batch-edit MP3 tags with bulk values and online lookup", long_about = None)]
struct Args {
    /// Folder to tag (skips the folder picker)
    #[arg(short, long)]
    folder: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);
    spawn_interrupt_watcher();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if matches!(e.downcast_ref::<PromptError>(), Some(PromptError::Closed)) => {
            println!("\n👋 Goodbye!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("\n\n❌ Unexpected error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// MusicBrainz always (when the client builds), Discogs only with a token.
fn build_lookup(config: &config::Config) -> Lookup {
    let mut lookup = Lookup::new();

    match MusicBrainzClient::new() {
        Ok(mb) => lookup = lookup.with_backend(Box::new(mb)),
        Err(e) => tracing::warn!(error = %e, "MusicBrainz lookup disabled"),
    }

    if let Some(token) = config.discogs_token() {
        match DiscogsClient::new(token) {
            Ok(dc) => lookup = lookup.with_backend(Box::new(dc)),
            Err(e) => tracing::warn!(error = %e, "Discogs lookup disabled"),
        }
    }

    lookup
}

fn run(args: Args) -> Result<()> {
    let mut io = StdinIo::stdin();
    let rule = "=".repeat(80);
    io.say(&format!("{rule}\n  MP3 METADATA TAGGER for macOS\n{rule}"));

    let config = offer_discogs_setup(&mut io, config::load(), |c| config::save(c).map(|_| ()))?;
    let lookup = build_lookup(&config);

    let root = match args.folder {
        Some(folder) => folder,
        None => {
            io.say("\n📂 Opening folder picker...");
            match OsaFolderPicker.pick_folder("Select folder containing MP3 files:") {
                Some(folder) => folder,
                None => {
                    io.say("\n👋 Goodbye!");
                    return Ok(());
                }
            }
        }
    };
    io.say(&format!("\n✅ Selected folder: {}", root.display()));

    let mut tags = Id3Store;
    let mut covers = OsaCoverPicker;
    TagSession::new(&mut io, &mut tags, &mut covers, &lookup).run(&root)?;

    Ok(())
}
