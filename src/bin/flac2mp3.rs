//! flac2mp3: convert every FLAC under a folder to 320 kbps MP3.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use tunekit::core::convert::FfmpegEncoder;
use tunekit::core::error::PromptError;
use tunekit::core::ports::{FolderPicker, Interaction};
use tunekit::term::converter::ConvertSession;
use tunekit::term::picker::OsaFolderPicker;
use tunekit::term::stdio::StdinIo;
use tunekit::term::{init_tracing, spawn_interrupt_watcher};

#[derive(Parser, Debug)]
#[command(name = "flac2mp3")]
#[command(about = "Convert FLAC files to 320 kbps MP3, keeping tags and cover art", long_about = None)]
struct Args {
    /// Folder to convert (skips the folder picker)
    #[arg(short, long)]
    folder: Option<PathBuf>,

    /// ffmpeg binary to use
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg: PathBuf,

    /// Preview only; don't ask
    #[arg(long)]
    dry_run: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);
    spawn_interrupt_watcher();

    match run(args) {
        Ok(code) => code,
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

fn run(args: Args) -> Result<ExitCode> {
    let mut io = StdinIo::stdin();
    let rule = "=".repeat(60);
    io.say(&format!("{rule}\n  FLAC to MP3 Converter for macOS\n{rule}"));

    let encoder = FfmpegEncoder::new(&args.ffmpeg);
    if let Err(e) = encoder.check() {
        tracing::debug!(error = %e, binary = %encoder.binary().display(), "encoder check failed");
        io.say("\n❌ ERROR: FFmpeg is not installed or not found in PATH");
        io.say("\nTo install FFmpeg on macOS, run:");
        io.say("    brew install ffmpeg");
        io.say("\nIf you don't have Homebrew, install it from: https://brew.sh");
        return Ok(ExitCode::from(1));
    }

    let root = match args.folder {
        Some(folder) => folder,
        None => {
            io.say("\n📂 Opening folder picker...");
            match OsaFolderPicker.pick_folder("Select folder containing FLAC files:") {
                Some(folder) => folder,
                None => {
                    io.say("\n⚠️  Folder selection cancelled");
                    io.say("\n👋 Goodbye!");
                    return Ok(ExitCode::SUCCESS);
                }
            }
        }
    };
    io.say(&format!("\n✅ Selected folder: {}", root.display()));

    let dry_run = args.dry_run.then_some(true);
    ConvertSession::new(&mut io, &encoder).run(&root, dry_run)?;

    Ok(ExitCode::SUCCESS)
}
