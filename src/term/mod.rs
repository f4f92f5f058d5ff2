//! term/mod.rs
//!
//! Terminal front end shared by both binaries.
//! - `stdio`: stdin/stdout `Interaction`
//! - `picker`: macOS folder / image dialogs
//! - `converter` and `tagger`: the two interactive sessions
//!
//! The sessions only talk to the environment through the core ports, so
//! their tests run against fakes.

pub mod converter;
pub mod picker;
pub mod stdio;
pub mod tagger;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::ports::Interaction;

pub(crate) const WIDE: usize = 80;

/// `====` / title / `====`, `width` columns wide.
pub(crate) fn heading(io: &mut dyn Interaction, title: &str, width: usize) {
    let rule = "=".repeat(width);
    io.say(&format!("\n{rule}\n{title}\n{rule}"));
}

/// Logs go to stderr so prompts on stdout stay readable.
/// `RUST_LOG` wins over `--verbose`.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "tunekit=debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Ctrl-C anywhere (including mid-prompt) ends the process with status 1.
///
/// Runs a single-threaded runtime on its own thread; the sessions stay
/// fully blocking.
pub fn spawn_interrupt_watcher() {
    let spawned = std::thread::Builder::new()
        .name("ctrl-c".into())
        .spawn(|| {
            let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
                Ok(rt) => rt,
                Err(e) => {
                    tracing::warn!(error = %e, "could not start signal runtime");
                    return;
                }
            };

            rt.block_on(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::warn!(error = %e, "could not install Ctrl+C handler");
                    return;
                }
                println!("\n\n⚠️  Operation interrupted by user (Ctrl+C)");
                std::process::exit(1);
            });
        });

    if let Err(e) = spawned {
        tracing::warn!(error = %e, "could not spawn Ctrl+C watcher");
    }
}
