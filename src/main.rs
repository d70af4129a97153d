//! sendkey CLI entry point.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sendkey::{DiscoveryStrategy, InjectorConfig, KeyCode, KeyInjector};

/// Inject a single key press and release into a Linux input device.
///
/// With no DEVICE argument the keyboard is discovered automatically: every
/// /dev/input/event* node is asked whether it supports KEYCODE, then the
/// /dev/input/by-path/*-event-kbd names are tried as a fallback.
#[derive(Parser)]
#[command(
    version,
    about,
    after_help = "Examples:\n  sendkey 125\n  sendkey 125 /dev/input/event3"
)]
struct Cli {
    /// Numeric evdev keycode to tap (e.g. 125 for KEY_LEFTMETA).
    ///
    /// Parsed like C's atoi: leading digits count, trailing junk is ignored, and the
    /// value is truncated to 16 bits. Text with no leading digits means code 0.
    keycode: String,

    /// Device node to write to (e.g. /dev/input/event3); skips discovery.
    device: Option<PathBuf>,

    /// Skip the SYN_REPORT marker after each key event.
    #[arg(long)]
    no_sync: bool,

    /// Only use the /dev/input/by-path names, never probe device capabilities.
    #[arg(long)]
    by_path_only: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let key = KeyCode::parse_lossy(&cli.keycode);
    let config = InjectorConfig {
        emit_sync: !cli.no_sync,
        discovery: if cli.by_path_only {
            DiscoveryStrategy::ByPathOnly
        } else {
            DiscoveryStrategy::CapabilityThenByPath
        },
    };

    match KeyInjector::new(config).run(key, cli.device.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("sendkey: {err}");
            ExitCode::FAILURE
        }
    }
}
