//! Library Extender - search for songs, download them and tag them.
//!
//! Looks a song up on YouTube, resolves its album metadata, lyrics and cover
//! art from several public sources, then downloads the audio as MP3 into the
//! library folder with full ID3 tags. Runs as a GUI application or through
//! CLI commands.

// Hide console window on Windows when running as GUI
// CLI commands will attach to the parent console or allocate one
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

pub mod cache;
pub mod cli;
pub mod config;
pub mod download;
pub mod enrichment;
pub mod error;
pub mod metadata;
pub mod model;
pub mod session;
#[cfg(test)]
pub mod test_utils;
pub mod ui;
pub mod video;

use clap::Parser;
use clap::error::ErrorKind;
use iced::{Size, application, window};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use ui::LibraryExtender;

fn main() -> anyhow::Result<()> {
    let args = match cli::Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            #[cfg(target_os = "windows")]
            attach_console();

            let _ = e.print();
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            std::process::exit(code);
        }
    };

    // If running CLI commands on Windows, attach to console for output
    #[cfg(target_os = "windows")]
    if args.cli || args.command.is_some() {
        attach_console();
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("library_extender=info".parse()?))
        .init();

    // Try to run a CLI command
    if cli::run_command(&args)? {
        // A command was executed, exit normally
        return Ok(());
    }

    // No command specified, launch the GUI
    application("Library Extender", LibraryExtender::update, LibraryExtender::view)
        .subscription(LibraryExtender::subscription)
        .window(window::Settings {
            size: Size::new(1100.0, 720.0),
            min_size: Some(Size::new(800.0, 560.0)),
            exit_on_close_request: false,
            ..Default::default()
        })
        .run_with(LibraryExtender::new)
        .map_err(|e| anyhow::anyhow!("GUI Error: {}", e))
}

/// Attach to parent console on Windows for CLI output.
/// This is needed because windows_subsystem = "windows" detaches from console.
#[cfg(target_os = "windows")]
fn attach_console() {
    use windows_sys::Win32::System::Console::{ATTACH_PARENT_PROCESS, AttachConsole};
    unsafe {
        // If that fails, we just won't have console output
        let _ = AttachConsole(ATTACH_PARENT_PROCESS);
    }
}
