//! Main application entry point and high-level flow coordination.
//!
//! This module runs the application lifecycle after command-line argument
//! parsing is complete:
//!
//! 1. Argument parsing and early exit for help/version
//! 2. Configuration loading (a default file is created on first run)
//! 3. Engine construction with the logging sink and hotkey registrar
//! 4. Waiting on signals: reload on SIGUSR2, shut down on SIGINT/SIGTERM/SIGHUP
//! 5. Deterministic disposal of the engine and the file watcher

use anyhow::{Context, Result};
use std::sync::Arc;

use gammacycle::args::{self, CliAction, ParsedArgs};
use gammacycle::backend::LoggingSink;
use gammacycle::config::{self, FileSettingsSource, SettingsSource};
use gammacycle::io::foreground::NoForeground;
use gammacycle::io::hotkeys::LoggingRegistrar;
use gammacycle::io::signals::{SignalMessage, setup_signal_handler};
use gammacycle::time::RealTimeSource;
use gammacycle::{
    CycleEngine, EngineParams, log_block_start, log_debug, log_end, log_error, log_indented,
    log_info, log_pipe, log_version, log_warning,
};

fn main() -> Result<()> {
    let parsed_args = ParsedArgs::from_env();

    match parsed_args.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(())
        }
        CliAction::ShowHelp | CliAction::ShowHelpDueToError => {
            args::display_help();
            Ok(())
        }
        CliAction::Run {
            debug_enabled,
            config_path,
            preview,
        } => {
            config::loading::set_config_path(config_path)?;
            let result = run(debug_enabled, preview);
            if let Err(e) = &result {
                log_error!("{:#}", e);
                log_end!();
            }
            result
        }
    }
}

/// Run the cycle until a shutdown signal arrives.
fn run(debug_enabled: bool, preview: bool) -> Result<()> {
    log_version!();
    if debug_enabled {
        log_pipe!();
        log_debug!("Debug mode enabled - showing detailed engine operations");
    }

    // Creates the default file on first run and validates before watching
    config::load()?;
    let config_path = config::get_config_path()?;
    let settings_source = Arc::new(
        FileSettingsSource::start(&config_path, debug_enabled)
            .context("Failed to start configuration watcher")?,
    );

    let signal_state = setup_signal_handler(debug_enabled)?;

    let engine = CycleEngine::new(EngineParams {
        settings_source: Arc::clone(&settings_source) as Arc<dyn SettingsSource>,
        sink: Box::new(LoggingSink::new()),
        foreground: Box::new(NoForeground),
        hotkeys: Box::new(LoggingRegistrar::new()),
        clock: Arc::new(RealTimeSource),
        debug_enabled,
    });

    engine.on_view_ready()?;
    if preview {
        engine.enable_cycle_preview();
    }

    log_block_start!("Current state: {}", engine.cycle_state());
    log_indented!("Press Ctrl+C to stop");

    while let Ok(message) = signal_state.signal_receiver.recv() {
        match message {
            SignalMessage::Reload => {
                log_pipe!();
                log_info!("Reloading configuration");
                match settings_source.reload() {
                    Ok(true) => {}
                    Ok(false) => log_indented!("Configuration unchanged"),
                    Err(e) => {
                        log_warning!("Ignoring invalid configuration: {:#}", e);
                        log_indented!("Keeping the previous settings");
                    }
                }
            }
            SignalMessage::Shutdown { signal } => {
                if debug_enabled {
                    log_pipe!();
                    log_debug!("Shutdown requested by signal {}", signal);
                }
                break;
            }
        }
    }

    if signal_state.is_running() {
        log_warning!("Signal handler stopped unexpectedly");
    }

    log_block_start!("Shutting down gammacycle...");
    engine.dispose();
    settings_source.stop();
    log_end!();

    Ok(())
}
