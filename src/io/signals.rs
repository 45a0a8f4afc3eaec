//! Signal handling for the gammacycle process.
//!
//! A background thread turns Unix signals into [`SignalMessage`]s on a
//! channel. The main thread waits on that channel and decides what to do:
//! reload the configuration or shut the engine down.

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM, SIGUSR2},
    iterator::Signals,
};
use std::{
    sync::Arc,
    sync::atomic::{AtomicBool, Ordering},
    sync::mpsc::{self, Receiver, Sender},
    thread,
};

/// What a received signal asks the process to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalMessage {
    /// Configuration reload signal (SIGUSR2)
    Reload,
    /// Shutdown signal (SIGTERM, SIGINT, SIGHUP)
    Shutdown { signal: i32 },
}

/// Signal handling state shared between threads
pub struct SignalState {
    /// Cleared once a shutdown signal arrives
    pub running: Arc<AtomicBool>,
    /// Channel receiver for signal messages
    pub signal_receiver: Receiver<SignalMessage>,
}

impl SignalState {
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Map a raw signal number to the message it produces.
pub fn message_for(signal: i32) -> Option<SignalMessage> {
    match signal {
        SIGUSR2 => Some(SignalMessage::Reload),
        SIGINT | SIGTERM | SIGHUP => Some(SignalMessage::Shutdown { signal }),
        _ => None,
    }
}

/// Set up signal handling for the application.
///
/// Spawns a background thread that forwards signals to the returned
/// [`SignalState`]'s channel. The thread ends after the first shutdown signal
/// or once the receiver is dropped.
pub fn setup_signal_handler(debug_enabled: bool) -> Result<SignalState> {
    let running = Arc::new(AtomicBool::new(true));
    let (signal_sender, signal_receiver) = mpsc::channel::<SignalMessage>();

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP, SIGUSR2])
        .context("failed to register signal handlers")?;

    let running_clone = Arc::clone(&running);
    thread::Builder::new()
        .name("signal-handler".to_string())
        .spawn(move || {
            for sig in signals.forever() {
                if !forward_signal(sig, &running_clone, &signal_sender, debug_enabled) {
                    break;
                }
            }
        })
        .context("failed to spawn signal handler thread")?;

    Ok(SignalState {
        running,
        signal_receiver,
    })
}

/// Forward one signal. Returns false when the handler thread should stop.
fn forward_signal(
    sig: i32,
    running: &AtomicBool,
    sender: &Sender<SignalMessage>,
    debug_enabled: bool,
) -> bool {
    let Some(message) = message_for(sig) else {
        return true;
    };

    if debug_enabled {
        log_pipe!();
        log_debug!("Received signal {}", sig);
    }

    if let SignalMessage::Shutdown { .. } = message {
        running.store(false, Ordering::SeqCst);
    }

    // A closed channel means the main thread is gone
    sender.send(message).is_ok() && running.load(Ordering::SeqCst)
}
