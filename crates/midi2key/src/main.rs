//! midi2key - use a MIDI keyboard as a computer keyboard
//!
//! Connects a MIDI input to a uinput virtual keyboard and translates events
//! until the input closes or Ctrl-C is pressed.

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::RecvTimeoutError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use midi2key::{
    keymap::FeatureConfig,
    midi::{self, MidiSource},
    translate::dispatch,
    uinput::{KeyboardOutput, UinputKeyboard},
};

/// How often the receive loop wakes up to check the shutdown flag.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "midi2key")]
#[command(author, version, about = "Use a MIDI keyboard as a computer keyboard", long_about = None)]
struct Cli {
    /// Enable modifier keys (Ctrl, Shift, Alt) via MIDI keys
    #[arg(short, long)]
    modifier_keys: bool,

    /// MIDI input port to connect to (substring match, case-insensitive).
    /// When omitted, a virtual input port is created instead.
    midi_source: Option<String>,

    /// List available MIDI input ports and exit
    #[arg(long)]
    list_ports: bool,

    /// ALSA client name
    #[arg(long, default_value = "midi2key")]
    client_name: String,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.list_ports {
        let ports = midi::list_ports()?;
        if ports.is_empty() {
            println!("No MIDI input ports found");
        } else {
            println!("Available MIDI input ports:");
            for port in ports {
                println!("  {}", port);
            }
        }
        return Ok(());
    }

    let features = FeatureConfig {
        modifier_keys: cli.modifier_keys,
    };

    let mut keyboard = UinputKeyboard::create("midi2key virtual keyboard")
        .context("Failed to register the uinput virtual keyboard")?;

    let source = MidiSource::open(&cli.client_name, cli.midi_source.as_deref())
        .context("Failed to open MIDI input")?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_flag = shutdown.clone();
    ctrlc::set_handler(move || {
        shutdown_flag.store(true, Ordering::SeqCst);
    })
    .context("Failed to install Ctrl-C handler")?;

    log::info!(
        "Translating {} -> {} (modifier keys {})",
        source.port_label(),
        keyboard.device_name(),
        if features.modifier_keys {
            "enabled"
        } else {
            "disabled"
        }
    );

    run_loop(&source, &mut keyboard, &features, &shutdown)
}

fn run_loop(
    source: &MidiSource,
    keyboard: &mut dyn KeyboardOutput,
    features: &FeatureConfig,
    shutdown: &AtomicBool,
) -> Result<()> {
    loop {
        if shutdown.load(Ordering::SeqCst) {
            log::info!("Shutting down");
            return Ok(());
        }

        match source.events().recv_timeout(POLL_INTERVAL) {
            Ok(event) => dispatch(&event, features, keyboard)?,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                log::warn!("MIDI input closed, exiting");
                return Ok(());
            }
        }
    }
}
