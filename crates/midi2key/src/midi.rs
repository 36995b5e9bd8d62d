//! MIDI input via midir (ALSA backend on Linux)
//!
//! The connection callback parses raw bytes and forwards typed events over a
//! channel; the driver loop receives from the other end. With no source name
//! given, a virtual input port is created that other ALSA clients can
//! connect to.

use crossbeam_channel::{unbounded, Receiver};
use midir::os::unix::VirtualInput;
use midir::{MidiInput, MidiInputConnection};

use crate::error::{Error, Result};
use crate::event::MidiEvent;

/// Port name other ALSA clients see in virtual-port mode.
pub const PORT_NAME: &str = "midi_in";

/// An open MIDI input stream.
///
/// The connection stays alive for the lifetime of this value; dropping it
/// closes the port.
pub struct MidiSource {
    event_rx: Receiver<MidiEvent>,
    port_label: String,
    _connection: MidiInputConnection<()>,
}

impl MidiSource {
    /// Open a MIDI input.
    ///
    /// With a source name, connects to the first input port whose name
    /// contains it (case-insensitive). Without one, creates a virtual input
    /// port instead.
    pub fn open(client_name: &str, source: Option<&str>) -> Result<Self> {
        let midi_in = MidiInput::new(client_name)
            .map_err(|e| Error::Midi(format!("Failed to create MIDI input: {}", e)))?;

        let (tx, rx) = unbounded();
        let callback = move |timestamp: u64, bytes: &[u8], _: &mut ()| {
            log::debug!("[MIDI RAW] timestamp={} bytes={:?}", timestamp, bytes);
            if let Some(event) = MidiEvent::from_bytes(bytes, timestamp) {
                log::debug!("[MIDI PARSED] {:?}", event);
                let _ = tx.send(event);
            }
        };

        let (connection, port_label) = match source {
            Some(name) => {
                let name_lower = name.to_lowercase();
                let ports = midi_in.ports();
                let port = ports
                    .iter()
                    .find(|p| {
                        midi_in
                            .port_name(p)
                            .map(|n| n.to_lowercase().contains(&name_lower))
                            .unwrap_or(false)
                    })
                    .ok_or_else(|| {
                        Error::Midi(format!("No MIDI input port found matching '{}'", name))
                    })?;
                // connect consumes the input handle, read the label first
                let label = midi_in.port_name(port).unwrap_or_else(|_| name.to_string());
                let connection = midi_in
                    .connect(port, PORT_NAME, callback, ())
                    .map_err(|e| Error::Midi(format!("Failed to connect to MIDI port: {}", e)))?;
                (connection, label)
            }
            None => {
                let connection = midi_in.create_virtual(PORT_NAME, callback, ()).map_err(|e| {
                    Error::Midi(format!("Failed to create virtual MIDI port: {}", e))
                })?;
                (connection, format!("{}:{}", client_name, PORT_NAME))
            }
        };

        log::info!("MIDI input open: {}", port_label);

        Ok(Self {
            event_rx: rx,
            port_label,
            _connection: connection,
        })
    }

    /// Receiver for parsed events, for use with `recv_timeout` or `select!`.
    pub fn events(&self) -> &Receiver<MidiEvent> {
        &self.event_rx
    }

    /// Name of the connected (or created) port.
    pub fn port_label(&self) -> &str {
        &self.port_label
    }
}

/// List available MIDI input ports.
pub fn list_ports() -> Result<Vec<String>> {
    let midi_in = MidiInput::new("midi2key-probe")
        .map_err(|e| Error::Midi(format!("Failed to create MIDI input: {}", e)))?;

    let ports = midi_in.ports();
    let mut names = Vec::new();
    for (index, port) in ports.iter().enumerate() {
        let name = midi_in
            .port_name(port)
            .unwrap_or_else(|_| format!("Unknown Port {}", index));
        names.push(name);
    }
    Ok(names)
}
