//! MIDI event parsing
//!
//! Raw bytes from the input callback are parsed into typed events. Only the
//! channel messages this program reacts to get their own shape; other
//! recognized channel messages are kept as `Other` so the translator can
//! ignore them explicitly.

/// Whether a note event starts or ends a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    On,
    Off,
}

/// MIDI event types parsed from raw MIDI bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    /// Note on/off (channel 0-15, note 0-127, velocity 0-127)
    Note {
        kind: NoteKind,
        channel: u8,
        note: u8,
        velocity: u8,
        timestamp: u64,
    },
    /// Control change (channel, controller number, value)
    Controller {
        channel: u8,
        controller: u8,
        value: u8,
        timestamp: u64,
    },
    /// Recognized channel message with no keyboard meaning
    /// (aftertouch, program change, pitch bend)
    Other { status: u8, timestamp: u64 },
}

impl MidiEvent {
    /// Parse raw MIDI bytes into a MidiEvent.
    ///
    /// Returns `None` for empty, truncated or unrecognized input.
    pub fn from_bytes(bytes: &[u8], timestamp: u64) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }

        let status = bytes[0];
        let msg_type = status & 0xF0;
        let channel = status & 0x0F;

        match msg_type {
            0x90 if bytes.len() >= 3 => {
                let note = bytes[1];
                let velocity = bytes[2];
                // Note on with velocity 0 is treated as note off
                let kind = if velocity == 0 {
                    NoteKind::Off
                } else {
                    NoteKind::On
                };
                Some(MidiEvent::Note {
                    kind,
                    channel,
                    note,
                    velocity,
                    timestamp,
                })
            }
            0x80 if bytes.len() >= 3 => Some(MidiEvent::Note {
                kind: NoteKind::Off,
                channel,
                note: bytes[1],
                velocity: bytes[2],
                timestamp,
            }),
            0xB0 if bytes.len() >= 3 => Some(MidiEvent::Controller {
                channel,
                controller: bytes[1],
                value: bytes[2],
                timestamp,
            }),
            // Poly aftertouch and pitch bend carry two data bytes
            0xA0 | 0xE0 if bytes.len() >= 3 => Some(MidiEvent::Other { status, timestamp }),
            // Program change and channel aftertouch carry one
            0xC0 | 0xD0 if bytes.len() >= 2 => Some(MidiEvent::Other { status, timestamp }),
            _ => None,
        }
    }

    /// Timestamp of the event, in microseconds since the connection opened.
    pub fn timestamp(&self) -> u64 {
        match self {
            MidiEvent::Note { timestamp, .. }
            | MidiEvent::Controller { timestamp, .. }
            | MidiEvent::Other { timestamp, .. } => *timestamp,
        }
    }
}
