//! midi2key - use a MIDI keyboard as a computer keyboard
//!
//! Translates note and controller events from a MIDI instrument into
//! synthetic key presses delivered through a Linux uinput virtual keyboard:
//!
//! - Notes B0 to G5 map onto the keys of a standard keyboard in evdev code
//!   order (note 35 is Esc)
//! - Pedals act as held modifiers (sustain = Shift, sostenuto = Ctrl,
//!   soft = Alt)
//! - Four notes double as modifier keys behind an opt-in flag
//!
//! # Usage as a Library
//!
//! The translation core is pure and needs no devices:
//!
//! ```
//! use midi2key::event::{MidiEvent, NoteKind};
//! use midi2key::keymap::FeatureConfig;
//! use midi2key::translate::translate;
//!
//! let event = MidiEvent::Note {
//!     kind: NoteKind::On,
//!     channel: 0,
//!     note: 60,
//!     velocity: 100,
//!     timestamp: 0,
//! };
//! let translation = translate(&event, &FeatureConfig::default());
//! assert_eq!(translation.actions.len(), 1);
//! assert!(translation.actions[0].pressed);
//! ```

pub mod error;
pub mod event;
pub mod keymap;
pub mod midi;
pub mod translate;
pub mod uinput;

// Re-export main types
pub use error::{Error, Result};
pub use event::{MidiEvent, NoteKind};
pub use keymap::{
    map_controller, map_note, FeatureConfig, NoteMapping, HIGHEST_NOTE, KEY_SEQUENCE, LOWEST_NOTE,
};
pub use midi::{list_ports, MidiSource};
pub use translate::{dispatch, translate, Diagnostic, KeyAction, Translation};
pub use uinput::{KeyboardOutput, NullKeyboard, UinputKeyboard};
