//! Event translation
//!
//! The stateless core: each parsed MIDI event becomes zero or more key
//! actions plus an optional diagnostic. No state is carried between events;
//! repeated note ons (or offs) pass through unchanged.

use std::fmt;

use evdev::Key;

use crate::error::Result;
use crate::event::{MidiEvent, NoteKind};
use crate::keymap::{map_controller, map_note, FeatureConfig, NoteMapping};
use crate::uinput::KeyboardOutput;

/// A single key press or release to deliver to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyAction {
    pub key: Key,
    pub pressed: bool,
}

/// Operator-visible notes about events that produced no key actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// A control change with no key assigned to it.
    UnmappedController {
        controller: u8,
        value: u8,
        timestamp: u64,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnmappedController {
                controller,
                value,
                timestamp,
            } => {
                write!(
                    f,
                    "[{}] control {:#04x} val({:#04x})",
                    timestamp, controller, value
                )
            }
        }
    }
}

/// Result of translating one event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Translation {
    /// Key actions forming one atomic batch. The sink follows a non-empty
    /// batch with exactly one sync report.
    pub actions: Vec<KeyAction>,
    pub diagnostic: Option<Diagnostic>,
}

impl Translation {
    fn none() -> Self {
        Self::default()
    }

    fn single(action: KeyAction) -> Self {
        Self {
            actions: vec![action],
            diagnostic: None,
        }
    }
}

/// Translate one MIDI event into key actions.
///
/// Pure function of the event and the feature configuration; never fails.
/// Out-of-range and filtered modifier notes produce nothing at all, as does
/// every `Other` event. An unmapped controller produces a diagnostic instead
/// of actions.
pub fn translate(event: &MidiEvent, features: &FeatureConfig) -> Translation {
    match *event {
        MidiEvent::Note { kind, note, .. } => match map_note(note, features) {
            NoteMapping::Key(key) => Translation::single(KeyAction {
                key,
                pressed: kind == NoteKind::On,
            }),
            NoteMapping::OutOfRange | NoteMapping::FilteredModifier => Translation::none(),
        },
        MidiEvent::Controller {
            controller,
            value,
            timestamp,
            ..
        } => match map_controller(controller) {
            Some(key) => Translation::single(KeyAction {
                key,
                pressed: value != 0,
            }),
            None => Translation {
                actions: Vec::new(),
                diagnostic: Some(Diagnostic::UnmappedController {
                    controller,
                    value,
                    timestamp,
                }),
            },
        },
        MidiEvent::Other { .. } => Translation::none(),
    }
}

/// Translate one event and hand the result to the sink.
///
/// Non-empty batches are emitted as a unit; diagnostics are logged. This is
/// the per-event step the driver loop repeats.
pub fn dispatch(
    event: &MidiEvent,
    features: &FeatureConfig,
    sink: &mut dyn KeyboardOutput,
) -> Result<()> {
    let translation = translate(event, features);
    if !translation.actions.is_empty() {
        sink.emit(&translation.actions)?;
    }
    if let Some(diagnostic) = translation.diagnostic {
        log::info!("{}", diagnostic);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// What a sink saw, sync reports included.
    #[derive(Debug, PartialEq, Eq)]
    enum SinkEntry {
        Key(Key, bool),
        Sync,
    }

    #[derive(Default)]
    struct RecordingKeyboard {
        entries: Vec<SinkEntry>,
    }

    impl KeyboardOutput for RecordingKeyboard {
        fn emit(&mut self, actions: &[KeyAction]) -> Result<()> {
            for action in actions {
                self.entries.push(SinkEntry::Key(action.key, action.pressed));
            }
            self.entries.push(SinkEntry::Sync);
            Ok(())
        }

        fn device_name(&self) -> &str {
            "recording"
        }
    }

    fn note_on(note: u8) -> MidiEvent {
        MidiEvent::Note {
            kind: NoteKind::On,
            channel: 0,
            note,
            velocity: 100,
            timestamp: 0,
        }
    }

    fn note_off(note: u8) -> MidiEvent {
        MidiEvent::Note {
            kind: NoteKind::Off,
            channel: 0,
            note,
            velocity: 0,
            timestamp: 0,
        }
    }

    fn control(controller: u8, value: u8) -> MidiEvent {
        MidiEvent::Controller {
            channel: 0,
            controller,
            value,
            timestamp: 0,
        }
    }

    #[test]
    fn test_note_on_single_press() {
        let translation = translate(&note_on(60), &FeatureConfig::default());
        assert_eq!(
            translation.actions,
            vec![KeyAction {
                key: Key::KEY_LEFTBRACE,
                pressed: true
            }]
        );
        assert_eq!(translation.diagnostic, None);
    }

    #[test]
    fn test_note_off_single_release() {
        let translation = translate(&note_off(60), &FeatureConfig::default());
        assert_eq!(
            translation.actions,
            vec![KeyAction {
                key: Key::KEY_LEFTBRACE,
                pressed: false
            }]
        );
    }

    #[test]
    fn test_out_of_range_note_is_silent() {
        let translation = translate(&note_on(20), &FeatureConfig::default());
        assert!(translation.actions.is_empty());
        assert_eq!(translation.diagnostic, None);
    }

    #[test]
    fn test_filtered_modifier_is_silent() {
        let translation = translate(&note_on(0x3f), &FeatureConfig::default());
        assert!(translation.actions.is_empty());
        assert_eq!(translation.diagnostic, None);
    }

    #[test]
    fn test_pedal_release() {
        let translation = translate(&control(0x43, 0), &FeatureConfig::default());
        assert_eq!(
            translation.actions,
            vec![KeyAction {
                key: Key::KEY_LEFTALT,
                pressed: false
            }]
        );
        assert_eq!(translation.diagnostic, None);
    }

    #[test]
    fn test_pedal_press_on_any_nonzero_value() {
        for value in [1, 64, 127] {
            let translation = translate(&control(0x40, value), &FeatureConfig::default());
            assert_eq!(
                translation.actions,
                vec![KeyAction {
                    key: Key::KEY_LEFTSHIFT,
                    pressed: true
                }]
            );
        }
    }

    #[test]
    fn test_unmapped_controller_diagnostic() {
        let translation = translate(&control(0x7f, 10), &FeatureConfig::default());
        assert!(translation.actions.is_empty());
        let diagnostic = translation.diagnostic.expect("diagnostic expected");
        let rendered = diagnostic.to_string();
        assert!(rendered.contains("0x7f"));
        assert!(rendered.contains("0x0a"));
    }

    #[test]
    fn test_other_event_is_silent() {
        let translation = translate(
            &MidiEvent::Other {
                status: 0xE0,
                timestamp: 0,
            },
            &FeatureConfig::default(),
        );
        assert!(translation.actions.is_empty());
        assert_eq!(translation.diagnostic, None);
    }

    #[test]
    fn test_repeated_note_on_passes_through() {
        // Level-triggered: no cross-event state, a second press is emitted
        let features = FeatureConfig::default();
        let first = translate(&note_on(40), &features);
        let second = translate(&note_on(40), &features);
        assert_eq!(first, second);
        assert_eq!(first.actions.len(), 1);
    }

    #[test]
    fn test_dispatch_batches_and_syncs_in_order() {
        let mut sink = RecordingKeyboard::default();
        let features = FeatureConfig::default();
        let events = [
            note_on(35),
            note_off(35),
            control(0x40, 127),
            control(0x40, 0),
        ];
        for event in &events {
            dispatch(event, &features, &mut sink).unwrap();
        }
        assert_eq!(
            sink.entries,
            vec![
                SinkEntry::Key(Key::KEY_ESC, true),
                SinkEntry::Sync,
                SinkEntry::Key(Key::KEY_ESC, false),
                SinkEntry::Sync,
                SinkEntry::Key(Key::KEY_LEFTSHIFT, true),
                SinkEntry::Sync,
                SinkEntry::Key(Key::KEY_LEFTSHIFT, false),
                SinkEntry::Sync,
            ]
        );
    }

    #[test]
    fn test_dispatch_skips_sink_for_empty_translation() {
        let mut sink = RecordingKeyboard::default();
        let features = FeatureConfig::default();
        dispatch(&note_on(127), &features, &mut sink).unwrap();
        dispatch(&control(0x01, 64), &features, &mut sink).unwrap();
        assert!(sink.entries.is_empty());
    }
}
