//! Note-to-key mapping
//!
//! The playable range B0..G5 (MIDI notes 35 to 91) maps one-to-one onto the
//! first 57 entries of [`KEY_SEQUENCE`]. The full 68-entry table doubles as
//! the capability set the virtual keyboard declares on registration.

use evdev::Key;

/// Lowest playable MIDI note (B0).
pub const LOWEST_NOTE: u8 = 35;

/// Highest playable MIDI note (G5).
pub const HIGHEST_NOTE: u8 = 91;

/// Feature toggles, fixed at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureConfig {
    /// Let the modifier notes emit Ctrl/Shift/Alt instead of being dropped.
    pub modifier_keys: bool,
}

/// Keys the virtual keyboard can emit, in evdev code order (codes 1 to 68).
///
/// An in-range note n maps to entry n - 35, so note 35 is Esc (code 1) and
/// the mapped code is always n - 34.
pub static KEY_SEQUENCE: [Key; 68] = [
    Key::KEY_ESC,
    // number row
    Key::KEY_1,
    Key::KEY_2,
    Key::KEY_3,
    Key::KEY_4,
    Key::KEY_5,
    Key::KEY_6,
    Key::KEY_7,
    Key::KEY_8,
    Key::KEY_9,
    Key::KEY_0,
    Key::KEY_MINUS,
    Key::KEY_EQUAL,
    Key::KEY_BACKSPACE,
    // top row
    Key::KEY_TAB,
    Key::KEY_Q,
    Key::KEY_W,
    Key::KEY_E,
    Key::KEY_R,
    Key::KEY_T,
    Key::KEY_Y,
    Key::KEY_U,
    Key::KEY_I,
    Key::KEY_O,
    Key::KEY_P,
    Key::KEY_LEFTBRACE,
    Key::KEY_RIGHTBRACE,
    Key::KEY_ENTER,
    // home row
    Key::KEY_LEFTCTRL,
    Key::KEY_A,
    Key::KEY_S,
    Key::KEY_D,
    Key::KEY_F,
    Key::KEY_G,
    Key::KEY_H,
    Key::KEY_J,
    Key::KEY_K,
    Key::KEY_L,
    Key::KEY_SEMICOLON,
    Key::KEY_APOSTROPHE,
    Key::KEY_GRAVE,
    // bottom row
    Key::KEY_LEFTSHIFT,
    Key::KEY_BACKSLASH,
    Key::KEY_Z,
    Key::KEY_X,
    Key::KEY_C,
    Key::KEY_V,
    Key::KEY_B,
    Key::KEY_N,
    Key::KEY_M,
    Key::KEY_COMMA,
    Key::KEY_DOT,
    Key::KEY_SLASH,
    Key::KEY_RIGHTSHIFT,
    // space and function keys
    Key::KEY_KPASTERISK,
    Key::KEY_LEFTALT,
    Key::KEY_SPACE,
    Key::KEY_CAPSLOCK,
    Key::KEY_F1,
    Key::KEY_F2,
    Key::KEY_F3,
    Key::KEY_F4,
    Key::KEY_F5,
    Key::KEY_F6,
    Key::KEY_F7,
    Key::KEY_F8,
    Key::KEY_F9,
    Key::KEY_F10,
];

/// Notes whose keys are modifiers (D#3 -> LeftCtrl, E4 -> LeftShift,
/// E5 -> RightShift, F#5 -> LeftAlt). Dropped unless the modifier-keys
/// feature is enabled.
pub const MODIFIER_NOTES: [u8; 4] = [0x3f, 0x4c, 0x58, 0x5a];

/// Outcome of mapping a single note number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteMapping {
    /// The note lands on a key.
    Key(Key),
    /// Outside the playable range; dropped silently.
    OutOfRange,
    /// A modifier note while the modifier-keys feature is off; dropped
    /// silently.
    FilteredModifier,
}

/// Map a MIDI note number to its key.
///
/// The range check runs before the modifier check. Pure function: no state,
/// identical inputs give identical results.
pub fn map_note(note: u8, features: &FeatureConfig) -> NoteMapping {
    if !(LOWEST_NOTE..=HIGHEST_NOTE).contains(&note) {
        return NoteMapping::OutOfRange;
    }
    if !features.modifier_keys && MODIFIER_NOTES.contains(&note) {
        return NoteMapping::FilteredModifier;
    }
    NoteMapping::Key(KEY_SEQUENCE[(note - LOWEST_NOTE) as usize])
}

/// Map a controller number to its held-modifier key.
///
/// The pedals double as modifiers: soft pedal (0x43) holds Alt, sostenuto
/// (0x42) holds Ctrl, sustain (0x40) holds Shift. Everything else is
/// unmapped.
pub fn map_controller(controller: u8) -> Option<Key> {
    match controller {
        0x43 => Some(Key::KEY_LEFTALT),
        0x42 => Some(Key::KEY_LEFTCTRL),
        0x40 => Some(Key::KEY_LEFTSHIFT),
        _ => None,
    }
}
