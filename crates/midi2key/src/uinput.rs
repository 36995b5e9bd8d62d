//! Virtual keyboard output via Linux uinput
//!
//! The real sink registers a uinput device declaring every key in
//! [`KEY_SEQUENCE`] and writes key events to it. A null sink is provided for
//! tests and dry runs.

use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{AttributeSet, BusType, EventType, InputEvent, InputId, Key};

use crate::error::Result;
use crate::keymap::KEY_SEQUENCE;
use crate::translate::KeyAction;

const VENDOR_ID: u16 = 0x1234;
const PRODUCT_ID: u16 = 0x5678;

/// Keyboard output trait
pub trait KeyboardOutput {
    /// Write one batch of key actions, followed by exactly one sync report.
    ///
    /// Batches are never interleaved; callers pass all actions of one event
    /// in a single call.
    fn emit(&mut self, actions: &[KeyAction]) -> Result<()>;

    /// Name of the output device.
    fn device_name(&self) -> &str;
}

/// A uinput virtual keyboard.
///
/// The device exists for the lifetime of this value and is removed from the
/// system on drop.
pub struct UinputKeyboard {
    device: VirtualDevice,
    name: String,
}

impl UinputKeyboard {
    /// Register a new virtual keyboard with the given device name.
    pub fn create(name: &str) -> Result<Self> {
        let mut keys = AttributeSet::<Key>::new();
        for key in KEY_SEQUENCE {
            keys.insert(key);
        }

        let device = VirtualDeviceBuilder::new()?
            .name(name)
            .input_id(InputId::new(BusType::BUS_USB, VENDOR_ID, PRODUCT_ID, 1))
            .with_keys(&keys)?
            .build()?;

        log::info!("Registered uinput virtual keyboard: {}", name);

        Ok(Self {
            device,
            name: name.to_string(),
        })
    }
}

impl KeyboardOutput for UinputKeyboard {
    fn emit(&mut self, actions: &[KeyAction]) -> Result<()> {
        let events: Vec<InputEvent> = actions
            .iter()
            .map(|action| {
                InputEvent::new(EventType::KEY, action.key.code(), i32::from(action.pressed))
            })
            .collect();
        // One emit call per batch; the device appends the SYN_REPORT
        self.device.emit(&events)?;
        Ok(())
    }

    fn device_name(&self) -> &str {
        &self.name
    }
}

/// Keyboard output that discards everything (for testing or dry runs).
pub struct NullKeyboard;

impl KeyboardOutput for NullKeyboard {
    fn emit(&mut self, actions: &[KeyAction]) -> Result<()> {
        for action in actions {
            log::debug!(
                "Discarding key event: {:?} pressed={}",
                action.key,
                action.pressed
            );
        }
        Ok(())
    }

    fn device_name(&self) -> &str {
        "null"
    }
}
