//! Android device and element commands.
//!
//! One method per wire command, each returning the decoded `value`. Argument
//! validation (flag sets, identifiers) happens before the request is built,
//! so a rejected call never reaches the transport.

use serde_json::Value;

use crate::command::Command;
use crate::dispatch::Dispatcher;
use crate::encode;
use crate::error::Error;
use crate::session::ElementId;
use crate::transport::Transport;

pub use crate::encode::HideKeyboardStrategy;

/// Arguments of a key press: the keycode plus optional `metastate` and
/// `flags` sets, each a list of single constants from [`crate::flags`].
///
/// ```
/// use mjsonwp::flags::{key, meta};
/// use mjsonwp::KeyPress;
///
/// let press = KeyPress::new(86)
///     .metastate([meta::SHIFT_ON, meta::NUM_LOCK_ON])
///     .flags([key::CANCELED, key::KEEP_TOUCH_MODE, key::FROM_SYSTEM]);
/// assert_eq!(press.keycode, 86);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPress {
    pub keycode: u32,
    pub metastate: Vec<u32>,
    pub flags: Vec<u32>,
}

impl KeyPress {
    pub fn new(keycode: u32) -> Self {
        Self {
            keycode,
            ..Default::default()
        }
    }

    pub fn metastate(mut self, values: impl IntoIterator<Item = u32>) -> Self {
        self.metastate.extend(values);
        self
    }

    pub fn flags(mut self, values: impl IntoIterator<Item = u32>) -> Self {
        self.flags.extend(values);
        self
    }

    fn body(&self) -> Result<encode::KeycodeBody, Error> {
        encode::keycode_body(self.keycode, &self.metastate, &self.flags)
    }
}

impl From<u32> for KeyPress {
    fn from(keycode: u32) -> Self {
        KeyPress::new(keycode)
    }
}

impl<T: Transport> Dispatcher<T> {
    /// Whether the soft keyboard is currently shown.
    pub async fn is_keyboard_shown(&self) -> Result<Value, Error> {
        self.execute(Command::IsKeyboardShown, None, None::<&()>).await
    }

    /// Dismiss the soft keyboard, optionally by pressing `key` (e.g. "Done")
    /// or with an explicit `strategy`.
    pub async fn hide_keyboard(
        &self,
        key: Option<&str>,
        strategy: Option<HideKeyboardStrategy>,
    ) -> Result<Value, Error> {
        let body = encode::hide_keyboard_body(key, strategy);
        self.execute(Command::HideKeyboard, None, Some(&body)).await
    }

    /// Send a raw key event. `metastate` may be empty.
    pub async fn keyevent(&self, keycode: u32, metastate: &[u32]) -> Result<Value, Error> {
        let body = encode::keyevent_body(keycode, metastate)?;
        self.execute(Command::KeyEvent, None, Some(&body)).await
    }

    /// Press a key. Accepts a bare keycode or a [`KeyPress`].
    pub async fn press_keycode(&self, press: impl Into<KeyPress>) -> Result<Value, Error> {
        let body = press.into().body()?;
        self.execute(Command::PressKeycode, None, Some(&body)).await
    }

    /// Long-press a key. Accepts a bare keycode or a [`KeyPress`].
    pub async fn long_press_keycode(&self, press: impl Into<KeyPress>) -> Result<Value, Error> {
        let body = press.into().body()?;
        self.execute(Command::LongPressKeycode, None, Some(&body)).await
    }

    /// Set the element's value in one step, bypassing per-key typing.
    pub async fn set_immediate_value<S: AsRef<str>>(
        &self,
        element: &ElementId,
        parts: &[S],
    ) -> Result<Value, Error> {
        let body = encode::value_body(parts);
        self.execute(Command::SetImmediateValue, Some(element), Some(&body))
            .await
    }

    /// Replace the element's current value.
    pub async fn replace_value<S: AsRef<str>>(
        &self,
        element: &ElementId,
        parts: &[S],
    ) -> Result<Value, Error> {
        let body = encode::value_body(parts);
        self.execute(Command::ReplaceValue, Some(element), Some(&body))
            .await
    }
}
