//! Request bodies for the Android commands.
//!
//! Bodies are typed structs serialized with `serde_json`, so field order is
//! declaration order and optional fields are dropped rather than sent as
//! `null`. Encoding the same arguments always produces the same bytes.

use serde::Serialize;

use crate::error::Error;
use crate::flags::{aggregate, FlagParam};
use crate::keys;

/// Body of `press_keycode`, `long_press_keycode` and `keyevent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeycodeBody {
    pub keycode: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metastate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u32>,
}

/// How the server should dismiss the soft keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HideKeyboardStrategy {
    #[serde(rename = "press")]
    Press,
    #[serde(rename = "pressKey")]
    PressKey,
    #[serde(rename = "swipeDown")]
    SwipeDown,
    #[serde(rename = "tapOut")]
    TapOut,
    #[serde(rename = "tapOutside")]
    TapOutside,
    #[serde(rename = "default")]
    Default,
}

impl std::str::FromStr for HideKeyboardStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "press" => Ok(Self::Press),
            "pressKey" | "press_key" => Ok(Self::PressKey),
            "swipeDown" | "swipe_down" => Ok(Self::SwipeDown),
            "tapOut" | "tap_out" => Ok(Self::TapOut),
            "tapOutside" | "tap_outside" => Ok(Self::TapOutside),
            "default" => Ok(Self::Default),
            other => Err(format!("unknown hide keyboard strategy: {other}")),
        }
    }
}

/// Body of `hide_keyboard`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HideKeyboardBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<HideKeyboardStrategy>,
}

/// Body of `set_immediate_value` and `replace_value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueBody {
    pub value: Vec<String>,
}

/// Aggregate an optional flag set; an empty set is treated as absent.
fn optional_mask(param: FlagParam, values: &[u32]) -> Result<Option<u32>, Error> {
    if values.is_empty() {
        return Ok(None);
    }
    aggregate(param, values).map(Some)
}

/// Body for a key press. Both sets are validated before either is used.
pub fn keycode_body(keycode: u32, metastate: &[u32], flags: &[u32]) -> Result<KeycodeBody, Error> {
    Ok(KeycodeBody {
        keycode,
        metastate: optional_mask(FlagParam::Metastate, metastate)?,
        flags: optional_mask(FlagParam::Flags, flags)?,
    })
}

/// Body for `keyevent`, which takes no behavioural flags.
pub fn keyevent_body(keycode: u32, metastate: &[u32]) -> Result<KeycodeBody, Error> {
    keycode_body(keycode, metastate, &[])
}

pub fn hide_keyboard_body(
    key: Option<&str>,
    strategy: Option<HideKeyboardStrategy>,
) -> HideKeyboardBody {
    HideKeyboardBody {
        key: key.map(str::to_owned),
        strategy,
    }
}

/// Concatenate `parts` and terminate them with one [`keys::NULL`].
pub fn value_body<S: AsRef<str>>(parts: &[S]) -> ValueBody {
    let mut text = String::new();
    for part in parts {
        text.push_str(part.as_ref());
    }
    text.push(keys::NULL);
    ValueBody { value: vec![text] }
}

/// Serialize a body to compact JSON.
pub fn to_json<T: Serialize>(body: &T) -> Result<String, Error> {
    Ok(serde_json::to_string(body)?)
}
