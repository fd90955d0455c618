//! Key constants shared by the text-entry and key-event commands.
//!
//! - [`NULL`] terminates the text sent by value-setting commands.
//! - [`parse_keycode`] resolves Android `KeyEvent.KEYCODE_*` names to the
//!   integers the key-event commands expect.

/// The WebDriver "NULL" key (U+E000). Appended once to text sent by the
/// value-setting commands to mark the end of input.
pub const NULL: char = '\u{E000}';

/// Android `KeyEvent.KEYCODE_*` values addressable by name.
const KEYCODES: &[(&str, u32)] = &[
    ("soft_left", 1),
    ("soft_right", 2),
    ("home", 3),
    ("back", 4),
    ("call", 5),
    ("endcall", 6),
    ("0", 7),
    ("1", 8),
    ("2", 9),
    ("3", 10),
    ("4", 11),
    ("5", 12),
    ("6", 13),
    ("7", 14),
    ("8", 15),
    ("9", 16),
    ("star", 17),
    ("pound", 18),
    ("dpad_up", 19),
    ("dpad_down", 20),
    ("dpad_left", 21),
    ("dpad_right", 22),
    ("dpad_center", 23),
    ("volume_up", 24),
    ("volume_down", 25),
    ("power", 26),
    ("camera", 27),
    ("clear", 28),
    ("a", 29),
    ("b", 30),
    ("c", 31),
    ("d", 32),
    ("e", 33),
    ("f", 34),
    ("g", 35),
    ("h", 36),
    ("i", 37),
    ("j", 38),
    ("k", 39),
    ("l", 40),
    ("m", 41),
    ("n", 42),
    ("o", 43),
    ("p", 44),
    ("q", 45),
    ("r", 46),
    ("s", 47),
    ("t", 48),
    ("u", 49),
    ("v", 50),
    ("w", 51),
    ("x", 52),
    ("y", 53),
    ("z", 54),
    ("comma", 55),
    ("period", 56),
    ("alt_left", 57),
    ("alt_right", 58),
    ("shift_left", 59),
    ("shift_right", 60),
    ("tab", 61),
    ("space", 62),
    ("explorer", 64),
    ("envelope", 65),
    ("enter", 66),
    ("del", 67),
    ("grave", 68),
    ("minus", 69),
    ("equals", 70),
    ("left_bracket", 71),
    ("right_bracket", 72),
    ("backslash", 73),
    ("semicolon", 74),
    ("apostrophe", 75),
    ("slash", 76),
    ("at", 77),
    ("menu", 82),
    ("notification", 83),
    ("search", 84),
    ("media_play_pause", 85),
    ("media_stop", 86),
    ("media_next", 87),
    ("media_previous", 88),
    ("media_rewind", 89),
    ("media_fast_forward", 90),
    ("mute", 91),
    ("page_up", 92),
    ("page_down", 93),
    ("escape", 111),
    ("forward_del", 112),
    ("ctrl_left", 113),
    ("ctrl_right", 114),
    ("caps_lock", 115),
    ("scroll_lock", 116),
    ("move_home", 122),
    ("move_end", 123),
    ("insert", 124),
    ("media_play", 126),
    ("media_pause", 127),
    ("num_lock", 143),
    ("volume_mute", 164),
    ("app_switch", 187),
    ("settings", 176),
    ("brightness_down", 220),
    ("brightness_up", 221),
];

/// Resolve a keycode given as a decimal integer or an Android key name.
///
/// # Parsing rules:
/// - Decimal digits -> the integer itself (`"86"` -> 86)
/// - A name, case-insensitive, with or without `KEYCODE_` (`"media_stop"`,
///   `"KEYCODE_MEDIA_STOP"`) -> its `KeyEvent` value
/// - Single digits are integers, not the `KEYCODE_0`..`KEYCODE_9` keys; use
///   `keycode_0` for those
/// - Anything else -> `None`
pub fn parse_keycode(input: &str) -> Option<u32> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(n) = trimmed.parse::<u32>() {
        return Some(n);
    }

    let lower = trimmed.to_ascii_lowercase();
    let name = lower.strip_prefix("keycode_").unwrap_or(&lower);
    KEYCODES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, code)| code)
}

/// The canonical name of `keycode`, if it has one.
pub fn keycode_name(keycode: u32) -> Option<&'static str> {
    KEYCODES
        .iter()
        .find(|&&(_, code)| code == keycode)
        .map(|&(name, _)| name)
}
