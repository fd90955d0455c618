//! Bitmask aggregation for key-event parameters.
//!
//! Android key events carry two independent bitmasks: the modifier
//! `metastate` (`KeyEvent.META_*`) and the behavioural `flags`
//! (`KeyEvent.FLAG_*`). Both travel as plain integers, so each parameter has
//! its own closed table of recognized constants and every supplied value is
//! checked against the table of the parameter it is passed for.

use crate::error::Error;

/// `KeyEvent.META_*` modifier constants.
pub mod meta {
    pub const SHIFT_ON: u32 = 0x0000_0001;
    pub const ALT_ON: u32 = 0x0000_0002;
    pub const SYM_ON: u32 = 0x0000_0004;
    pub const FUNCTION_ON: u32 = 0x0000_0008;
    pub const ALT_LEFT_ON: u32 = 0x0000_0010;
    pub const ALT_RIGHT_ON: u32 = 0x0000_0020;
    pub const SHIFT_LEFT_ON: u32 = 0x0000_0040;
    pub const SHIFT_RIGHT_ON: u32 = 0x0000_0080;
    pub const CTRL_ON: u32 = 0x0000_1000;
    pub const CTRL_LEFT_ON: u32 = 0x0000_2000;
    pub const CTRL_RIGHT_ON: u32 = 0x0000_4000;
    pub const META_ON: u32 = 0x0001_0000;
    pub const META_LEFT_ON: u32 = 0x0002_0000;
    pub const META_RIGHT_ON: u32 = 0x0004_0000;
    pub const CAPS_LOCK_ON: u32 = 0x0010_0000;
    pub const NUM_LOCK_ON: u32 = 0x0020_0000;
    pub const SCROLL_LOCK_ON: u32 = 0x0040_0000;
}

/// `KeyEvent.FLAG_*` behavioural constants.
pub mod key {
    pub const WOKE_HERE: u32 = 0x0000_0001;
    pub const SOFT_KEYBOARD: u32 = 0x0000_0002;
    pub const KEEP_TOUCH_MODE: u32 = 0x0000_0004;
    pub const FROM_SYSTEM: u32 = 0x0000_0008;
    pub const EDITOR_ACTION: u32 = 0x0000_0010;
    pub const CANCELED: u32 = 0x0000_0020;
    pub const VIRTUAL_HARD_KEY: u32 = 0x0000_0040;
    pub const LONG_PRESS: u32 = 0x0000_0080;
    pub const CANCELED_LONG_PRESS: u32 = 0x0000_0100;
    pub const TRACKING: u32 = 0x0000_0200;
    pub const FALLBACK: u32 = 0x0000_0400;
    pub const PREDISPATCH: u32 = 0x2000_0000;
    pub const START_TRACKING: u32 = 0x4000_0000;
}

const META_STATES: &[(&str, u32)] = &[
    ("shift_on", meta::SHIFT_ON),
    ("alt_on", meta::ALT_ON),
    ("sym_on", meta::SYM_ON),
    ("function_on", meta::FUNCTION_ON),
    ("alt_left_on", meta::ALT_LEFT_ON),
    ("alt_right_on", meta::ALT_RIGHT_ON),
    ("shift_left_on", meta::SHIFT_LEFT_ON),
    ("shift_right_on", meta::SHIFT_RIGHT_ON),
    ("ctrl_on", meta::CTRL_ON),
    ("ctrl_left_on", meta::CTRL_LEFT_ON),
    ("ctrl_right_on", meta::CTRL_RIGHT_ON),
    ("meta_on", meta::META_ON),
    ("meta_left_on", meta::META_LEFT_ON),
    ("meta_right_on", meta::META_RIGHT_ON),
    ("caps_lock_on", meta::CAPS_LOCK_ON),
    ("num_lock_on", meta::NUM_LOCK_ON),
    ("scroll_lock_on", meta::SCROLL_LOCK_ON),
];

const KEY_FLAGS: &[(&str, u32)] = &[
    ("woke_here", key::WOKE_HERE),
    ("soft_keyboard", key::SOFT_KEYBOARD),
    ("keep_touch_mode", key::KEEP_TOUCH_MODE),
    ("from_system", key::FROM_SYSTEM),
    ("editor_action", key::EDITOR_ACTION),
    ("canceled", key::CANCELED),
    ("virtual_hard_key", key::VIRTUAL_HARD_KEY),
    ("long_press", key::LONG_PRESS),
    ("canceled_long_press", key::CANCELED_LONG_PRESS),
    ("tracking", key::TRACKING),
    ("fallback", key::FALLBACK),
    ("predispatch", key::PREDISPATCH),
    ("start_tracking", key::START_TRACKING),
];

/// A bitmask parameter of a key-event command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagParam {
    Metastate,
    Flags,
}

impl FlagParam {
    /// Wire name of the parameter, as it appears in request bodies.
    pub fn name(self) -> &'static str {
        match self {
            FlagParam::Metastate => "metastate",
            FlagParam::Flags => "flags",
        }
    }

    /// The closed set of `(name, value)` constants accepted for this parameter.
    pub fn recognized(self) -> &'static [(&'static str, u32)] {
        match self {
            FlagParam::Metastate => META_STATES,
            FlagParam::Flags => KEY_FLAGS,
        }
    }

    pub fn is_recognized(self, value: u32) -> bool {
        self.recognized().iter().any(|&(_, v)| v == value)
    }
}

/// Combine `values` into one bitmask for `param`.
///
/// Fails on the first value that is not one of `param`'s constants; nothing
/// is aggregated in that case.
pub fn aggregate(param: FlagParam, values: &[u32]) -> Result<u32, Error> {
    if let Some(&bad) = values.iter().find(|&&v| !param.is_recognized(v)) {
        return Err(Error::InvalidArgument {
            param: param.name(),
            value: bad,
        });
    }
    Ok(values.iter().fold(0u32, |acc, v| acc | v))
}

/// Parse one flag given by name (`shift_on`, `canceled`), decimal, or
/// `0x`-prefixed hex. Names are matched case-insensitively and may carry the
/// Android `META_` / `FLAG_` prefix.
///
/// Only the syntax is checked here; membership is checked by [`aggregate`].
pub fn parse_flag(param: FlagParam, input: &str) -> Option<u32> {
    let trimmed = input.trim();
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return u32::from_str_radix(&hex.replace('_', ""), 16).ok();
    }
    if let Ok(n) = trimmed.parse::<u32>() {
        return Some(n);
    }

    let lower = trimmed.to_ascii_lowercase();
    let prefix = match param {
        FlagParam::Metastate => "meta_",
        FlagParam::Flags => "flag_",
    };
    // "meta_on" is itself a constant, so only strip the prefix when the
    // unprefixed name is not found.
    param
        .recognized()
        .iter()
        .find(|(name, _)| *name == lower)
        .or_else(|| {
            let stripped = lower.strip_prefix(prefix)?;
            param.recognized().iter().find(|(name, _)| *name == stripped)
        })
        .map(|&(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_ors_recognized_metastates() {
        let mask = aggregate(FlagParam::Metastate, &[meta::SHIFT_ON, meta::NUM_LOCK_ON]).unwrap();
        assert_eq!(mask, 2_097_153);
    }

    #[test]
    fn aggregate_ors_recognized_flags() {
        let mask = aggregate(
            FlagParam::Flags,
            &[key::CANCELED, key::KEEP_TOUCH_MODE, key::FROM_SYSTEM],
        )
        .unwrap();
        assert_eq!(mask, 44);
    }

    #[test]
    fn aggregate_every_constant_yields_their_union() {
        for param in [FlagParam::Metastate, FlagParam::Flags] {
            let values: Vec<u32> = param.recognized().iter().map(|&(_, v)| v).collect();
            let expected = values.iter().fold(0u32, |acc, v| acc | v);
            assert_eq!(aggregate(param, &values).unwrap(), expected);
        }
    }

    #[test]
    fn aggregate_single_value_is_identity() {
        assert_eq!(aggregate(FlagParam::Metastate, &[meta::SHIFT_ON]).unwrap(), 1);
    }

    #[test]
    fn aggregate_empty_is_zero() {
        assert_eq!(aggregate(FlagParam::Flags, &[]).unwrap(), 0);
    }

    #[test]
    fn aggregate_tolerates_repeated_values() {
        assert_eq!(
            aggregate(FlagParam::Flags, &[key::CANCELED, key::CANCELED]).unwrap(),
            key::CANCELED
        );
    }

    #[test]
    fn aggregate_rejects_unknown_metastate() {
        let err = aggregate(FlagParam::Metastate, &[meta::SHIFT_ON, 0x100]).unwrap_err();
        match err {
            Error::InvalidArgument { param, value } => {
                assert_eq!(param, "metastate");
                assert_eq!(value, 0x100);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn aggregate_rejects_unknown_flag() {
        let err = aggregate(FlagParam::Flags, &[0x1000]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidArgument { param: "flags", value: 0x1000 }
        ));
    }

    #[test]
    fn aggregate_rejects_combined_mask() {
        // Pre-combined masks are not single constants.
        let err = aggregate(FlagParam::Metastate, &[0x0020_0001]).unwrap_err();
        assert!(err.is_argument_error());
    }

    #[test]
    fn parameters_are_checked_against_their_own_table() {
        // PREDISPATCH is a flag, never a metastate.
        assert!(aggregate(FlagParam::Flags, &[key::PREDISPATCH]).is_ok());
        assert!(aggregate(FlagParam::Metastate, &[key::PREDISPATCH]).is_err());
        // NUM_LOCK_ON is a metastate, never a flag.
        assert!(aggregate(FlagParam::Metastate, &[meta::NUM_LOCK_ON]).is_ok());
        assert!(aggregate(FlagParam::Flags, &[meta::NUM_LOCK_ON]).is_err());
    }

    #[test]
    fn recognized_values_are_single_bits() {
        for param in [FlagParam::Metastate, FlagParam::Flags] {
            for &(name, value) in param.recognized() {
                assert_eq!(value.count_ones(), 1, "{name} is not a single bit");
            }
        }
    }

    #[test]
    fn parse_flag_accepts_names_numbers_and_hex() {
        assert_eq!(parse_flag(FlagParam::Metastate, "shift_on"), Some(1));
        assert_eq!(parse_flag(FlagParam::Metastate, "META_NUM_LOCK_ON"), Some(0x20_0000));
        assert_eq!(parse_flag(FlagParam::Metastate, "meta_on"), Some(meta::META_ON));
        assert_eq!(parse_flag(FlagParam::Flags, "FLAG_CANCELED"), Some(0x20));
        assert_eq!(parse_flag(FlagParam::Flags, "32"), Some(32));
        assert_eq!(parse_flag(FlagParam::Flags, "0x0000_0004"), Some(4));
        assert_eq!(parse_flag(FlagParam::Flags, "0X8"), Some(8));
    }

    #[test]
    fn parse_flag_rejects_unknown_names() {
        assert_eq!(parse_flag(FlagParam::Flags, "shift_on"), None);
        assert_eq!(parse_flag(FlagParam::Metastate, "bogus"), None);
        assert_eq!(parse_flag(FlagParam::Metastate, "0xZZ"), None);
    }
}
