//! Static table of the Android MJSONWP commands.
//!
//! Each [`Command`] maps to one fixed [`CommandSpec`]: HTTP method and a path
//! template with `{session_id}` and, for element-scoped commands,
//! `{element_id}` placeholders.

use std::fmt;

use crate::session::{encode_segment, ElementId, SessionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire descriptor of a command.
#[derive(Debug)]
pub struct CommandSpec {
    pub name: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
}

impl CommandSpec {
    /// True when the path template needs an element id.
    pub fn is_element_scoped(&self) -> bool {
        self.path.contains("{element_id}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    IsKeyboardShown,
    HideKeyboard,
    KeyEvent,
    PressKeycode,
    LongPressKeycode,
    SetImmediateValue,
    ReplaceValue,
}

static COMMANDS: [CommandSpec; 7] = [
    CommandSpec {
        name: "is_keyboard_shown",
        method: HttpMethod::Get,
        path: "/session/{session_id}/appium/device/is_keyboard_shown",
    },
    CommandSpec {
        name: "hide_keyboard",
        method: HttpMethod::Post,
        path: "/session/{session_id}/appium/device/hide_keyboard",
    },
    CommandSpec {
        name: "keyevent",
        method: HttpMethod::Post,
        path: "/session/{session_id}/appium/device/keyevent",
    },
    CommandSpec {
        name: "press_keycode",
        method: HttpMethod::Post,
        path: "/session/{session_id}/appium/device/press_keycode",
    },
    CommandSpec {
        name: "long_press_keycode",
        method: HttpMethod::Post,
        path: "/session/{session_id}/appium/device/long_press_keycode",
    },
    CommandSpec {
        name: "set_immediate_value",
        method: HttpMethod::Post,
        path: "/session/{session_id}/appium/element/{element_id}/value",
    },
    CommandSpec {
        name: "replace_value",
        method: HttpMethod::Post,
        path: "/session/{session_id}/appium/element/{element_id}/replace_value",
    },
];

impl Command {
    pub const ALL: [Command; 7] = [
        Command::IsKeyboardShown,
        Command::HideKeyboard,
        Command::KeyEvent,
        Command::PressKeycode,
        Command::LongPressKeycode,
        Command::SetImmediateValue,
        Command::ReplaceValue,
    ];

    pub fn spec(self) -> &'static CommandSpec {
        &COMMANDS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn method(self) -> HttpMethod {
        self.spec().method
    }

    /// Look a command up by its wire name.
    pub fn from_name(name: &str) -> Option<Command> {
        Command::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Substitute the identifiers into this command's path template.
    ///
    /// Returns `None` when an element-scoped command is resolved without an
    /// element id.
    pub fn resolve_path(self, session: &SessionId, element: Option<&ElementId>) -> Option<String> {
        let spec = self.spec();
        let path = spec
            .path
            .replace("{session_id}", &encode_segment(session.as_str()));
        match (spec.is_element_scoped(), element) {
            (true, Some(el)) => Some(path.replace("{element_id}", &encode_segment(el.as_str()))),
            (true, None) => None,
            (false, _) => Some(path),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
