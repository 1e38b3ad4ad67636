//! Key table: raw key codes → intents. Several keys may map to one intent.

use anyhow::{Result, bail};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::{Intent, KeyBindings};

#[derive(Clone, Debug)]
pub struct KeyMap {
    bindings: HashMap<KeyCode, Intent>,
}

impl KeyMap {
    /// Build from key names. Unknown names, and a key bound to two different intents, are errors.
    pub fn from_bindings(keys: &KeyBindings) -> Result<Self> {
        let groups = [
            (Intent::LabelPositive, &keys.positive),
            (Intent::LabelNegative, &keys.negative),
            (Intent::Advance, &keys.advance),
            (Intent::Retreat, &keys.retreat),
            (Intent::Quit, &keys.quit),
        ];
        let mut bindings = HashMap::new();
        for (intent, names) in groups {
            for name in names {
                let Some(code) = parse_key(name) else {
                    bail!("Unknown key name {name:?} for {intent:?}");
                };
                if let Some(prev) = bindings.insert(code, intent)
                    && prev != intent
                {
                    bail!("Key {name:?} is bound to both {prev:?} and {intent:?}");
                }
            }
        }
        Ok(Self { bindings })
    }

    /// Intent for a key event. Ctrl-C always quits so the session still commits.
    pub fn intent_for(&self, key: &KeyEvent) -> Option<Intent> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Intent::Quit);
        }
        self.bindings.get(&key.code).copied()
    }
}

/// Key name → code. A single character is taken literally (case-sensitive); named keys are not.
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    let code = match name.to_ascii_lowercase().as_str() {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "space" => KeyCode::Char(' '),
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        _ => return None,
    };
    Some(code)
}
