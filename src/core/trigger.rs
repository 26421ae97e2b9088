//! Key triggers: physical key chord → normalized string → command name.
//!
//! - `Trigger`: canonical chord (`meta+ctrl+alt+shift+<key>`)
//! - `TriggerRegistry`: command name → triggers, resolved per platform
//! - `TriggerListener`: reverse index scoped to an allow-list of commands

use std::fmt;
use std::str::FromStr;

use compact_str::{format_compact, CompactString, ToCompactString};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::platform::PlatformKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TriggerError {
    #[error("empty trigger definition")]
    Empty,
    #[error("trigger `{0}` has no primary key")]
    Incomplete(String),
    #[error("trigger `{0}` names more than one primary key")]
    MultiplePrimary(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub meta: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub fn is_empty(&self) -> bool {
        !(self.meta || self.ctrl || self.alt || self.shift)
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(m: KeyModifiers) -> Self {
        Self {
            meta: m.contains(KeyModifiers::SUPER) || m.contains(KeyModifiers::META),
            ctrl: m.contains(KeyModifiers::CONTROL),
            alt: m.contains(KeyModifiers::ALT),
            shift: m.contains(KeyModifiers::SHIFT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Trigger {
    modifiers: Modifiers,
    primary: Option<CompactString>,
}

impl Trigger {
    pub fn new(modifiers: Modifiers, primary: Option<&str>) -> Self {
        let mut modifiers = modifiers;
        let primary = primary.map(|p| normalize_primary(p, &mut modifiers));
        Self { modifiers, primary }
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn primary(&self) -> Option<&str> {
        self.primary.as_deref()
    }

    /// A full chord rather than a modifier held alone.
    pub fn is_complete(&self) -> bool {
        self.primary.is_some()
    }

    pub fn key(&self) -> CompactString {
        self.to_compact_string()
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<&str> = Vec::with_capacity(5);
        if self.modifiers.meta {
            parts.push("meta");
        }
        if self.modifiers.ctrl {
            parts.push("ctrl");
        }
        if self.modifiers.alt {
            parts.push("alt");
        }
        if self.modifiers.shift {
            parts.push("shift");
        }
        if let Some(primary) = &self.primary {
            parts.push(primary);
        }
        f.write_str(&parts.join("+"))
    }
}

impl FromStr for Trigger {
    type Err = TriggerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut modifiers = Modifiers::default();
        let mut primary: Option<CompactString> = None;
        let mut seen_any = false;

        for part in value.split('+').map(str::trim).filter(|p| !p.is_empty()) {
            seen_any = true;
            match part.to_ascii_lowercase().as_str() {
                "meta" | "cmd" | "command" | "super" => modifiers.meta = true,
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                _ => {
                    if primary.is_some() {
                        return Err(TriggerError::MultiplePrimary(value.to_string()));
                    }
                    primary = Some(normalize_primary(part, &mut modifiers));
                }
            }
        }

        if !seen_any {
            return Err(TriggerError::Empty);
        }
        Ok(Self { modifiers, primary })
    }
}

impl From<KeyEvent> for Trigger {
    fn from(event: KeyEvent) -> Self {
        let mut modifiers = Modifiers::from(event.modifiers);
        let primary: Option<CompactString> = match event.code {
            KeyCode::Char(ch) => Some(normalize_primary(&ch.to_string(), &mut modifiers)),
            KeyCode::BackTab => {
                modifiers.shift = true;
                Some("tab".into())
            }
            KeyCode::Tab => Some("tab".into()),
            KeyCode::Enter => Some("enter".into()),
            KeyCode::Backspace => Some("backspace".into()),
            KeyCode::Delete => Some("delete".into()),
            KeyCode::Insert => Some("insert".into()),
            KeyCode::Esc => Some("escape".into()),
            KeyCode::Up => Some("up".into()),
            KeyCode::Down => Some("down".into()),
            KeyCode::Left => Some("left".into()),
            KeyCode::Right => Some("right".into()),
            KeyCode::Home => Some("home".into()),
            KeyCode::End => Some("end".into()),
            KeyCode::PageUp => Some("pageup".into()),
            KeyCode::PageDown => Some("pagedown".into()),
            KeyCode::F(n) => Some(format_compact!("f{n}")),
            _ => None,
        };
        Self { modifiers, primary }
    }
}

fn normalize_primary(part: &str, modifiers: &mut Modifiers) -> CompactString {
    if part == " " {
        return "space".into();
    }
    let lower = part.to_ascii_lowercase();
    match lower.as_str() {
        "esc" | "escape" => return "escape".into(),
        "del" | "delete" => return "delete".into(),
        "return" | "enter" => return "enter".into(),
        "space" | "spacebar" => return "space".into(),
        "pgup" | "pageup" => return "pageup".into(),
        "pgdn" | "pagedown" => return "pagedown".into(),
        "ins" | "insert" => return "insert".into(),
        _ => {}
    }

    let mut chars = part.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        if ch.is_ascii_uppercase() {
            modifiers.shift = true;
            return ch.to_ascii_lowercase().to_compact_string();
        }
        return ch.to_compact_string();
    }
    lower.into()
}

/// A trigger definition as written by a command author or in settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TriggerDef {
    Universal(Vec<String>),
    PerPlatform { mac: Vec<String>, pc: Vec<String> },
}

impl TriggerDef {
    pub fn universal(keys: &[&str]) -> Self {
        Self::Universal(keys.iter().map(|k| k.to_string()).collect())
    }

    pub fn per_platform(mac: &[&str], pc: &[&str]) -> Self {
        Self::PerPlatform {
            mac: mac.iter().map(|k| k.to_string()).collect(),
            pc: pc.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn keys_for(&self, platform: PlatformKind) -> &[String] {
        match self {
            TriggerDef::Universal(keys) => keys,
            TriggerDef::PerPlatform { mac, pc } => match platform {
                PlatformKind::Mac => mac,
                PlatformKind::Pc => pc,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct TriggerRegistry {
    platform: PlatformKind,
    triggers: FxHashMap<CompactString, Vec<Trigger>>,
}

impl TriggerRegistry {
    pub fn new(platform: PlatformKind) -> Self {
        Self {
            platform,
            triggers: FxHashMap::default(),
        }
    }

    pub fn with_defaults(platform: PlatformKind) -> Self {
        let mut registry = Self::new(platform);
        for (name, def) in default_trigger_defs() {
            if let Err(error) = registry.register(name, def) {
                tracing::error!(command = name, %error, "default trigger rejected");
            }
        }
        registry
    }

    pub fn platform(&self) -> PlatformKind {
        self.platform
    }

    /// Replaces the triggers of `name`. Fails on any unparsable or incomplete chord.
    pub fn register(&mut self, name: &str, def: TriggerDef) -> Result<(), TriggerError> {
        let keys = def.keys_for(self.platform);
        let mut triggers = Vec::with_capacity(keys.len());
        for key in keys {
            let trigger: Trigger = key.parse()?;
            if !trigger.is_complete() {
                return Err(TriggerError::Incomplete(key.clone()));
            }
            triggers.push(trigger);
        }
        self.triggers.insert(name.into(), triggers);
        Ok(())
    }

    pub fn unregister(&mut self, name: &str) -> Option<Vec<Trigger>> {
        self.triggers.remove(name)
    }

    pub fn lookup(&self, name: &str) -> Option<&[Trigger]> {
        self.triggers.get(name).map(Vec::as_slice)
    }
}

impl Default for TriggerRegistry {
    fn default() -> Self {
        Self::with_defaults(PlatformKind::default())
    }
}

fn default_trigger_defs() -> Vec<(&'static str, TriggerDef)> {
    vec![
        ("undo", TriggerDef::per_platform(&["meta+z"], &["ctrl+z"])),
        (
            "redo",
            TriggerDef::per_platform(&["meta+shift+z"], &["ctrl+y", "ctrl+shift+z"]),
        ),
        ("bold", TriggerDef::per_platform(&["meta+b"], &["ctrl+b"])),
        ("italic", TriggerDef::per_platform(&["meta+i"], &["ctrl+i"])),
        ("selectAll", TriggerDef::per_platform(&["meta+a"], &["ctrl+a"])),
        (
            "paragraph",
            TriggerDef::per_platform(&["meta+alt+0"], &["ctrl+alt+0"]),
        ),
        (
            "heading1",
            TriggerDef::per_platform(&["meta+alt+1"], &["ctrl+alt+1"]),
        ),
        (
            "heading2",
            TriggerDef::per_platform(&["meta+alt+2"], &["ctrl+alt+2"]),
        ),
        (
            "preformatted",
            TriggerDef::per_platform(&["meta+alt+7"], &["ctrl+alt+7"]),
        ),
        ("insertBreak", TriggerDef::universal(&["shift+enter"])),
        (
            "findAndReplace",
            TriggerDef::per_platform(&["meta+f"], &["ctrl+f"]),
        ),
        ("findNext", TriggerDef::per_platform(&["meta+g"], &["ctrl+g"])),
        (
            "commandHelp",
            TriggerDef::per_platform(&["meta+/"], &["ctrl+/"]),
        ),
    ]
}

/// Reverse index trigger → command, restricted to a fixed allow-list.
#[derive(Debug, Clone, Default)]
pub struct TriggerListener {
    commands: Vec<CompactString>,
    commands_by_trigger: FxHashMap<CompactString, CompactString>,
}

impl TriggerListener {
    pub fn new<I, S>(commands: I, registry: &TriggerRegistry) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut listener = Self::default();
        listener.setup_commands(commands, registry);
        listener
    }

    /// Rebuilds the index. A chord claimed by several commands resolves to the
    /// last one in `commands` order.
    pub fn setup_commands<I, S>(&mut self, commands: I, registry: &TriggerRegistry)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.commands.clear();
        self.commands_by_trigger.clear();
        for name in commands {
            let name = name.as_ref();
            self.commands.push(name.into());
            let Some(triggers) = registry.lookup(name) else {
                continue;
            };
            for trigger in triggers {
                self.commands_by_trigger.insert(trigger.key(), name.into());
            }
        }
    }

    pub fn commands(&self) -> &[CompactString] {
        &self.commands
    }

    pub fn command_by_trigger(&self, trigger: &str) -> Option<&str> {
        self.commands_by_trigger.get(trigger).map(|c| c.as_str())
    }

    pub fn command_for(&self, trigger: &Trigger) -> Option<&str> {
        self.command_by_trigger(&trigger.key())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/trigger.rs"]
mod tests;
