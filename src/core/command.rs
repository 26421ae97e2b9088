//! Command system: named, keyboard-independent operations.
//!
//! - Command: binds a name to an action method plus fixed arguments
//! - CommandRegistry: name → command, in registration order
//! - Triggers are bound separately (see `trigger`)

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use serde_json::{json, Value};

use crate::kernel::surface::{Executable, Surface};
use crate::models::SelectionKind;

#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    name: CompactString,
    action: CompactString,
    method: CompactString,
    args: Vec<Value>,
    repeatable: bool,
    /// `None` accepts every selection kind.
    supported_selections: Option<Vec<SelectionKind>>,
}

impl Command {
    pub fn new(name: &str, action: &str, method: &str) -> Self {
        Self {
            name: name.into(),
            action: action.into(),
            method: method.into(),
            args: Vec::new(),
            repeatable: true,
            supported_selections: None,
        }
    }

    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }

    pub fn non_repeatable(mut self) -> Self {
        self.repeatable = false;
        self
    }

    pub fn with_supported_selections(mut self, kinds: &[SelectionKind]) -> Self {
        self.supported_selections = Some(kinds.to_vec());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    pub fn supports_selection(&self, kind: SelectionKind) -> bool {
        self.supported_selections
            .as_ref()
            .map_or(true, |kinds| kinds.contains(&kind))
    }

    pub fn is_executable(&self, surface: &Surface) -> bool {
        !surface.is_destroyed() && self.supports_selection(surface.selection().kind())
    }

    /// Runs the bound action method on `surface`. `extra` is appended to the
    /// command's own arguments.
    pub fn execute(
        &self,
        surface: &mut Surface,
        is_repeated: bool,
        source: &str,
        extra: &[Value],
    ) -> bool {
        if is_repeated && !self.repeatable {
            return false;
        }
        if !self.is_executable(surface) {
            tracing::debug!(command = %self.name, "command not executable for selection");
            return false;
        }

        let mut args = self.args.clone();
        args.extend_from_slice(extra);
        tracing::debug!(command = %self.name, source, "execute command");
        surface.execute_with_source(
            Executable::Action {
                name: &self.action,
                method: &self.method,
            },
            source,
            &args,
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: FxHashMap<CompactString, Command>,
    order: Vec<CompactString>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for command in default_commands() {
            registry.register(command);
        }
        registry
    }

    /// Replaces any command registered under the same name.
    pub fn register(&mut self, command: Command) {
        if !self.commands.contains_key(command.name()) {
            self.order.push(command.name.clone());
        }
        self.commands.insert(command.name.clone(), command);
    }

    pub fn unregister(&mut self, name: &str) -> Option<Command> {
        let removed = self.commands.remove(name)?;
        self.order.retain(|n| n != name);
        Some(removed)
    }

    pub fn lookup(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|n| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

fn default_commands() -> Vec<Command> {
    use SelectionKind::{Linear, Node};

    vec![
        Command::new("undo", "history", "undo"),
        Command::new("redo", "history", "redo"),
        Command::new("bold", "annotation", "toggle")
            .with_args(vec![json!("bold")])
            .with_supported_selections(&[Linear]),
        Command::new("italic", "annotation", "toggle")
            .with_args(vec![json!("italic")])
            .with_supported_selections(&[Linear]),
        Command::new("clearAnnotations", "annotation", "clear")
            .with_supported_selections(&[Linear]),
        Command::new("selectAll", "content", "selectAll").non_repeatable(),
        Command::new("paragraph", "format", "convert")
            .with_args(vec![json!("paragraph")])
            .with_supported_selections(&[Linear, Node]),
        Command::new("heading1", "format", "convert")
            .with_args(vec![json!("heading"), json!(1)])
            .with_supported_selections(&[Linear, Node]),
        Command::new("heading2", "format", "convert")
            .with_args(vec![json!("heading"), json!(2)])
            .with_supported_selections(&[Linear, Node]),
        Command::new("preformatted", "format", "convert")
            .with_args(vec![json!("preformatted")])
            .with_supported_selections(&[Linear, Node]),
        Command::new("insertBreak", "content", "break").with_supported_selections(&[Linear]),
        Command::new("findAndReplace", "window", "toggle")
            .with_args(vec![json!("findAndReplace")])
            .non_repeatable(),
        Command::new("findNext", "window", "open")
            .with_args(vec![json!("findAndReplace"), json!({ "findNext": true })]),
        Command::new("commandHelp", "window", "open")
            .with_args(vec![json!("commandHelp")])
            .non_repeatable(),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/core/command.rs"]
mod tests;
