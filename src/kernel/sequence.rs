//! Typed sequences that fire a command, e.g. `# ` at the start of a block.

use compact_str::CompactString;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    name: CompactString,
    command: CompactString,
    data: CompactString,
    /// Characters removed before the command runs.
    strip: usize,
    /// Match only when the sequence is the whole text before the caret.
    block_start: bool,
}

impl Sequence {
    pub fn new(name: &str, command: &str, data: &str, strip: usize) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            data: data.into(),
            strip,
            block_start: false,
        }
    }

    pub fn at_block_start(mut self) -> Self {
        self.block_start = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn strip(&self) -> usize {
        self.strip
    }

    pub fn matches(&self, before_caret: &str) -> bool {
        if self.block_start {
            before_caret == self.data
        } else {
            before_caret.ends_with(self.data.as_str())
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SequenceRegistry {
    sequences: Vec<Sequence>,
}

impl SequenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Sequence::new("heading1", "heading1", "# ", 2).at_block_start());
        registry.register(Sequence::new("heading2", "heading2", "## ", 3).at_block_start());
        registry.register(Sequence::new("preformatted", "preformatted", "```", 3).at_block_start());
        registry
    }

    pub fn register(&mut self, sequence: Sequence) {
        self.sequences.retain(|s| s.name != sequence.name);
        self.sequences.push(sequence);
    }

    pub fn find_matching<'a>(&'a self, before_caret: &'a str) -> impl Iterator<Item = &'a Sequence> {
        self.sequences.iter().filter(move |s| s.matches(before_caret))
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/sequence.rs"]
mod tests;
