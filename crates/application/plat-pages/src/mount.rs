//! Named output slots a page renders into.

/// Logical mount names mapped to their rendered markup.
///
/// Only declared names accept writes. Writing to an undeclared name is a
/// no-op, so a controller never has to check whether a page carries a
/// particular section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountRegistry {
    slots: Vec<(String, Option<String>)>,
}

impl MountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mounts(names: &[&str]) -> Self {
        let mut registry = Self::new();
        for name in names {
            registry.declare(name);
        }
        registry
    }

    /// Declare `name`; declaring twice keeps the first position
    pub fn declare(&mut self, name: &str) {
        if !self.is_declared(name) {
            self.slots.push((name.to_string(), None));
        }
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.slots.iter().any(|(n, _)| n == name)
    }

    /// Replace the content of `name`. Returns `false` when `name` was
    /// never declared.
    pub fn set(&mut self, name: &str, html: impl Into<String>) -> bool {
        match self.slots.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => {
                *slot = Some(html.into());
                true
            }
            None => {
                tracing::debug!("Mount {} not declared on this page, skipping", name);
                false
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.slots
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, slot)| slot.as_deref())
    }

    /// Declared names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|(n, _)| n.as_str())
    }

    /// `(name, content)` in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.slots.iter().map(|(n, s)| (n.as_str(), s.as_deref()))
    }

    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|(_, s)| s.is_some()).count()
    }
}
