//! View tags, the audience markers restricting which fields are marshalled.

/// A named view, optionally extending other views.
///
/// A field declared for view `public` is also visible under every view that
/// extends `public`, directly or transitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewTag {
    name: String,
    extends: Vec<String>,
}

impl ViewTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: Vec::new(),
        }
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends.push(parent.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parents(&self) -> &[String] {
        &self.extends
    }
}

impl std::fmt::Display for ViewTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
