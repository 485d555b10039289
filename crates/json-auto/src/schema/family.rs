//! Polymorphic families: a closed set of subtypes sharing one parent.
//!
//! On the Rust side a family is an enum in serde's default (externally
//! tagged) representation: `{"Variant": {..child fields..}}`. On the wire it
//! is the child's fields plus the discriminator key holding the tag.

/// One registered member of a family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtype {
    /// Discriminator value written on the wire.
    pub tag: String,
    /// Enum variant name serde uses for this member.
    pub variant: String,
    /// Registered record describing the payload. `None` for unit variants.
    pub child: Option<String>,
}

impl Subtype {
    /// A member whose enum variant is named after its child record.
    pub fn new(tag: impl Into<String>, child: impl Into<String>) -> Self {
        let child = child.into();
        Self {
            tag: tag.into(),
            variant: child.clone(),
            child: Some(child),
        }
    }

    /// A payload-less member.
    pub fn unit(tag: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            variant: variant.into(),
            child: None,
        }
    }

    /// Overrides the enum variant name.
    pub fn variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = variant.into();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilySchema {
    pub subtypes: Vec<Subtype>,
}

impl FamilySchema {
    pub fn new(subtypes: impl IntoIterator<Item = Subtype>) -> Self {
        Self {
            subtypes: subtypes.into_iter().collect(),
        }
    }

    pub fn by_tag(&self, tag: &str) -> Option<&Subtype> {
        self.subtypes.iter().find(|s| s.tag == tag)
    }

    pub fn by_variant(&self, variant: &str) -> Option<&Subtype> {
        self.subtypes.iter().find(|s| s.variant == variant)
    }

    pub fn by_child(&self, child: &str) -> Option<&Subtype> {
        self.subtypes
            .iter()
            .find(|s| s.child.as_deref() == Some(child))
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.subtypes.iter().map(|s| s.tag.as_str())
    }
}
