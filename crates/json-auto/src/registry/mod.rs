//! The frozen tables of named type definitions and views.
//!
//! Built once by [`RegistryBuilder`] and shared read-only afterwards, so
//! marshalling calls never take a lock.

pub mod builder;
mod defaults;

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::schema::{FamilySchema, KeySchema, ObjSchema};

pub use builder::RegistryBuilder;

/// A named type definition.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDef {
    /// Concrete leaf type.
    Record(ObjSchema),
    /// Open supertype with no registered subtypes; the schema is the
    /// supertype's own declared field set.
    Open(ObjSchema),
    /// Polymorphic family selected by the discriminator field.
    Family(FamilySchema),
}

impl TypeDef {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Record(_) => "record",
            Self::Open(_) => "open",
            Self::Family(_) => "family",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: IndexMap<String, TypeDef>,
    /// View name -> the view itself plus every view it extends.
    views: HashMap<String, HashSet<String>>,
    default_view_inclusion: bool,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    pub fn record(&self, name: &str) -> Option<&ObjSchema> {
        match self.types.get(name) {
            Some(TypeDef::Record(obj)) => Some(obj),
            _ => None,
        }
    }

    pub fn family(&self, name: &str) -> Option<&FamilySchema> {
        match self.types.get(name) {
            Some(TypeDef::Family(family)) => Some(family),
            _ => None,
        }
    }

    /// Registered type names in registration order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Whether `view` is `ancestor` or extends it.
    pub fn view_includes(&self, view: &str, ancestor: &str) -> bool {
        match self.views.get(view) {
            Some(ancestors) => ancestors.contains(ancestor),
            None => view == ancestor,
        }
    }

    /// Whether `key` is marshalled under `view`. No view means everything.
    pub fn is_visible(&self, key: &KeySchema, view: Option<&str>) -> bool {
        let Some(view) = view else {
            return true;
        };
        if !key.is_scoped() {
            return self.default_view_inclusion;
        }
        key.views.iter().any(|declared| self.view_includes(view, declared))
    }
}
