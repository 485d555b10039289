//! Schema AST: static shapes, record field sets and polymorphic families.

pub mod family;
#[allow(clippy::module_inception)]
pub mod schema;

pub use family::{FamilySchema, Subtype};
pub use schema::*;
