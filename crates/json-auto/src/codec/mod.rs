//! Tree transforms between serde's canonical form and the wire form.
//!
//! Encoding walks the serde output alongside the static schema, dropping
//! fields hidden by the active view and replacing externally tagged family
//! variants with discriminated objects. Decoding runs the same walk in
//! reverse and fills hidden fields with defaults before serde sees the tree.

mod decode;
mod encode;

use serde_json::{Map, Value};

use crate::config::MapperConfig;
use crate::registry::Registry;
use crate::schema::ObjSchema;

/// One marshalling pass: frozen tables plus the active view.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Codec<'a> {
    registry: &'a Registry,
    config: &'a MapperConfig,
    view: Option<&'a str>,
}

impl<'a> Codec<'a> {
    pub(crate) fn new(registry: &'a Registry, config: &'a MapperConfig, view: Option<&'a str>) -> Self {
        Self {
            registry,
            config,
            view,
        }
    }
}

/// Splits an object into per-key slots, in declaration order, and the
/// undeclared remainder. A key equal to `skip` is discarded.
fn split_fields(
    fields: Map<String, Value>,
    obj: &ObjSchema,
    skip: Option<&str>,
) -> (Vec<Option<Value>>, Map<String, Value>) {
    let mut declared = vec![None; obj.keys.len()];
    let mut unknown = Map::new();
    for (name, value) in fields {
        match obj.keys.iter().position(|key| key.key == name) {
            Some(index) => declared[index] = Some(value),
            None if skip == Some(name.as_str()) => {}
            None => {
                unknown.insert(name, value);
            }
        }
    }
    (declared, unknown)
}
