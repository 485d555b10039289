use serde_json::{Map, Value};
use tracing::trace;

use super::{split_fields, Codec};
use crate::error::{Error, Result};
use crate::registry::TypeDef;
use crate::schema::{FamilySchema, ObjSchema, Schema};

impl Codec<'_> {
    /// Wire tree -> serde input, driven by the static schema.
    ///
    /// Primitive kinds are not checked here; serde reports them when the
    /// result is mapped onto the target type.
    pub(crate) fn decode(&self, tree: Value, schema: &Schema) -> Result<Value> {
        match schema {
            Schema::Any | Schema::Bool | Schema::Num | Schema::Str | Schema::Char => Ok(tree),
            Schema::Nullable(inner) => {
                if tree.is_null() {
                    Ok(tree)
                } else {
                    self.decode(tree, inner)
                }
            }
            Schema::Arr(item) | Schema::Tup(item, _) => match tree {
                Value::Array(items) => items
                    .into_iter()
                    .map(|v| self.decode(v, item))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Array),
                other => Ok(other),
            },
            Schema::Map(value) => match tree {
                Value::Object(entries) => entries
                    .into_iter()
                    .map(|(k, v)| Ok((k, self.decode(v, value)?)))
                    .collect::<Result<Map<_, _>>>()
                    .map(Value::Object),
                other => Ok(other),
            },
            Schema::Ref(name) => self.decode_ref(tree, name),
        }
    }

    fn decode_ref(&self, tree: Value, name: &str) -> Result<Value> {
        match self.registry.get(name) {
            Some(TypeDef::Record(obj)) => self.decode_record(tree, name, obj),
            Some(TypeDef::Family(family)) => self.decode_family(tree, name, family),
            Some(TypeDef::Open(_)) => Err(Error::AmbiguousType {
                type_name: name.to_string(),
            }),
            None => {
                trace!(type_name = name, "Unregistered type, handing tree to serde as is");
                Ok(tree)
            }
        }
    }

    fn decode_record(&self, tree: Value, name: &str, obj: &ObjSchema) -> Result<Value> {
        let fields = match tree {
            Value::Object(fields) => fields,
            other => return Ok(other),
        };
        let (declared, unknown) = split_fields(fields, obj, Some(self.config.discriminator.as_str()));

        let mut out = Map::new();
        for (key, slot) in obj.keys.iter().zip(declared) {
            if self.registry.is_visible(key, self.view) {
                if let Some(value) = slot {
                    out.insert(key.key.clone(), self.decode(value, &key.value)?);
                }
            } else if let Some(default) = self.registry.hidden_default(key) {
                out.insert(key.key.clone(), default);
            }
        }

        if !unknown.is_empty() {
            if obj.decode_unknown_keys {
                out.extend(unknown);
            } else if self.config.fail_on_unknown_keys {
                return Err(Error::UnknownKey {
                    type_name: name.to_string(),
                    key: unknown.keys().next().cloned().unwrap_or_default(),
                });
            } else {
                trace!(type_name = name, dropped = unknown.len(), "Dropping undeclared keys");
            }
        }
        Ok(Value::Object(out))
    }

    fn decode_family(&self, tree: Value, name: &str, family: &FamilySchema) -> Result<Value> {
        let mut fields = match tree {
            Value::Object(fields) => fields,
            _ => {
                return Err(Error::UnexpectedShape {
                    type_name: name.to_string(),
                    expected: "an object",
                })
            }
        };
        let tag = match fields.remove(&self.config.discriminator) {
            Some(Value::String(tag)) => tag,
            _ => {
                return Err(Error::MissingDiscriminator {
                    family: name.to_string(),
                    field: self.config.discriminator.clone(),
                })
            }
        };
        let subtype = family
            .by_tag(&tag)
            .ok_or_else(|| Error::UnknownDiscriminator {
                family: name.to_string(),
                tag: tag.clone(),
            })?;

        match &subtype.child {
            None => Ok(Value::String(subtype.variant.clone())),
            Some(child) => {
                let payload = self.decode_ref(Value::Object(fields), child)?;
                let mut out = Map::new();
                out.insert(subtype.variant.clone(), payload);
                Ok(Value::Object(out))
            }
        }
    }
}
