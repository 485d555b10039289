use serde_json::{Map, Value};
use tracing::trace;

use super::{split_fields, Codec};
use crate::error::{Error, Result};
use crate::registry::TypeDef;
use crate::schema::{FamilySchema, ObjSchema, Schema, Subtype};

impl Codec<'_> {
    /// Serde output -> wire tree, driven by the static schema.
    pub(crate) fn encode(&self, raw: Value, schema: &Schema) -> Result<Value> {
        match schema {
            Schema::Any | Schema::Bool | Schema::Num | Schema::Str | Schema::Char => Ok(raw),
            Schema::Nullable(inner) => {
                if raw.is_null() {
                    Ok(raw)
                } else {
                    self.encode(raw, inner)
                }
            }
            Schema::Arr(item) | Schema::Tup(item, _) => match raw {
                Value::Array(items) => items
                    .into_iter()
                    .map(|v| self.encode(v, item))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Array),
                other => Ok(other),
            },
            Schema::Map(value) => match raw {
                Value::Object(entries) => entries
                    .into_iter()
                    .map(|(k, v)| Ok((k, self.encode(v, value)?)))
                    .collect::<Result<Map<_, _>>>()
                    .map(Value::Object),
                other => Ok(other),
            },
            Schema::Ref(name) => self.encode_ref(raw, name),
        }
    }

    /// Like [`encode`](Self::encode), but for a value whose runtime type may
    /// differ from the declared one.
    ///
    /// Only registered family members keep their own identity; any other
    /// mismatch is written through the declared schema, so fields the
    /// declared type does not know about are dropped.
    pub(crate) fn encode_as(&self, raw: Value, declared: &Schema, runtime: &Schema) -> Result<Value> {
        if declared == runtime {
            return self.encode(raw, declared);
        }
        match (declared, runtime) {
            (Schema::Nullable(d), Schema::Nullable(r)) => {
                if raw.is_null() {
                    Ok(raw)
                } else {
                    self.encode_as(raw, d, r)
                }
            }
            (Schema::Nullable(d), r) => {
                if raw.is_null() {
                    Ok(raw)
                } else {
                    self.encode_as(raw, d, r)
                }
            }
            (Schema::Arr(d) | Schema::Tup(d, _), Schema::Arr(r) | Schema::Tup(r, _)) => match raw {
                Value::Array(items) => items
                    .into_iter()
                    .map(|v| self.encode_as(v, d, r))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Array),
                other => Ok(other),
            },
            (Schema::Map(d), Schema::Map(r)) => match raw {
                Value::Object(entries) => entries
                    .into_iter()
                    .map(|(k, v)| Ok((k, self.encode_as(v, d, r)?)))
                    .collect::<Result<Map<_, _>>>()
                    .map(Value::Object),
                other => Ok(other),
            },
            (Schema::Ref(parent), Schema::Ref(child)) => {
                let member = self
                    .registry
                    .family(parent)
                    .and_then(|family| family.by_child(child));
                match member {
                    Some(subtype) => self.encode_member(Some(raw), parent, subtype),
                    None => self.encode(raw, declared),
                }
            }
            _ => self.encode(raw, declared),
        }
    }

    fn encode_ref(&self, raw: Value, name: &str) -> Result<Value> {
        match self.registry.get(name) {
            Some(TypeDef::Record(obj)) | Some(TypeDef::Open(obj)) => self.encode_record(raw, obj),
            Some(TypeDef::Family(family)) => self.encode_family(raw, name, family),
            None => {
                trace!(type_name = name, "Unregistered type, writing serde output as is");
                Ok(raw)
            }
        }
    }

    fn encode_record(&self, raw: Value, obj: &ObjSchema) -> Result<Value> {
        let fields = match raw {
            Value::Object(fields) => fields,
            other => return Ok(other),
        };
        let (declared, unknown) = split_fields(fields, obj, None);

        let mut out = Map::new();
        for (key, slot) in obj.keys.iter().zip(declared) {
            let Some(value) = slot else {
                continue;
            };
            if self.registry.is_visible(key, self.view) {
                out.insert(key.key.clone(), self.encode(value, &key.value)?);
            }
        }
        if obj.encode_unknown_keys {
            out.extend(unknown);
        }
        Ok(Value::Object(out))
    }

    fn encode_family(&self, raw: Value, name: &str, family: &FamilySchema) -> Result<Value> {
        let (variant, payload) = match raw {
            Value::String(variant) => (variant, None),
            Value::Object(entries) if entries.len() == 1 => match entries.into_iter().next() {
                Some((variant, payload)) => (variant, Some(payload)),
                None => return Err(not_a_variant(name)),
            },
            _ => return Err(not_a_variant(name)),
        };
        let subtype = family
            .by_variant(&variant)
            .ok_or_else(|| Error::UnregisteredVariant {
                family: name.to_string(),
                variant: variant.clone(),
            })?;
        self.encode_member(payload, name, subtype)
    }

    /// Discriminator first, then the child's own fields.
    fn encode_member(&self, payload: Option<Value>, family: &str, subtype: &Subtype) -> Result<Value> {
        let mut out = Map::new();
        out.insert(
            self.config.discriminator.clone(),
            Value::String(subtype.tag.clone()),
        );
        if let Some(child) = &subtype.child {
            let Some(payload) = payload else {
                return Err(Error::UnexpectedShape {
                    type_name: family.to_string(),
                    expected: "a variant carrying a record",
                });
            };
            match self.encode_ref(payload, child)? {
                Value::Object(fields) => {
                    let discriminator = self.config.discriminator.as_str();
                    out.extend(fields.into_iter().filter(|(key, _)| key != discriminator));
                }
                _ => {
                    return Err(Error::UnexpectedShape {
                        type_name: child.clone(),
                        expected: "an object",
                    })
                }
            }
        }
        Ok(Value::Object(out))
    }
}

fn not_a_variant(family: &str) -> Error {
    Error::UnexpectedShape {
        type_name: family.to_string(),
        expected: "an externally tagged enum variant",
    }
}
