use serde_json::{Map, Value};

use super::Registry;
use crate::schema::{KeySchema, Schema};

impl Registry {
    /// Value substituted for a field hidden by the active view.
    ///
    /// `None` when neither the key nor its schema provides one: families,
    /// open supertypes, unregistered types and self-recursive records. The
    /// builder rejects hideable fields in that position.
    pub fn hidden_default(&self, key: &KeySchema) -> Option<Value> {
        match &key.default {
            Some(value) => Some(value.clone()),
            None => self.default_for(&key.value, &mut Vec::new()),
        }
    }

    fn default_for(&self, schema: &Schema, seen: &mut Vec<String>) -> Option<Value> {
        match schema {
            Schema::Any | Schema::Nullable(_) => Some(Value::Null),
            Schema::Bool => Some(Value::Bool(false)),
            Schema::Num => Some(Value::from(0)),
            Schema::Str => Some(Value::String(String::new())),
            Schema::Char => Some(Value::String(char::default().to_string())),
            Schema::Arr(_) => Some(Value::Array(Vec::new())),
            Schema::Tup(item, len) => {
                let item = self.default_for(item, seen)?;
                Some(Value::Array(vec![item; *len]))
            }
            Schema::Map(_) => Some(Value::Object(Map::new())),
            Schema::Ref(name) => {
                let obj = self.record(name)?;
                if seen.iter().any(|s| s == name) {
                    return None;
                }
                seen.push(name.clone());
                let mut out = Map::new();
                for key in &obj.keys {
                    let value = match &key.default {
                        Some(value) => Some(value.clone()),
                        None => self.default_for(&key.value, seen),
                    };
                    let Some(value) = value else {
                        seen.pop();
                        return None;
                    };
                    out.insert(key.key.clone(), value);
                }
                seen.pop();
                Some(Value::Object(out))
            }
        }
    }
}
