use serde::Serialize;
use serde_json::Value;

/// Static shape of a value as the mapper sees it.
///
/// Leaf kinds carry no constraints: serde performs the primitive checks when
/// the canonical tree is finally mapped onto a Rust type. `Ref` points at a
/// named definition held by the [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    Any,
    Bool,
    Num,
    Str,
    /// A single Unicode scalar, written as a one-character string.
    Char,
    Arr(Box<Schema>),
    /// Fixed-length array.
    Tup(Box<Schema>, usize),
    Map(Box<Schema>),
    Nullable(Box<Schema>),
    Ref(String),
}

impl Schema {
    pub fn arr(item: Schema) -> Self {
        Self::Arr(Box::new(item))
    }

    pub fn tup(item: Schema, len: usize) -> Self {
        Self::Tup(Box::new(item), len)
    }

    pub fn map(value: Schema) -> Self {
        Self::Map(Box::new(value))
    }

    pub fn nullable(inner: Schema) -> Self {
        Self::Nullable(Box::new(inner))
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self::Ref(name.into())
    }

    /// Returns the "kind" string identifier for this schema node.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Bool => "bool",
            Self::Num => "num",
            Self::Str => "str",
            Self::Char => "char",
            Self::Arr(_) => "arr",
            Self::Tup(..) => "tup",
            Self::Map(_) => "map",
            Self::Nullable(_) => "nullable",
            Self::Ref(_) => "ref",
        }
    }

    /// Human readable name used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Ref(name) => name.clone(),
            Self::Arr(item) => format!("[{}]", item.describe()),
            Self::Tup(item, len) => format!("[{}; {len}]", item.describe()),
            Self::Map(value) => format!("{{{}}}", value.describe()),
            Self::Nullable(inner) => format!("{}?", inner.describe()),
            other => other.kind().to_string(),
        }
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

/// A single declared field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct KeySchema {
    pub key: String,
    pub value: Schema,
    /// Views the field is visible under. Empty means unscoped.
    pub views: Vec<String>,
    /// Value substituted when the field is hidden by the active view on
    /// decode. Falls back to the schema default when absent.
    pub default: Option<Value>,
}

impl KeySchema {
    pub fn new(key: impl Into<String>, value: Schema) -> Self {
        Self {
            key: key.into(),
            value,
            views: Vec::new(),
            default: None,
        }
    }

    pub fn view(mut self, view: impl Into<String>) -> Self {
        self.views.push(view.into());
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Uses `T::default()` as the hidden-field default.
    ///
    /// Needed for fields of unregistered types such as transparent
    /// newtypes, which have no default the schema alone can describe.
    pub fn default_of<T: Default + Serialize>(mut self) -> Self {
        self.default = serde_json::to_value(T::default()).ok();
        self
    }

    pub fn is_scoped(&self) -> bool {
        !self.views.is_empty()
    }
}

/// Declared field set of a record or open supertype, in emission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjSchema {
    pub keys: Vec<KeySchema>,
    /// Keep undeclared keys of the serde output when encoding.
    pub encode_unknown_keys: bool,
    /// Hand undeclared keys of the input to serde when decoding.
    pub decode_unknown_keys: bool,
}

impl ObjSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: KeySchema) -> Self {
        self.keys.push(key);
        self
    }

    /// Shorthand for an unscoped field.
    pub fn field(self, key: impl Into<String>, value: Schema) -> Self {
        self.key(KeySchema::new(key, value))
    }

    pub fn encode_unknown_keys(mut self, on: bool) -> Self {
        self.encode_unknown_keys = on;
        self
    }

    pub fn decode_unknown_keys(mut self, on: bool) -> Self {
        self.decode_unknown_keys = on;
        self
    }

    pub fn get(&self, key: &str) -> Option<&KeySchema> {
        self.keys.iter().find(|k| k.key == key)
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_nested_schema() {
        let schema = Schema::arr(Schema::nullable(Schema::reference("ArbObject")));
        assert_eq!(schema.describe(), "[ArbObject?]");
        assert_eq!(Schema::map(Schema::Num).to_string(), "{num}");
        assert_eq!(Schema::tup(Schema::Char, 3).to_string(), "[char; 3]");
    }

    #[test]
    fn obj_schema_keeps_declaration_order() {
        let obj = ObjSchema::new()
            .key(KeySchema::new("priv", Schema::Num).view("private"))
            .field("pub", Schema::Num);
        let keys: Vec<&str> = obj.keys.iter().map(|k| k.key.as_str()).collect();
        assert_eq!(keys, ["priv", "pub"]);
        assert!(obj.get("priv").is_some_and(KeySchema::is_scoped));
        assert!(!obj.get("pub").is_some_and(KeySchema::is_scoped));
        assert!(!obj.has_key("missing"));
    }

    #[test]
    fn default_of_renders_the_rust_default() {
        #[derive(Default, Serialize)]
        struct Owner(String);

        let key = KeySchema::new("owner", Schema::reference("Owner")).default_of::<Owner>();
        assert_eq!(key.default, Some(Value::String(String::new())));
        let key = KeySchema::new("rgb", Schema::tup(Schema::Num, 3)).default_of::<[u8; 3]>();
        assert_eq!(key.default, Some(serde_json::json!([0, 0, 0])));
    }
}
