//! The marshalling facade.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::auto::AutoCodec;
use crate::codec::Codec;
use crate::config::MapperConfig;
use crate::error::{Error, Result, RegistryError};
use crate::registry::{Registry, RegistryBuilder};
use crate::schema::{ObjSchema, Schema, Subtype};
use crate::typed::{Record, Typed};
use crate::view::ViewTag;

/// Converts typed values to and from JSON text and trees.
///
/// Cloning is cheap: clones share the frozen registry and configuration, so a
/// single mapper can serve any number of threads.
#[derive(Debug, Clone)]
pub struct Mapper {
    config: Arc<MapperConfig>,
    registry: Arc<Registry>,
}

impl Mapper {
    pub fn builder() -> MapperBuilder {
        MapperBuilder::new()
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    fn codec<'a>(&'a self, view: Option<&'a str>) -> Codec<'a> {
        Codec::new(&self.registry, &self.config, view)
    }

    /// Compact JSON text for `value`, restricted to fields visible under `view`.
    pub fn serialize<T>(&self, value: &T, view: Option<&str>) -> Result<String>
    where
        T: Typed + Serialize + ?Sized,
    {
        let tree = self.to_tree(value, view)?;
        serde_json::to_string(&tree).map_err(Error::Encode)
    }

    pub fn to_tree<T>(&self, value: &T, view: Option<&str>) -> Result<Value>
    where
        T: Typed + Serialize + ?Sized,
    {
        let raw = serde_json::to_value(value).map_err(Error::Encode)?;
        self.codec(view).encode(raw, &T::schema())
    }

    /// Parses `text` into a `T`. Fields hidden by `view` take their defaults.
    pub fn deserialize<T>(&self, text: &str, view: Option<&str>) -> Result<T>
    where
        T: Typed + DeserializeOwned,
    {
        self.from_tree(parse(text)?, view)
    }

    pub fn from_tree<T>(&self, tree: Value, view: Option<&str>) -> Result<T>
    where
        T: Typed + DeserializeOwned,
    {
        let schema = T::schema();
        let canonical = self.codec(view).decode(tree, &schema)?;
        serde_json::from_value(canonical).map_err(|source| {
            debug!(target_type = %schema, error = %source, "Decode failed");
            Error::Decode {
                type_name: schema.describe(),
                source,
            }
        })
    }

    /// Serializes by the value's runtime type.
    pub fn serialize_dyn(&self, value: &dyn Record, view: Option<&str>) -> Result<String> {
        let tree = self.to_tree_dyn(value, view)?;
        serde_json::to_string(&tree).map_err(Error::Encode)
    }

    pub fn to_tree_dyn(&self, value: &dyn Record, view: Option<&str>) -> Result<Value> {
        let raw = value.to_raw()?;
        self.codec(view).encode(raw, &value.runtime_schema())
    }

    /// A writer bound to a static schema, whatever the runtime type of the
    /// values it is given.
    ///
    /// Values of unregistered subtypes lose every field the static type does
    /// not declare. Use [`MapperBuilder::register_polymorphic`] when subtype
    /// fields must survive.
    pub fn writer_for(&self, schema: Schema) -> Writer<'_> {
        Writer {
            mapper: self,
            schema,
            view: None,
        }
    }

    /// A reader producing serde's canonical tree for a static schema.
    pub fn reader_for(&self, schema: Schema) -> Reader<'_> {
        Reader {
            mapper: self,
            schema,
            view: None,
        }
    }

    pub fn auto<T>(&self) -> AutoCodec<T> {
        AutoCodec::new(self.clone())
    }

    pub fn auto_view<T>(&self, view: impl Into<String>) -> AutoCodec<T> {
        AutoCodec::new(self.clone()).view(view)
    }

    /// Indented rendering of a tree, for logs and diagnostics.
    pub fn pretty(&self, tree: &Value) -> Result<String> {
        serde_json::to_string_pretty(tree).map_err(Error::Encode)
    }
}

fn parse(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(Error::Parse)
}

pub struct Writer<'a> {
    mapper: &'a Mapper,
    schema: Schema,
    view: Option<String>,
}

impl Writer<'_> {
    pub fn with_view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn write(&self, value: &dyn Record) -> Result<String> {
        let tree = self.write_tree(value)?;
        serde_json::to_string(&tree).map_err(Error::Encode)
    }

    pub fn write_tree(&self, value: &dyn Record) -> Result<Value> {
        let raw = value.to_raw()?;
        self.mapper
            .codec(self.view.as_deref())
            .encode_as(raw, &self.schema, &value.runtime_schema())
    }
}

pub struct Reader<'a> {
    mapper: &'a Mapper,
    schema: Schema,
    view: Option<String>,
}

impl Reader<'_> {
    pub fn with_view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    /// Canonical tree for `text`.
    pub fn read(&self, text: &str) -> Result<Value> {
        self.read_tree(parse(text)?)
    }

    pub fn read_tree(&self, tree: Value) -> Result<Value> {
        self.mapper
            .codec(self.view.as_deref())
            .decode(tree, &self.schema)
    }

    /// Reads `text` into any deserializable type, using this reader's schema
    /// rather than the type's own.
    pub fn read_as<T: DeserializeOwned>(&self, text: &str) -> Result<T> {
        let canonical = self.read(text)?;
        serde_json::from_value(canonical).map_err(|source| Error::Decode {
            type_name: self.schema.describe(),
            source,
        })
    }
}

/// Configuration plus registrations; [`build`](Self::build) freezes them.
#[derive(Debug, Clone, Default)]
pub struct MapperBuilder {
    config: MapperConfig,
    registry: RegistryBuilder,
}

impl MapperBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: MapperConfig) -> Self {
        self.config = config;
        self
    }

    pub fn discriminator(mut self, field: impl Into<String>) -> Self {
        self.config.discriminator = field.into();
        self
    }

    pub fn fail_on_unknown_keys(mut self, on: bool) -> Self {
        self.config.fail_on_unknown_keys = on;
        self
    }

    pub fn register_record(mut self, name: impl Into<String>, schema: ObjSchema) -> Self {
        self.registry = self.registry.register_record(name, schema);
        self
    }

    pub fn register_open(mut self, name: impl Into<String>, schema: ObjSchema) -> Self {
        self.registry = self.registry.register_open(name, schema);
        self
    }

    pub fn register_polymorphic(
        mut self,
        parent: impl Into<String>,
        subtypes: impl IntoIterator<Item = Subtype>,
    ) -> Self {
        self.registry = self.registry.register_polymorphic(parent, subtypes);
        self
    }

    pub fn register_view(mut self, view: ViewTag) -> Self {
        self.registry = self.registry.register_view(view);
        self
    }

    pub fn build(self) -> Result<Mapper, RegistryError> {
        let registry = self.registry.build(&self.config)?;
        Ok(Mapper {
            config: Arc::new(self.config),
            registry: Arc::new(registry),
        })
    }
}
