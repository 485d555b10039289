//! Typed, view-bound codecs for message bodies.
//!
//! An [`AutoCodec`] is what a transport binds once per message type: HTTP
//! bodies, WebSocket frames or queue payloads all go through `inject` and
//! `extract` without knowing about views or discriminators.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::mapper::Mapper;
use crate::typed::Typed;

/// Custom writer replacing the mapper's default serialization of `T`.
pub type WriteFn<T> = Arc<dyn Fn(&Mapper, &T) -> Result<String> + Send + Sync>;

pub struct AutoCodec<T> {
    mapper: Mapper,
    view: Option<String>,
    write_fn: Option<WriteFn<T>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> AutoCodec<T> {
    pub fn new(mapper: Mapper) -> Self {
        Self {
            mapper,
            view: None,
            write_fn: None,
            _marker: PhantomData,
        }
    }

    pub fn view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    /// Replaces the default writer.
    ///
    /// A write function built on [`Mapper::writer_for`] serializes only the
    /// declared fields of its static type, even for richer runtime values.
    pub fn with_write_fn<F>(mut self, write_fn: F) -> Self
    where
        F: Fn(&Mapper, &T) -> Result<String> + Send + Sync + 'static,
    {
        self.write_fn = Some(Arc::new(write_fn));
        self
    }

    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    pub fn bound_view(&self) -> Option<&str> {
        self.view.as_deref()
    }
}

impl<T: Typed + Serialize> AutoCodec<T> {
    pub fn inject(&self, value: &T) -> Result<String> {
        match &self.write_fn {
            Some(write_fn) => write_fn(&self.mapper, value),
            None => self.mapper.serialize(value, self.bound_view()),
        }
    }

    pub fn inject_tree(&self, value: &T) -> Result<Value> {
        match &self.write_fn {
            Some(write_fn) => {
                let text = write_fn(&self.mapper, value)?;
                serde_json::from_str(&text).map_err(Error::Parse)
            }
            None => self.mapper.to_tree(value, self.bound_view()),
        }
    }
}

impl<T: Typed + DeserializeOwned> AutoCodec<T> {
    pub fn extract(&self, text: &str) -> Result<T> {
        self.mapper.deserialize(text, self.bound_view())
    }

    pub fn extract_tree(&self, tree: Value) -> Result<T> {
        self.mapper.from_tree(tree, self.bound_view())
    }
}

impl<T> Clone for AutoCodec<T> {
    fn clone(&self) -> Self {
        Self {
            mapper: self.mapper.clone(),
            view: self.view.clone(),
            write_fn: self.write_fn.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for AutoCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoCodec")
            .field("view", &self.view)
            .field("custom_write_fn", &self.write_fn.is_some())
            .finish()
    }
}
