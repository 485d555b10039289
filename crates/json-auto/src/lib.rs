//! Schema-driven JSON auto-marshalling on top of serde.
//!
//! Types describe their static shape through [`Typed`]; named records,
//! open supertypes and polymorphic families are registered once on a
//! [`MapperBuilder`] and frozen into a [`Registry`]. The resulting [`Mapper`]
//! then applies two things serde alone does not:
//!
//! - **views**: per-field audience scoping, on both encode and decode;
//! - **discriminators**: a reserved key (default `"@class"`) tagging each
//!   member of a registered family.
//!
//! # Example
//!
//! ```
//! use json_auto::{typed, KeySchema, Mapper, ObjSchema, Schema, ViewTag};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct ArbObjectWithView {
//!     #[serde(rename = "priv")]
//!     private: i32,
//!     #[serde(rename = "pub")]
//!     public: i32,
//! }
//! typed!(ArbObjectWithView => "ArbObjectWithView");
//!
//! let mapper = Mapper::builder()
//!     .register_view(ViewTag::new("public"))
//!     .register_view(ViewTag::new("private").extends("public"))
//!     .register_record(
//!         "ArbObjectWithView",
//!         ObjSchema::new()
//!             .key(KeySchema::new("priv", Schema::Num).view("private"))
//!             .key(KeySchema::new("pub", Schema::Num).view("public")),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let value = ArbObjectWithView { private: 3, public: 5 };
//! assert_eq!(mapper.serialize(&value, Some("public")).unwrap(), r#"{"pub":5}"#);
//!
//! let text = mapper.serialize(&value, Some("private")).unwrap();
//! assert_eq!(text, r#"{"priv":3,"pub":5}"#);
//!
//! let seen_publicly: ArbObjectWithView = mapper.deserialize(&text, Some("public")).unwrap();
//! assert_eq!(seen_publicly, ArbObjectWithView { private: 0, public: 5 });
//! ```

pub mod auto;
mod codec;
pub mod config;
pub mod error;
pub mod mapper;
pub mod registry;
pub mod schema;
pub mod typed;
pub mod view;

pub use auto::{AutoCodec, WriteFn};
pub use config::{MapperConfig, DEFAULT_DISCRIMINATOR};
pub use error::{Error, RegistryError, Result};
pub use mapper::{Mapper, MapperBuilder, Reader, Writer};
pub use registry::{Registry, RegistryBuilder, TypeDef};
pub use schema::{FamilySchema, KeySchema, ObjSchema, Schema, Subtype};
pub use typed::{Record, Typed};
pub use view::ViewTag;
