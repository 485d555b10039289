//! Fixture types and the registry shared by the integration tests.
#![allow(dead_code)]

use json_auto::{typed, KeySchema, Mapper, MapperBuilder, ObjSchema, Schema, Subtype, Typed, ViewTag};
use serde::{Deserialize, Serialize};

pub const PUBLIC: &str = "public";
pub const PRIVATE: &str = "private";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbObject {
    pub string: String,
    pub child: Option<Box<ArbObject>>,
    pub numbers: Vec<i32>,
    pub bool: bool,
}

impl ArbObject {
    pub fn sample() -> Self {
        Self {
            string: "hello".into(),
            child: Some(Box::new(Self {
                string: "world".into(),
                child: None,
                numbers: vec![1],
                bool: true,
            })),
            numbers: vec![],
            bool: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArbObjectWithView {
    #[serde(rename = "priv")]
    pub private: i32,
    #[serde(rename = "pub")]
    pub public: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirstChild {
    pub something: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondChild {
    pub something_else: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PolymorphicParent {
    FirstChild(FirstChild),
    SecondChild(SecondChild),
}

impl PolymorphicParent {
    pub fn first(something: &str) -> Self {
        Self::FirstChild(FirstChild {
            something: something.into(),
        })
    }

    pub fn second(something_else: &str) -> Self {
        Self::SecondChild(SecondChild {
            something_else: something_else.into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonSealedChild {
    pub something: String,
}

/// Implementation of the open `Interface` supertype carrying an extra field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceImpl {
    pub value: String,
    pub sub_value: String,
}

impl Default for InterfaceImpl {
    fn default() -> Self {
        Self {
            value: "hello".into(),
            sub_value: "123".into(),
        }
    }
}

/// Family member whose own fields are view-scoped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Locker {
    pub id: i32,
    pub secret: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Storage {
    Locker(Locker),
    Open(FirstChild),
}

typed!(
    ArbObject => "ArbObject",
    ArbObjectWithView => "ArbObjectWithView",
    FirstChild => "FirstChild",
    SecondChild => "SecondChild",
    PolymorphicParent => "PolymorphicParent",
    NonSealedChild => "NonSealedChild",
    InterfaceImpl => "InterfaceImpl",
    Locker => "Locker",
    Storage => "Storage",
);

pub fn builder() -> MapperBuilder {
    Mapper::builder()
        .register_view(ViewTag::new(PUBLIC))
        .register_view(ViewTag::new(PRIVATE).extends(PUBLIC))
        .register_record(
            "ArbObject",
            ObjSchema::new()
                .field("string", Schema::Str)
                .field("child", Option::<Box<ArbObject>>::schema())
                .field("numbers", Vec::<i32>::schema())
                .field("bool", Schema::Bool),
        )
        .register_record(
            "ArbObjectWithView",
            ObjSchema::new()
                .key(KeySchema::new("priv", Schema::Num).view(PRIVATE))
                .key(KeySchema::new("pub", Schema::Num).view(PUBLIC)),
        )
        .register_record("FirstChild", ObjSchema::new().field("something", Schema::Str))
        .register_record("SecondChild", ObjSchema::new().field("somethingElse", Schema::Str))
        .register_polymorphic(
            "PolymorphicParent",
            [
                Subtype::new("first", "FirstChild"),
                Subtype::new("second", "SecondChild"),
            ],
        )
        .register_record(
            "Locker",
            ObjSchema::new()
                .field("id", Schema::Num)
                .key(KeySchema::new("secret", Schema::Str).view(PRIVATE)),
        )
        .register_polymorphic(
            "Storage",
            [
                Subtype::new("locker", "Locker"),
                Subtype::new("open", "FirstChild").variant("Open"),
            ],
        )
        .register_open("Interface", ObjSchema::new().field("value", Schema::Str))
        .register_open("NotSealedParent", ObjSchema::new())
        .register_record("NonSealedChild", ObjSchema::new().field("something", Schema::Str))
}

pub fn mapper() -> Mapper {
    builder().build().expect("fixture registry is valid")
}
