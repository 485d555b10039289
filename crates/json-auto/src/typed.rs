//! Static and runtime schema providers.

use std::collections::{BTreeMap, HashMap, VecDeque};

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::schema::Schema;

/// A type whose static shape is known to the mapper.
///
/// Records and families implement this by pointing at their registry name,
/// usually through the [`typed!`](crate::typed) macro.
pub trait Typed {
    fn schema() -> Schema;
}

/// Object-safe view of a serializable value that knows its runtime type.
///
/// Every `Typed + Serialize` type implements it, so a `&dyn Record` can
/// stand in for a value whose concrete type is only known at runtime.
pub trait Record {
    /// Schema of the value's concrete type.
    fn runtime_schema(&self) -> Schema;

    /// The value as serde renders it, before views and discriminators.
    fn to_raw(&self) -> Result<Value>;
}

impl<T: Typed + Serialize + ?Sized> Record for T {
    fn runtime_schema(&self) -> Schema {
        T::schema()
    }

    fn to_raw(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(Error::Encode)
    }
}

/// Implements [`Typed`] for named types by referencing their registry entry.
///
/// ```
/// use json_auto::{typed, Schema, Typed};
///
/// struct Person;
/// typed!(Person => "Person");
///
/// assert_eq!(Person::schema(), Schema::reference("Person"));
/// ```
#[macro_export]
macro_rules! typed {
    ($($t:ty => $name:expr),+ $(,)?) => {
        $(
            impl $crate::Typed for $t {
                fn schema() -> $crate::Schema {
                    $crate::Schema::reference($name)
                }
            }
        )+
    };
}

macro_rules! leaf {
    ($schema:ident => $($t:ty),+) => {
        $(
            impl Typed for $t {
                fn schema() -> Schema {
                    Schema::$schema
                }
            }
        )+
    };
}

leaf!(Bool => bool);
leaf!(Num => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
leaf!(Str => String, str);
leaf!(Char => char);
leaf!(Any => Value);

impl<T: Typed> Typed for Option<T> {
    fn schema() -> Schema {
        Schema::nullable(T::schema())
    }
}

impl<T: Typed> Typed for Vec<T> {
    fn schema() -> Schema {
        Schema::arr(T::schema())
    }
}

impl<T: Typed> Typed for VecDeque<T> {
    fn schema() -> Schema {
        Schema::arr(T::schema())
    }
}

impl<T: Typed> Typed for [T] {
    fn schema() -> Schema {
        Schema::arr(T::schema())
    }
}

impl<T: Typed, const N: usize> Typed for [T; N] {
    fn schema() -> Schema {
        Schema::tup(T::schema(), N)
    }
}

impl<T: Typed> Typed for BTreeMap<String, T> {
    fn schema() -> Schema {
        Schema::map(T::schema())
    }
}

impl<T: Typed, S> Typed for HashMap<String, T, S> {
    fn schema() -> Schema {
        Schema::map(T::schema())
    }
}

impl<T: Typed + ?Sized> Typed for Box<T> {
    fn schema() -> Schema {
        T::schema()
    }
}

impl<T: Typed + ?Sized> Typed for &T {
    fn schema() -> Schema {
        T::schema()
    }
}
