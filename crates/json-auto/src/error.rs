use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures of a single marshalling call.
#[derive(Debug, Error)]
pub enum Error {
    /// Input text is not well-formed JSON.
    #[error("malformed JSON: {0}")]
    Parse(#[source] serde_json::Error),
    /// Well-formed JSON that cannot be mapped onto the target type.
    #[error("cannot decode {type_name}: {source}")]
    Decode {
        type_name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot encode value: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("{type_name} is an open supertype; decode into a concrete type or register it as a family")]
    AmbiguousType { type_name: String },
    #[error("unknown discriminator {tag:?} for {family}")]
    UnknownDiscriminator { family: String, tag: String },
    #[error("missing discriminator field {field:?} for {family}")]
    MissingDiscriminator { family: String, field: String },
    #[error("variant {variant:?} of {family} has no registered subtype")]
    UnregisteredVariant { family: String, variant: String },
    #[error("unknown key {key:?} for {type_name}")]
    UnknownKey { type_name: String, key: String },
    #[error("expected {expected} for {type_name}")]
    UnexpectedShape {
        type_name: String,
        expected: &'static str,
    },
}

impl Error {
    /// True for failures caused by bad input data rather than bad setup.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::Parse(_) | Self::Decode { .. } | Self::UnknownKey { .. } | Self::UnexpectedShape { .. }
        )
    }
}

/// Failures detected while freezing the registration tables.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("type {0:?} is registered twice")]
    DuplicateType(String),
    #[error("view {0:?} is registered twice")]
    DuplicateView(String),
    #[error("view {view:?} extends unknown view {parent:?}")]
    UnknownParentView { view: String, parent: String },
    #[error("view {0:?} extends itself")]
    ViewCycle(String),
    #[error("field {key:?} of {type_name} declares unknown view {view:?}")]
    UnknownFieldView {
        type_name: String,
        key: String,
        view: String,
    },
    #[error("tag {tag:?} is used twice in family {family}")]
    DuplicateTag { family: String, tag: String },
    #[error("variant {variant:?} is used twice in family {family}")]
    DuplicateVariant { family: String, variant: String },
    #[error("subtype {child:?} of {family} is not a registered record (found {found})")]
    InvalidSubtype {
        family: String,
        child: String,
        found: &'static str,
    },
    #[error("record {child:?} appears under more than one tag in family {family}")]
    DuplicateChild { family: String, child: String },
    #[error("field {key:?} of {type_name} can be hidden by a view but {schema} has no default")]
    NoHiddenDefault {
        type_name: String,
        key: String,
        schema: String,
    },
    #[error("discriminator {field:?} collides with a field of {child} in family {family}")]
    DiscriminatorCollision {
        family: String,
        child: String,
        field: String,
    },
}
