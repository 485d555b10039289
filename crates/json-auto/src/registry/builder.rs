//! Registration and validation of type definitions and views.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use tracing::debug;

use super::{Registry, TypeDef};
use crate::config::MapperConfig;
use crate::error::RegistryError;
use crate::schema::{FamilySchema, ObjSchema, Subtype};
use crate::view::ViewTag;

/// Collects registrations; [`build`](Self::build) validates and freezes them.
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    types: Vec<(String, TypeDef)>,
    views: Vec<ViewTag>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_record(mut self, name: impl Into<String>, schema: ObjSchema) -> Self {
        self.types.push((name.into(), TypeDef::Record(schema)));
        self
    }

    pub fn register_open(mut self, name: impl Into<String>, schema: ObjSchema) -> Self {
        self.types.push((name.into(), TypeDef::Open(schema)));
        self
    }

    pub fn register_polymorphic(
        mut self,
        parent: impl Into<String>,
        subtypes: impl IntoIterator<Item = Subtype>,
    ) -> Self {
        self.types
            .push((parent.into(), TypeDef::Family(FamilySchema::new(subtypes))));
        self
    }

    pub fn register_view(mut self, view: ViewTag) -> Self {
        self.views.push(view);
        self
    }

    pub fn build(self, config: &MapperConfig) -> Result<Registry, RegistryError> {
        let views = resolve_views(&self.views)?;

        let mut types: IndexMap<String, TypeDef> = IndexMap::with_capacity(self.types.len());
        for (name, def) in self.types {
            if types.contains_key(&name) {
                return Err(RegistryError::DuplicateType(name));
            }
            types.insert(name, def);
        }

        let mut families = 0usize;
        for (name, def) in &types {
            match def {
                TypeDef::Record(obj) | TypeDef::Open(obj) => check_field_views(name, obj, &views)?,
                TypeDef::Family(family) => {
                    check_family(name, family, &types, &config.discriminator)?;
                    families += 1;
                }
            }
        }

        let registry = Registry {
            types,
            views,
            default_view_inclusion: config.default_view_inclusion,
        };
        check_hidden_defaults(&registry)?;

        debug!(
            types = registry.len(),
            families,
            views = registry.views.len(),
            "Built marshalling registry"
        );
        Ok(registry)
    }
}

fn resolve_views(declared: &[ViewTag]) -> Result<HashMap<String, HashSet<String>>, RegistryError> {
    let mut by_name: HashMap<&str, &ViewTag> = HashMap::with_capacity(declared.len());
    for view in declared {
        if by_name.insert(view.name(), view).is_some() {
            return Err(RegistryError::DuplicateView(view.name().to_string()));
        }
    }

    let mut resolved = HashMap::with_capacity(declared.len());
    for view in declared {
        let mut ancestors = HashSet::new();
        let mut path = Vec::new();
        collect_ancestors(view.name(), &by_name, &mut path, &mut ancestors)?;
        resolved.insert(view.name().to_string(), ancestors);
    }
    Ok(resolved)
}

fn collect_ancestors<'a>(
    name: &'a str,
    by_name: &HashMap<&'a str, &'a ViewTag>,
    path: &mut Vec<&'a str>,
    out: &mut HashSet<String>,
) -> Result<(), RegistryError> {
    if path.contains(&name) {
        return Err(RegistryError::ViewCycle(name.to_string()));
    }
    if !out.insert(name.to_string()) {
        return Ok(());
    }
    let Some(&view) = by_name.get(name) else {
        return Ok(());
    };
    path.push(name);
    for parent in view.parents() {
        if !by_name.contains_key(parent.as_str()) {
            return Err(RegistryError::UnknownParentView {
                view: name.to_string(),
                parent: parent.clone(),
            });
        }
        collect_ancestors(parent, by_name, path, out)?;
    }
    path.pop();
    Ok(())
}

fn check_field_views(
    type_name: &str,
    obj: &ObjSchema,
    views: &HashMap<String, HashSet<String>>,
) -> Result<(), RegistryError> {
    for key in &obj.keys {
        if let Some(view) = key.views.iter().find(|v| !views.contains_key(*v)) {
            return Err(RegistryError::UnknownFieldView {
                type_name: type_name.to_string(),
                key: key.key.clone(),
                view: view.clone(),
            });
        }
    }
    Ok(())
}

fn check_family(
    family_name: &str,
    family: &FamilySchema,
    types: &IndexMap<String, TypeDef>,
    discriminator: &str,
) -> Result<(), RegistryError> {
    let mut tags = HashSet::new();
    let mut variants = HashSet::new();
    let mut children = HashSet::new();

    for subtype in &family.subtypes {
        if !tags.insert(subtype.tag.as_str()) {
            return Err(RegistryError::DuplicateTag {
                family: family_name.to_string(),
                tag: subtype.tag.clone(),
            });
        }
        if !variants.insert(subtype.variant.as_str()) {
            return Err(RegistryError::DuplicateVariant {
                family: family_name.to_string(),
                variant: subtype.variant.clone(),
            });
        }
        let Some(child) = &subtype.child else {
            continue;
        };
        if !children.insert(child.as_str()) {
            return Err(RegistryError::DuplicateChild {
                family: family_name.to_string(),
                child: child.clone(),
            });
        }
        match types.get(child) {
            Some(TypeDef::Record(obj)) => {
                if obj.has_key(discriminator) {
                    return Err(RegistryError::DiscriminatorCollision {
                        family: family_name.to_string(),
                        child: child.clone(),
                        field: discriminator.to_string(),
                    });
                }
            }
            other => {
                return Err(RegistryError::InvalidSubtype {
                    family: family_name.to_string(),
                    child: child.clone(),
                    found: other.map_or("nothing", TypeDef::kind),
                })
            }
        }
    }
    Ok(())
}

/// Every record field a view can hide must have a value to decode into.
fn check_hidden_defaults(registry: &Registry) -> Result<(), RegistryError> {
    for (name, def) in &registry.types {
        let TypeDef::Record(obj) = def else {
            continue;
        };
        let hideable = obj
            .keys
            .iter()
            .filter(|key| key.is_scoped() || !registry.default_view_inclusion);
        for key in hideable {
            if registry.hidden_default(key).is_none() {
                return Err(RegistryError::NoHiddenDefault {
                    type_name: name.clone(),
                    key: key.key.clone(),
                    schema: key.value.describe(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{KeySchema, Schema};

    fn children() -> RegistryBuilder {
        RegistryBuilder::new()
            .register_record("FirstChild", ObjSchema::new().field("something", Schema::Str))
            .register_record("SecondChild", ObjSchema::new().field("somethingElse", Schema::Str))
    }

    #[test]
    fn builds_family() {
        let reg = children()
            .register_polymorphic(
                "PolymorphicParent",
                [
                    Subtype::new("first", "FirstChild"),
                    Subtype::new("second", "SecondChild"),
                ],
            )
            .build(&MapperConfig::default())
            .unwrap();
        assert_eq!(reg.len(), 3);
        assert_eq!(
            reg.type_names().collect::<Vec<_>>(),
            ["FirstChild", "SecondChild", "PolymorphicParent"]
        );
        assert!(reg.family("PolymorphicParent").is_some());
        assert!(reg.record("PolymorphicParent").is_none());
    }

    #[test]
    fn rejects_duplicate_type() {
        let err = children()
            .register_record("FirstChild", ObjSchema::new())
            .build(&MapperConfig::default())
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateType("FirstChild".into()));
    }

    #[test]
    fn rejects_duplicate_tag() {
        let err = children()
            .register_polymorphic(
                "Parent",
                [
                    Subtype::new("same", "FirstChild"),
                    Subtype::new("same", "SecondChild"),
                ],
            )
            .build(&MapperConfig::default())
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateTag { tag, .. } if tag == "same"));
    }

    #[test]
    fn rejects_duplicate_variant() {
        let err = children()
            .register_polymorphic(
                "Parent",
                [
                    Subtype::new("a", "FirstChild").variant("V"),
                    Subtype::new("b", "SecondChild").variant("V"),
                ],
            )
            .build(&MapperConfig::default())
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateVariant { variant, .. } if variant == "V"));
    }

    #[test]
    fn rejects_child_under_two_tags() {
        let err = children()
            .register_polymorphic(
                "Twice",
                [
                    Subtype::new("a", "FirstChild").variant("A"),
                    Subtype::new("b", "FirstChild").variant("B"),
                ],
            )
            .build(&MapperConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateChild {
                family: "Twice".into(),
                child: "FirstChild".into(),
            }
        );
    }

    #[test]
    fn rejects_unregistered_child() {
        let err = children()
            .register_polymorphic("Parent", [Subtype::new("third", "ThirdChild")])
            .build(&MapperConfig::default())
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidSubtype { child, .. } if child == "ThirdChild"));
    }

    #[test]
    fn rejects_family_as_child() {
        let err = children()
            .register_polymorphic("Inner", [Subtype::new("first", "FirstChild")])
            .register_polymorphic("Outer", [Subtype::new("inner", "Inner")])
            .build(&MapperConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::InvalidSubtype {
                family: "Outer".into(),
                child: "Inner".into(),
                found: "family",
            }
        );
    }

    #[test]
    fn hideable_fields_need_a_default() {
        let badge = |owner: KeySchema| {
            children()
                .register_view(ViewTag::new("private"))
                .register_polymorphic("Parent", [Subtype::new("first", "FirstChild")])
                .register_record(
                    "Badge",
                    ObjSchema::new().field("name", Schema::Str).key(owner),
                )
        };

        let err = badge(KeySchema::new("owner", Schema::reference("Owner")).view("private"))
            .build(&MapperConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::NoHiddenDefault {
                type_name: "Badge".into(),
                key: "owner".into(),
                schema: "Owner".into(),
            }
        );

        let err = badge(KeySchema::new("owner", Schema::reference("Parent")).view("private"))
            .build(&MapperConfig::default())
            .unwrap_err();
        assert!(matches!(err, RegistryError::NoHiddenDefault { schema, .. } if schema == "Parent"));

        // Unscoped, and the default config keeps unscoped fields in every view.
        badge(KeySchema::new("owner", Schema::reference("Parent")))
            .build(&MapperConfig::default())
            .unwrap();

        let config = MapperConfig {
            default_view_inclusion: false,
            ..MapperConfig::default()
        };
        let err = badge(KeySchema::new("owner", Schema::reference("Parent")))
            .build(&config)
            .unwrap_err();
        assert!(matches!(err, RegistryError::NoHiddenDefault { key, .. } if key == "owner"));

        badge(
            KeySchema::new("owner", Schema::reference("Owner"))
                .view("private")
                .default_value(serde_json::json!("nobody")),
        )
        .build(&MapperConfig::default())
        .unwrap();
    }

    #[test]
    fn rejects_discriminator_collision() {
        let config = MapperConfig {
            discriminator: "something".into(),
            ..MapperConfig::default()
        };
        let err = children()
            .register_polymorphic("Parent", [Subtype::new("first", "FirstChild")])
            .build(&config)
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DiscriminatorCollision {
                family: "Parent".into(),
                child: "FirstChild".into(),
                field: "something".into(),
            }
        );
    }

    #[test]
    fn rejects_view_problems() {
        let config = MapperConfig::default();

        let err = RegistryBuilder::new()
            .register_view(ViewTag::new("a"))
            .register_view(ViewTag::new("a"))
            .build(&config)
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateView("a".into()));

        let err = RegistryBuilder::new()
            .register_view(ViewTag::new("a").extends("missing"))
            .build(&config)
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownParentView { parent, .. } if parent == "missing"));

        let err = RegistryBuilder::new()
            .register_view(ViewTag::new("a").extends("b"))
            .register_view(ViewTag::new("b").extends("a"))
            .build(&config)
            .unwrap_err();
        assert!(matches!(err, RegistryError::ViewCycle(_)));

        let err = RegistryBuilder::new()
            .register_record(
                "R",
                ObjSchema::new().key(KeySchema::new("x", Schema::Num).view("nobody")),
            )
            .build(&config)
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownFieldView { view, .. } if view == "nobody"));
    }

    #[test]
    fn diamond_views_resolve() {
        let reg = RegistryBuilder::new()
            .register_view(ViewTag::new("base"))
            .register_view(ViewTag::new("left").extends("base"))
            .register_view(ViewTag::new("right").extends("base"))
            .register_view(ViewTag::new("both").extends("left").extends("right"))
            .build(&MapperConfig::default())
            .unwrap();
        assert!(reg.view_includes("both", "base"));
        assert!(reg.view_includes("both", "right"));
        assert!(!reg.view_includes("left", "right"));
    }
}
