//! Field bindings emitted by `#[derive(Config)]` and the descriptors read
//! from their annotations.

use crate::doc::DocBuilder;
use crate::error::ResolveError;
use crate::loader::Loader;
use crate::value::Leaf;

/// A struct that can be populated by a [`Loader`].
///
/// Implemented by `#[derive(Config)]`; the generated code visits each field
/// in declaration order.
pub trait Config {
    /// Resolve every field in place, stopping at the first error.
    fn resolve_fields(&mut self, loader: &Loader) -> Result<(), ResolveError>;

    /// Describe every field into the current documentation node.
    fn describe_fields(builder: &mut DocBuilder<'_>);
}

/// A single struct field as seen by the loader.
///
/// Every [`Leaf`] type is a field. `#[derive(Config)]` also makes the struct
/// itself a field, so it can be nested inside another config.
pub trait Field {
    /// Populate the field from the loader's sources.
    fn resolve(&mut self, info: &FieldInfo, loader: &Loader) -> Result<(), ResolveError>;

    /// Add the field to the documentation tree.
    fn describe(info: &FieldInfo, builder: &mut DocBuilder<'_>);
}

impl<T: Leaf> Field for T {
    fn resolve(&mut self, info: &FieldInfo, loader: &Loader) -> Result<(), ResolveError> {
        loader.resolve_leaf(info, self)
    }

    fn describe(info: &FieldInfo, builder: &mut DocBuilder<'_>) {
        builder.field(info);
    }
}

/// Static metadata of one struct field: its name and annotation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    /// Rust field name
    pub name: &'static str,
    /// `#[conf(name = "value")]` pairs in declaration order
    pub tags: &'static [(&'static str, &'static str)],
}

impl FieldInfo {
    /// Value of the named annotation, if present.
    pub fn tag(&self, name: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(tag, _)| *tag == name)
            .map(|(_, value)| *value)
    }
}

/// Annotation names the loader reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagNames {
    /// Lookup key and options, `"KEY"` or `"KEY,omitempty"` (default `env`)
    pub key: String,
    /// Raw default value (default `default`)
    pub default: String,
    /// Option in the key annotation that allows empty values (default `omitempty`)
    pub allow_empty: String,
    /// Human description, documentation only (default `description`)
    pub description: String,
    /// Example value, documentation only (default `example`)
    pub example: String,
    /// Title of a nested group, documentation only (default `title`)
    pub title: String,
}

impl Default for TagNames {
    fn default() -> Self {
        Self {
            key: "env".to_string(),
            default: "default".to_string(),
            allow_empty: "omitempty".to_string(),
            description: "description".to_string(),
            example: "example".to_string(),
            title: "title".to_string(),
        }
    }
}

/// Everything the loader and the documentation need to know about a field.
///
/// Built from a [`FieldInfo`] each time it is needed. Missing annotations
/// read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Lookup key; empty when the field has no key annotation
    pub key: String,
    /// Whether an absent value is accepted
    pub allow_empty: bool,
    /// Raw default, coerced only when used
    pub default_value: String,
    pub description: String,
    pub example_value: String,
    /// Title for nested groups
    pub group_title: String,
}

impl FieldDescriptor {
    /// Read a field's annotations under the given tag names.
    ///
    /// The key annotation is split on `,`: the first part is the key, and the
    /// field allows empty values when any later part equals the allow-empty
    /// option name.
    pub fn from_field(info: &FieldInfo, names: &TagNames) -> Self {
        let key_tag = info.tag(&names.key).unwrap_or_default();
        let mut parts = key_tag.split(',');
        let key = parts.next().unwrap_or_default().to_string();
        let allow_empty = parts.any(|option| option == names.allow_empty);

        let tag = |name: &str| info.tag(name).unwrap_or_default().to_string();

        Self {
            key,
            allow_empty,
            default_value: tag(&names.default),
            description: tag(&names.description),
            example_value: tag(&names.example),
            group_title: tag(&names.title),
        }
    }
}
