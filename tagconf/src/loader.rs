//! The resolution engine

use std::fmt;

use crate::coerce::{Coercer, CoercerProvider, DefaultCoercers};
use crate::doc::{DocBuilder, DocTree};
use crate::docgen::DocGenerator;
use crate::error::ResolveError;
use crate::field::{Config, FieldDescriptor, FieldInfo, TagNames};
use crate::source::{EnvSource, ValueSource};
use crate::value::{FieldType, Leaf};

/// Populates [`Config`] structs from value sources.
///
/// Sources and coercer providers are consulted in the order they were added;
/// the first source with a non-empty value and the first provider with a
/// matching coercer win.
///
/// Configure the loader with its builder methods before resolving. Once
/// configured it is only read, so it can be shared across threads.
///
/// ```
/// use tagconf::{Config, Loader, MapSource};
///
/// #[derive(Debug, Default, Config)]
/// struct Server {
///     #[conf(env = "HOST", default = "127.0.0.1")]
///     host: String,
///     #[conf(env = "PORT")]
///     port: u16,
/// }
///
/// let loader = Loader::empty()
///     .with_coercers(tagconf::DefaultCoercers)
///     .with_source(MapSource::new().with("PORT", "8080"))
///     .use_defaults();
///
/// let server: Server = loader.load().unwrap();
/// assert_eq!(server.host, "127.0.0.1");
/// assert_eq!(server.port, 8080);
/// ```
pub struct Loader {
    tags: TagNames,
    coercers: Vec<Box<dyn CoercerProvider>>,
    sources: Vec<Box<dyn ValueSource>>,
    use_defaults: bool,
    force_defaults: bool,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    /// A loader with no sources, no coercers and defaults disabled.
    pub fn empty() -> Self {
        Self {
            tags: TagNames::default(),
            coercers: Vec::new(),
            sources: Vec::new(),
            use_defaults: false,
            force_defaults: false,
        }
    }

    /// A loader reading the process environment with the built-in coercers
    /// and defaults enabled.
    pub fn new() -> Self {
        Self::empty()
            .with_coercers(DefaultCoercers)
            .with_source(EnvSource)
            .use_defaults()
    }

    /// Add a coercer provider after the existing ones.
    ///
    /// Earlier providers shadow later ones.
    pub fn with_coercers(mut self, provider: impl CoercerProvider + 'static) -> Self {
        self.coercers.push(Box::new(provider));
        self
    }

    /// Add a value source after the existing ones.
    ///
    /// Earlier sources shadow later ones.
    pub fn with_source(mut self, source: impl ValueSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Fall back to a field's default when no source has a value.
    pub fn use_defaults(mut self) -> Self {
        self.use_defaults = true;
        self
    }

    /// Ignore the sources and use each field's default. Implies
    /// [`use_defaults`](Self::use_defaults).
    pub fn force_defaults(mut self) -> Self {
        self.use_defaults = true;
        self.force_defaults = true;
        self
    }

    /// Read lookup keys from a different annotation (default `env`).
    pub fn key_tag(mut self, name: impl Into<String>) -> Self {
        self.tags.key = name.into();
        self
    }

    /// Read defaults from a different annotation (default `default`).
    pub fn default_tag(mut self, name: impl Into<String>) -> Self {
        self.tags.default = name.into();
        self
    }

    /// Recognize a different allow-empty option in the key annotation
    /// (default `omitempty`).
    pub fn allow_empty_tag(mut self, name: impl Into<String>) -> Self {
        self.tags.allow_empty = name.into();
        self
    }

    /// Annotation names currently in effect
    pub fn tag_names(&self) -> &TagNames {
        &self.tags
    }

    /// Populate `config` in place.
    ///
    /// Fields are visited depth-first in declaration order. The first error
    /// stops resolution; fields set before it keep their new values.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::EmptyValue`]: a required value is missing
    /// - [`ResolveError::UnsupportedType`]: no coercer for a field's type
    /// - [`ResolveError::ParseFailure`]: a value does not parse
    /// - [`ResolveError::Nested`]: any of the above inside a nested config
    pub fn resolve<T: Config>(&self, config: &mut T) -> Result<(), ResolveError> {
        config.resolve_fields(self)
    }

    /// Resolve into a freshly defaulted `T`.
    pub fn load<T: Config + Default>(&self) -> Result<T, ResolveError> {
        let mut config = T::default();
        self.resolve(&mut config)?;
        Ok(config)
    }

    /// Build the documentation tree for `T`.
    ///
    /// Sources and default flags play no part; the tree reflects the
    /// annotations as written.
    pub fn build_doc<T: Config>(&self) -> DocTree {
        let mut doc = DocTree::new();
        T::describe_fields(&mut DocBuilder::new(&self.tags, &mut doc));
        doc
    }

    /// Build the documentation tree for `T` and hand it to `generator`.
    pub fn generate_doc<T: Config, G: DocGenerator + ?Sized>(
        &self,
        generator: &mut G,
    ) -> std::io::Result<()> {
        generator.generate(&self.build_doc::<T>())
    }

    /// First coercer for `field_type` across the providers, exact type
    /// before kind within each provider.
    pub fn lookup_coercer(&self, field_type: &FieldType) -> Option<Coercer> {
        self.coercers
            .iter()
            .find_map(|provider| provider.lookup(field_type))
    }

    /// First non-empty value for `key` across the sources.
    pub fn lookup_value(&self, key: &str) -> Option<String> {
        self.sources
            .iter()
            .filter_map(|source| source.get(key))
            .find(|value| !value.is_empty())
    }

    /// Resolve one leaf field (used by the `Field` impl for leaf types)
    #[doc(hidden)]
    pub fn resolve_leaf<T: Leaf>(&self, info: &FieldInfo, slot: &mut T) -> Result<(), ResolveError> {
        let field = FieldDescriptor::from_field(info, &self.tags);

        let raw = if self.force_defaults {
            None
        } else {
            self.lookup_value(&field.key)
        };
        let chosen = match raw {
            Some(value) => Some(value),
            None => self.fallback(&field)?,
        };

        let field_type = T::field_type();
        let coercer = self
            .lookup_coercer(&field_type)
            .ok_or_else(|| ResolveError::UnsupportedType {
                key: field.key.clone(),
                type_name: field_type.name,
            })?;

        let Some(value) = chosen else {
            *slot = T::default();
            return Ok(());
        };

        *slot = coercer(&value)
            .and_then(T::from_value)
            .map_err(|source| ResolveError::ParseFailure {
                key: field.key,
                source,
            })?;
        Ok(())
    }

    /// What to use when no source has a value: the default, nothing (reset
    /// the field to its zero value), or an error.
    fn fallback(&self, field: &FieldDescriptor) -> Result<Option<String>, ResolveError> {
        let has_default = !field.default_value.is_empty();

        if self.force_defaults && has_default {
            return Ok(Some(field.default_value.clone()));
        }
        if field.allow_empty {
            return Ok(None);
        }
        if self.use_defaults && has_default {
            tracing::warn!(
                key = %field.key,
                default = %field.default_value,
                "value for {} not found, using default value: {}",
                field.key,
                field.default_value,
            );
            return Ok(Some(field.default_value.clone()));
        }

        Err(ResolveError::EmptyValue {
            key: field.key.clone(),
        })
    }
}

impl fmt::Debug for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loader")
            .field("tags", &self.tags)
            .field("coercers", &self.coercers.len())
            .field("sources", &self.sources.len())
            .field("use_defaults", &self.use_defaults)
            .field("force_defaults", &self.force_defaults)
            .finish()
    }
}
