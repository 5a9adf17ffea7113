//! Function registry and descriptor types.
//!
//! A [`Descriptor`] pairs a generator's metadata and ordered parameter schema
//! with a plain function adapter that unpacks typed [`Arguments`], or marks it
//! as templated generation, which the invoker runs itself. The
//! [`Registry`] maps names to descriptors and is read-only once built, so it
//! can be shared by reference across threads without locking.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::binder::Arguments;
use crate::{catalog, template};
use crate::error::{CatalogError, LookupError};
use crate::random::SharedRng;
use crate::value::Value;

/// Semantic type of a generator parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParamType {
    /// `true` or `false`, case-insensitive.
    Bool,
    /// A signed 64-bit integer.
    Int,
    /// A 64-bit float.
    Float,
    /// A string, passed through verbatim.
    String,
    /// A comma separated list of strings.
    StringList,
}

impl ParamType {
    /// Returns the name used in messages and listings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::StringList => "string-list",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema entry for one positional parameter of a generator.
///
/// # Example
///
/// ```
/// use fakery::{ParamSpec, ParamType};
///
/// let spec = ParamSpec::new("length", ParamType::Int, "Number of characters")
///     .with_default("12");
///
/// assert_eq!(spec.field(), "length");
/// assert_eq!(spec.default_value(), Some("12"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    field: String,
    #[serde(rename = "type")]
    kind: ParamType,
    #[serde(rename = "default")]
    default_value: Option<String>,
    description: String,
}

impl ParamSpec {
    /// Creates a required parameter with no default.
    #[must_use]
    pub fn new(field: impl Into<String>, kind: ParamType, description: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            default_value: None,
            description: description.into(),
        }
    }

    /// Sets the default used when the parameter is not supplied.
    #[must_use]
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// Returns the key used in raw parameter maps.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the semantic type.
    #[must_use]
    pub const fn kind(&self) -> ParamType {
        self.kind
    }

    /// Returns the default in raw string form.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Returns the human description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Adapter that unpacks bound arguments and runs a catalog function.
pub type Callable = fn(&mut SharedRng<'_>, &Arguments) -> Result<Value, CatalogError>;

/// How a descriptor produces its value.
#[derive(Clone, Copy)]
pub(crate) enum Handler {
    /// A catalog adapter drawing from the shared random source.
    Catalog(Callable),
    /// Templated record generation over the invoker's registry.
    Record,
}

/// Registered metadata and adapter for one named generator.
#[derive(Clone, Serialize)]
pub struct Descriptor {
    name: String,
    category: String,
    description: String,
    params: Vec<ParamSpec>,
    #[serde(skip)]
    handler: Handler,
}

impl Descriptor {
    /// Creates a descriptor with an empty parameter list.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        callable: Callable,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            description: description.into(),
            params: Vec::new(),
            handler: Handler::Catalog(callable),
        }
    }

    /// Creates a descriptor for templated generation.
    pub(crate) fn record(
        name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            description: description.into(),
            params: Vec::new(),
            handler: Handler::Record,
        }
    }

    /// Appends a parameter; declaration order is positional binding order.
    #[must_use]
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Returns the unique registry key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the grouping category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the human description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the ordered parameter schema.
    #[must_use]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub(crate) const fn handler(&self) -> Handler {
        self.handler
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("description", &self.description)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Name-keyed table of generator descriptors.
///
/// # Example
///
/// ```
/// use fakery::Registry;
///
/// let registry = Registry::with_catalog();
///
/// assert!(registry.lookup("firstname").is_some());
/// assert!(registry.lookup("FirstName").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    descriptors: BTreeMap<String, Descriptor>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            descriptors: BTreeMap::new(),
        }
    }

    /// Creates a registry populated with the built-in catalog and templated
    /// generation.
    #[must_use]
    pub fn with_catalog() -> Self {
        let mut registry = Self::new();
        catalog::register_all(&mut registry);
        template::register(&mut registry);
        registry
    }

    /// Registers a descriptor, replacing any previous one with the same name.
    ///
    /// Returns the replaced descriptor.
    pub fn register(&mut self, descriptor: Descriptor) -> Option<Descriptor> {
        self.descriptors
            .insert(descriptor.name().to_owned(), descriptor)
    }

    /// Looks up a descriptor by exact, case-sensitive name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Descriptor> {
        self.descriptors.get(name)
    }

    /// Looks up a descriptor, reporting unknown names as an error.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if no descriptor is registered under `name`.
    pub fn find(&self, name: &str) -> Result<&Descriptor, LookupError> {
        self.lookup(name).ok_or_else(|| LookupError {
            name: name.to_owned(),
        })
    }

    /// Lists descriptors ordered by name, optionally filtered by category.
    #[must_use]
    pub fn list(&self, category: Option<&str>) -> Vec<&Descriptor> {
        self.descriptors
            .values()
            .filter(|descriptor| category.is_none_or(|wanted| descriptor.category() == wanted))
            .collect()
    }

    /// Returns the distinct category names in sorted order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.descriptors
            .values()
            .map(Descriptor::category)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Returns the number of registered descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::invoker::Invoker;
    use crate::random::RandomSource;

    fn constant(_: &mut SharedRng<'_>, _: &Arguments) -> Result<Value, CatalogError> {
        Ok(Value::Int(1))
    }

    fn other_constant(_: &mut SharedRng<'_>, _: &Arguments) -> Result<Value, CatalogError> {
        Ok(Value::Int(2))
    }

    #[fixture]
    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.register(Descriptor::new("beta", "numbers", "Beta", constant));
        registry.register(Descriptor::new("alpha", "numbers", "Alpha", constant));
        registry.register(Descriptor::new("gamma", "letters", "Gamma", constant));
        registry
    }

    #[rstest]
    fn lists_all_descriptors_by_name(registry: Registry) {
        let names: Vec<_> = registry.list(None).into_iter().map(Descriptor::name).collect();
        assert_eq!(names, ["alpha", "beta", "gamma"]);
    }

    #[rstest]
    fn lists_descriptors_filtered_by_category(registry: Registry) {
        let names: Vec<_> = registry
            .list(Some("numbers"))
            .into_iter()
            .map(Descriptor::name)
            .collect();
        assert_eq!(names, ["alpha", "beta"]);
    }

    #[rstest]
    fn categories_are_sorted_and_distinct(registry: Registry) {
        assert_eq!(registry.categories(), ["letters", "numbers"]);
    }

    #[rstest]
    fn re_registering_replaces_descriptor(mut registry: Registry) {
        let previous = registry.register(Descriptor::new("alpha", "numbers", "New", other_constant));

        assert!(previous.is_some());
        assert_eq!(registry.len(), 3);
        let descriptor = registry.lookup("alpha").expect("alpha registered");
        assert_eq!(descriptor.description(), "New");
        let source = RandomSource::from_seed(0);
        assert_eq!(
            Invoker::new(&registry, &source).run(descriptor, &Arguments::default()),
            Ok(Value::Int(2))
        );
    }

    #[rstest]
    #[case("ALPHA")]
    #[case("alph")]
    #[case("")]
    fn lookup_is_exact_and_case_sensitive(registry: Registry, #[case] name: &str) {
        assert!(registry.lookup(name).is_none());
        assert_eq!(
            registry.find(name).map(Descriptor::name),
            Err(LookupError {
                name: name.to_owned()
            })
        );
    }

    #[test]
    fn descriptor_serializes_for_introspection() {
        let descriptor = Descriptor::new("number", "number", "Random integer", constant)
            .param(ParamSpec::new("min", ParamType::Int, "Minimum").with_default("0"))
            .param(ParamSpec::new("tags", ParamType::StringList, "Tags"));

        let json = serde_json::to_value(&descriptor).expect("serialize");

        assert_eq!(
            json,
            serde_json::json!({
                "name": "number",
                "category": "number",
                "description": "Random integer",
                "params": [
                    {"field": "min", "type": "int", "default": "0", "description": "Minimum"},
                    {"field": "tags", "type": "string-list", "default": null, "description": "Tags"}
                ]
            })
        );
    }

    #[test]
    fn templated_generation_is_registered_by_name() {
        let registry = Registry::with_catalog();

        let descriptor = registry
            .find(crate::template::RECORD_FUNCTION)
            .expect("json registered");
        let fields: Vec<_> = descriptor.params().iter().map(ParamSpec::field).collect();

        assert_eq!(descriptor.category(), "template");
        assert_eq!(fields, ["type", "fields", "rowcount", "indent"]);
        assert!(matches!(descriptor.handler(), Handler::Record));
    }

    #[test]
    fn catalog_never_registers_autoincrement() {
        let registry = Registry::with_catalog();
        assert!(registry.lookup(crate::template::AUTOINCREMENT).is_none());
        assert!(!registry.is_empty());
    }
}
