//! Error types for the fakery crate.
//!
//! Each layer of the invocation pipeline owns one semantic error enum:
//! lookups, parameter binding, catalog execution, template parsing and record
//! generation. Higher layers wrap lower ones so callers can still match on
//! the original cause.

use thiserror::Error;

use crate::registry::ParamType;

/// A function name was not present in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("function '{name}' not found")]
pub struct LookupError {
    /// The name that was looked up.
    pub name: String,
}

/// Errors raised while converting raw string parameters into typed arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// No value was supplied and the parameter has no default.
    #[error("missing parameter {field}: expected {expected}")]
    Missing {
        /// Parameter field name.
        field: String,
        /// Type the parameter expects.
        expected: ParamType,
    },

    /// The supplied value could not be coerced to the parameter type.
    #[error("invalid parameter {field}: expected {expected}, got '{value}'")]
    Invalid {
        /// Parameter field name.
        field: String,
        /// Type the parameter expects.
        expected: ParamType,
        /// Raw value that failed coercion.
        value: String,
    },
}

/// A bound argument did not have the type its adapter asked for.
///
/// This only happens when a descriptor's parameter schema disagrees with the
/// adapter that unpacks it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("argument {index} is not a {expected}")]
pub struct ArgumentError {
    /// Position of the argument.
    pub index: usize,
    /// Type the adapter asked for.
    pub expected: ParamType,
}

/// Errors raised by catalog functions for well-typed but unusable arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A range was supplied with its bounds reversed.
    #[error("minimum {min} is greater than maximum {max}")]
    InvalidRange {
        /// Lower bound as supplied.
        min: String,
        /// Upper bound as supplied.
        max: String,
    },

    /// A count or length parameter was negative.
    #[error("{field} must not be negative, got {value}")]
    NegativeCount {
        /// Parameter field name.
        field: &'static str,
        /// Value supplied.
        value: i64,
    },

    /// A count or length parameter exceeded its upper limit.
    #[error("{field} must be at most {max}, got {value}")]
    CountTooLarge {
        /// Parameter field name.
        field: &'static str,
        /// Value supplied.
        value: i64,
        /// Largest accepted value.
        max: usize,
    },

    /// The adapter could not unpack its arguments.
    #[error(transparent)]
    Argument(#[from] ArgumentError),
}

/// Errors raised by a single named invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvokeError {
    /// The function name is not registered.
    #[error(transparent)]
    NotFound(#[from] LookupError),

    /// Parameters could not be bound.
    #[error(transparent)]
    Bind(#[from] BindError),

    /// The catalog function rejected its arguments.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Template parameters for templated generation were invalid.
    #[error(transparent)]
    Options(#[from] OptionsError),

    /// Templated generation failed.
    #[error(transparent)]
    Generate(#[from] Box<GenerateError>),
}

/// Errors raised while building record options from JSON or raw parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// The template JSON is malformed.
    #[error("invalid template JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The output type is neither `object` nor `array`.
    #[error("unknown output type '{value}': expected 'object' or 'array'")]
    UnknownShape {
        /// Value supplied for the output type.
        value: String,
    },

    /// A field declares both a function and nested fields.
    #[error("field '{field}' declares both function '{function}' and sub-fields")]
    ConflictingField {
        /// Field name.
        field: String,
        /// Function declared alongside the sub-fields.
        function: String,
    },

    /// A field declares neither a function nor nested fields.
    #[error("field '{field}' declares neither a function nor sub-fields")]
    EmptyField {
        /// Field name.
        field: String,
    },

    /// A field spec supplied as a raw parameter is not valid JSON.
    #[error("invalid field spec at index {index}: {message}")]
    InvalidField {
        /// Index of the field spec in the parameter list.
        index: usize,
        /// Description of the failure.
        message: String,
    },

    /// Array output needs at least one row.
    #[error("row count must be at least 1, got {value}")]
    InvalidRowCount {
        /// Row count supplied.
        value: i64,
    },

    /// Raw parameters could not be bound.
    #[error(transparent)]
    Bind(#[from] BindError),

    /// A bound template argument had an unexpected type.
    #[error(transparent)]
    Argument(#[from] ArgumentError),
}

/// Errors raised while generating a templated record document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// A field names a function the registry does not know.
    #[error("field '{field}' references unknown function '{function}'")]
    UnknownFunction {
        /// Field name.
        field: String,
        /// Function name that was not found.
        function: String,
    },

    /// Invoking a field's function failed.
    #[error("field '{field}' failed: {source}")]
    FieldFailed {
        /// Field name.
        field: String,
        /// Underlying invocation error.
        #[source]
        source: InvokeError,
    },

    /// Two sibling fields share a name.
    #[error("field '{field}' is declared more than once")]
    DuplicateField {
        /// Repeated field name.
        field: String,
    },

    /// Array output was requested with zero rows.
    #[error("array output requires a row count of at least 1")]
    EmptyRowCount,

    /// Nested fields exceed the supported depth.
    #[error("field '{field}' nests deeper than {max_depth} levels")]
    NestingTooDeep {
        /// Field at which the limit was exceeded.
        field: String,
        /// Maximum supported depth.
        max_depth: usize,
    },

    /// The assembled document could not be serialised.
    #[error("failed to serialise document: {message}")]
    SerializeError {
        /// Description of the serialisation failure.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn lookup_error_formats_correctly() {
        let err = LookupError {
            name: "nope".to_owned(),
        };
        assert_eq!(err.to_string(), "function 'nope' not found");
    }

    #[rstest]
    #[case::missing(
        BindError::Missing { field: "min".to_owned(), expected: ParamType::Int },
        "missing parameter min: expected int"
    )]
    #[case::invalid(
        BindError::Invalid {
            field: "special".to_owned(),
            expected: ParamType::Bool,
            value: "maybe".to_owned(),
        },
        "invalid parameter special: expected bool, got 'maybe'"
    )]
    fn bind_error_formats_correctly(#[case] err: BindError, #[case] expected: &str) {
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn catalog_error_range_formats_correctly() {
        let err = CatalogError::InvalidRange {
            min: "10".to_owned(),
            max: "1".to_owned(),
        };
        assert_eq!(err.to_string(), "minimum 10 is greater than maximum 1");
    }

    #[test]
    fn invoke_error_is_transparent() {
        let err = InvokeError::from(LookupError {
            name: "nope".to_owned(),
        });
        assert_eq!(err.to_string(), "function 'nope' not found");
    }

    #[test]
    fn generate_error_unknown_function_formats_correctly() {
        let err = GenerateError::UnknownFunction {
            field: "name".to_owned(),
            function: "nope".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "field 'name' references unknown function 'nope'"
        );
    }

    #[test]
    fn generate_error_field_failed_names_field_and_cause() {
        let err = GenerateError::FieldFailed {
            field: "age".to_owned(),
            source: InvokeError::Catalog(CatalogError::InvalidRange {
                min: "9".to_owned(),
                max: "3".to_owned(),
            }),
        };
        assert_eq!(
            err.to_string(),
            "field 'age' failed: minimum 9 is greater than maximum 3"
        );
    }

    #[test]
    fn options_error_conflicting_field_formats_correctly() {
        let err = OptionsError::ConflictingField {
            field: "profile".to_owned(),
            function: "name".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "field 'profile' declares both function 'name' and sub-fields"
        );
    }
}
