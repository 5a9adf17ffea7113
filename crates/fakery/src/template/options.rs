//! Template types and their JSON and raw-parameter parsing.

use std::str::FromStr;

use serde::Deserialize;

use super::AUTOINCREMENT;
use crate::binder::{Arguments, RawParams, bind_params};
use crate::error::OptionsError;
use crate::registry::{ParamSpec, ParamType};

/// Default number of rows for array output built from raw parameters.
const DEFAULT_ROW_COUNT: i64 = 100;

/// Shape of a generated document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputShape {
    /// A single object.
    #[default]
    Object,
    /// A list of objects.
    Array,
}

impl OutputShape {
    /// Returns the template keyword for this shape.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

impl FromStr for OutputShape {
    type Err = OptionsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("object") {
            Ok(Self::Object)
        } else if value.eq_ignore_ascii_case("array") {
            Ok(Self::Array)
        } else {
            Err(OptionsError::UnknownShape {
                value: value.to_owned(),
            })
        }
    }
}

/// What a field produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Invoke a registered function with the given raw parameters.
    Leaf {
        /// Registered function name.
        function: String,
        /// Parameters bound against the function's schema.
        params: RawParams,
    },
    /// Generate one nested object from sub-fields.
    Nested(Vec<FieldSpec>),
    /// Emit the one-based row position within the enclosing scope.
    AutoIncrement,
}

/// One named field of a record template.
///
/// # Example
///
/// ```
/// use fakery::{FieldKind, FieldSpec};
///
/// let field = FieldSpec::from_json(
///     r#####"{"name": "pin", "function": "numerify", "params": {"str": "####"}}"#####,
/// )
/// .expect("valid field");
///
/// assert_eq!(field.name(), "pin");
/// assert!(matches!(field.kind(), FieldKind::Leaf { function, .. } if function == "numerify"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    name: String,
    kind: FieldKind,
}

impl FieldSpec {
    /// Creates a field that invokes `function`.
    ///
    /// The reserved name `autoincrement` yields an auto-increment field.
    #[must_use]
    pub fn new(name: impl Into<String>, function: impl Into<String>) -> Self {
        let function_name = function.into();
        let kind = if function_name == AUTOINCREMENT {
            FieldKind::AutoIncrement
        } else {
            FieldKind::Leaf {
                function: function_name,
                params: RawParams::new(),
            }
        };
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Creates a field holding a nested object.
    #[must_use]
    pub fn nested(name: impl Into<String>, fields: Vec<Self>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Nested(fields),
        }
    }

    /// Creates an auto-increment field.
    #[must_use]
    pub fn auto_increment(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::AutoIncrement,
        }
    }

    /// Appends a raw parameter value; ignored unless the field is a leaf.
    #[must_use]
    pub fn with_param(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        if let FieldKind::Leaf { params, .. } = &mut self.kind {
            params.push(field, value);
        }
        self
    }

    /// Parses a field from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::ParseError`] for malformed JSON, and
    /// [`OptionsError::ConflictingField`] or [`OptionsError::EmptyField`]
    /// when a field does not declare exactly one of a function or
    /// sub-fields.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let raw: RawFieldSpec =
            serde_json::from_str(json).map_err(|e| OptionsError::ParseError {
                message: e.to_string(),
            })?;
        Self::from_raw(raw)
    }

    /// Returns the output key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns what the field produces.
    #[must_use]
    pub const fn kind(&self) -> &FieldKind {
        &self.kind
    }

    fn from_raw(raw: RawFieldSpec) -> Result<Self, OptionsError> {
        let declared = raw.function.filter(|name| !name.is_empty());
        match (declared, raw.fields) {
            (Some(function), Some(_)) => Err(OptionsError::ConflictingField {
                field: raw.name,
                function,
            }),
            (None, Some(children)) => {
                let fields = children
                    .into_iter()
                    .map(Self::from_raw)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::nested(raw.name, fields))
            }
            (Some(function), None) if function == AUTOINCREMENT => {
                Ok(Self::auto_increment(raw.name))
            }
            (Some(function), None) => Ok(Self {
                name: raw.name,
                kind: FieldKind::Leaf {
                    function,
                    params: raw.params,
                },
            }),
            (None, None) => Err(OptionsError::EmptyField { field: raw.name }),
        }
    }
}

/// Full description of a document to generate.
///
/// # Example
///
/// ```
/// use fakery::{OutputShape, RecordOptions};
///
/// let options = RecordOptions::from_json(
///     r#"{
///         "type": "array",
///         "rowCount": 2,
///         "fields": [
///             {"name": "id", "function": "autoincrement"},
///             {"name": "person", "fields": [{"name": "first", "function": "firstname"}]}
///         ]
///     }"#,
/// )
/// .expect("valid template");
///
/// assert_eq!(options.shape(), OutputShape::Array);
/// assert_eq!(options.row_count(), 2);
/// assert_eq!(options.fields().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOptions {
    shape: OutputShape,
    fields: Vec<FieldSpec>,
    row_count: usize,
    indent: bool,
}

impl RecordOptions {
    /// Describes a single object.
    #[must_use]
    pub const fn object(fields: Vec<FieldSpec>) -> Self {
        Self {
            shape: OutputShape::Object,
            fields,
            row_count: 1,
            indent: false,
        }
    }

    /// Describes an array of `row_count` objects.
    #[must_use]
    pub const fn array(fields: Vec<FieldSpec>, row_count: usize) -> Self {
        Self {
            shape: OutputShape::Array,
            fields,
            row_count,
            indent: false,
        }
    }

    /// Enables or disables four-space indented output.
    #[must_use]
    pub const fn with_indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    /// Parses options from a JSON template.
    ///
    /// Accepts `type` (`object` or `array`), `fields`, `rowCount` (or
    /// `rowcount`) and `indent`.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError`] if the JSON is malformed, the type is
    /// unknown, a field is invalid, or an array has fewer than one row.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let raw: RawRecordOptions =
            serde_json::from_str(json).map_err(|e| OptionsError::ParseError {
                message: e.to_string(),
            })?;

        let shape = raw
            .shape
            .as_deref()
            .map_or(Ok(OutputShape::Object), str::parse)?;
        let fields = raw
            .fields
            .into_iter()
            .map(FieldSpec::from_raw)
            .collect::<Result<Vec<_>, _>>()?;
        let row_count = raw.row_count.unwrap_or(DEFAULT_ROW_COUNT);

        Self::assemble(shape, fields, row_count, raw.indent)
    }

    /// Builds options from untyped parameters, as any other function call.
    ///
    /// Binds `type`, `fields` (a list of JSON field specs), `rowcount` and
    /// `indent` against [`RecordOptions::params`].
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::Bind`] when a parameter does not bind,
    /// [`OptionsError::InvalidField`] for a field spec that is not JSON,
    /// and the other [`OptionsError`] variants as [`RecordOptions::from_json`].
    pub fn from_params(raw: &RawParams) -> Result<Self, OptionsError> {
        Self::from_arguments(&bind_params(&Self::params(), raw)?)
    }

    /// Builds options from arguments already bound against
    /// [`RecordOptions::params`].
    pub(crate) fn from_arguments(args: &Arguments) -> Result<Self, OptionsError> {
        let shape: OutputShape = args.string(0)?.parse()?;
        let fields = args
            .string_list(1)?
            .iter()
            .enumerate()
            .map(|(index, json)| {
                let spec: RawFieldSpec =
                    serde_json::from_str(json).map_err(|e| OptionsError::InvalidField {
                        index,
                        message: e.to_string(),
                    })?;
                FieldSpec::from_raw(spec)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::assemble(shape, fields, args.int(2)?, args.bool(3)?)
    }

    /// Returns the parameter schema used by [`RecordOptions::from_params`].
    #[must_use]
    pub fn params() -> Vec<ParamSpec> {
        vec![
            ParamSpec::new("type", ParamType::String, "Type of JSON, object or array")
                .with_default("object"),
            ParamSpec::new("fields", ParamType::StringList, "Fields containing key name and function")
                .with_default(""),
            ParamSpec::new("rowcount", ParamType::Int, "Number of rows in JSON array")
                .with_default(DEFAULT_ROW_COUNT.to_string()),
            ParamSpec::new("indent", ParamType::Bool, "Whether or not to add indents and newlines")
                .with_default("false"),
        ]
    }

    /// Returns the output shape.
    #[must_use]
    pub const fn shape(&self) -> OutputShape {
        self.shape
    }

    /// Returns the top-level fields.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Returns the number of rows for array output.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.row_count
    }

    /// Returns whether output is indented.
    #[must_use]
    pub const fn indent(&self) -> bool {
        self.indent
    }

    fn assemble(
        shape: OutputShape,
        fields: Vec<FieldSpec>,
        row_count: i64,
        indent: bool,
    ) -> Result<Self, OptionsError> {
        let options = match shape {
            OutputShape::Object => Self::object(fields),
            OutputShape::Array => {
                let rows = usize::try_from(row_count)
                    .ok()
                    .filter(|rows| *rows > 0)
                    .ok_or(OptionsError::InvalidRowCount { value: row_count })?;
                Self::array(fields, rows)
            }
        };
        Ok(options.with_indent(indent))
    }
}

/// Raw JSON representation of a field.
#[derive(Debug, Deserialize)]
struct RawFieldSpec {
    name: String,
    #[serde(default)]
    function: Option<String>,
    #[serde(default)]
    params: RawParams,
    #[serde(default)]
    fields: Option<Vec<RawFieldSpec>>,
}

/// Raw JSON representation of record options.
#[derive(Debug, Deserialize)]
struct RawRecordOptions {
    #[serde(rename = "type", default)]
    shape: Option<String>,
    #[serde(default)]
    fields: Vec<RawFieldSpec>,
    #[serde(rename = "rowCount", alias = "rowcount", default)]
    row_count: Option<i64>,
    #[serde(default)]
    indent: bool,
}
