//! Templated record generation.
//!
//! A [`RecordOptions`] template names each output field and the generator
//! that fills it. [`RecordGenerator`] first compiles the template against the
//! registry, resolving every function and binding every parameter, and only
//! then draws random values. A template that fails to compile therefore
//! consumes nothing from the random source, and a failure while rows are
//! being filled discards everything generated so far.
//!
//! Templated generation is also registered as the [`RECORD_FUNCTION`]
//! generator, so name-based callers reach it with untyped parameters like any
//! catalog function.

mod options;

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, info};

pub use self::options::{FieldKind, FieldSpec, OutputShape, RecordOptions};
use crate::binder::{Arguments, bind};
use crate::error::{GenerateError, InvokeError};
use crate::invoker::Invoker;
use crate::registry::{Descriptor, Registry};
use crate::value::{Record, Value};

/// Reserved function name for the per-scope row counter.
pub const AUTOINCREMENT: &str = "autoincrement";

/// Name under which templated generation is exposed to name-based callers.
pub const RECORD_FUNCTION: &str = "json";

/// Maximum number of nested field levels, counting the top level.
pub const MAX_NESTING_DEPTH: usize = 32;

const INDENT: &[u8] = b"    ";

const TEMPLATE_CATEGORY: &str = "template";

/// Registers templated generation under [`RECORD_FUNCTION`].
pub(crate) fn register(registry: &mut Registry) {
    let descriptor = RecordOptions::params().into_iter().fold(
        Descriptor::record(
            RECORD_FUNCTION,
            TEMPLATE_CATEGORY,
            "Generate an object or array of objects from field specs",
        ),
        Descriptor::param,
    );
    registry.register(descriptor);
}

/// Generates JSON documents from record templates.
///
/// # Example
///
/// ```
/// use fakery::{FieldSpec, Invoker, RandomSource, RecordGenerator, RecordOptions, Registry};
///
/// let registry = Registry::with_catalog();
/// let random = RandomSource::from_seed(7);
/// let generator = RecordGenerator::new(Invoker::new(&registry, &random));
///
/// let options = RecordOptions::object(vec![
///     FieldSpec::new("id", "autoincrement"),
///     FieldSpec::new("pin", "numerify").with_param("str", "####"),
/// ])
/// .with_indent(true);
///
/// let document = generator.generate(&options).expect("generation succeeds");
///
/// assert!(document.starts_with("{\n    \"id\": 1,\n    \"pin\": \""));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RecordGenerator<'a> {
    invoker: Invoker<'a>,
}

impl<'a> RecordGenerator<'a> {
    /// Creates a generator that resolves and runs fields through `invoker`.
    #[must_use]
    pub const fn new(invoker: Invoker<'a>) -> Self {
        Self { invoker }
    }

    /// Generates the document and serialises it to JSON.
    ///
    /// Indented output uses four spaces with brackets on their own lines;
    /// otherwise the compact encoding is used.
    ///
    /// # Errors
    ///
    /// As [`RecordGenerator::generate_value`], plus
    /// [`GenerateError::SerializeError`] if encoding fails.
    pub fn generate(&self, options: &RecordOptions) -> Result<String, GenerateError> {
        let value = self.generate_value(options)?;
        let document = render(&value, options.indent())?;
        info!(
            shape = options.shape().as_str(),
            rows = row_total(&value),
            bytes = document.len(),
            "generated record document"
        );
        Ok(document)
    }

    /// Generates the document as a [`Value`].
    ///
    /// Objects yield [`Value::Record`]; arrays yield a [`Value::List`] of
    /// records.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::EmptyRowCount`] for an array of zero rows,
    /// [`GenerateError::UnknownFunction`], [`GenerateError::DuplicateField`]
    /// or [`GenerateError::NestingTooDeep`] for a structurally invalid
    /// template, and
    /// [`GenerateError::FieldFailed`] when a field's parameters do not bind or
    /// its generator fails.
    pub fn generate_value(&self, options: &RecordOptions) -> Result<Value, GenerateError> {
        if options.shape() == OutputShape::Array && options.row_count() == 0 {
            return Err(GenerateError::EmptyRowCount);
        }
        let plan = self.compile(options.fields(), 1)?;

        match options.shape() {
            OutputShape::Object => self.fill_row(&plan, 1).map(Value::Record),
            OutputShape::Array => (1..=options.row_count())
                .map(|row| {
                    let position = i64::try_from(row).unwrap_or(i64::MAX);
                    self.fill_row(&plan, position).map(Value::Record)
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
        }
    }

    fn compile<'t>(
        &self,
        fields: &'t [FieldSpec],
        depth: usize,
    ) -> Result<Vec<Step<'t, 'a>>, GenerateError> {
        let mut seen = BTreeSet::new();
        fields
            .iter()
            .map(|field| {
                if !seen.insert(field.name()) {
                    return Err(GenerateError::DuplicateField {
                        field: field.name().to_owned(),
                    });
                }
                let action = match field.kind() {
                    FieldKind::AutoIncrement => Action::AutoIncrement,
                    FieldKind::Nested(children) => {
                        if depth >= MAX_NESTING_DEPTH {
                            return Err(GenerateError::NestingTooDeep {
                                field: field.name().to_owned(),
                                max_depth: MAX_NESTING_DEPTH,
                            });
                        }
                        Action::Nested(self.compile(children, depth.saturating_add(1))?)
                    }
                    FieldKind::Leaf { function, params } => {
                        let descriptor = self.invoker.registry().lookup(function).ok_or_else(
                            || GenerateError::UnknownFunction {
                                field: field.name().to_owned(),
                                function: function.clone(),
                            },
                        )?;
                        let args = bind(descriptor, params).map_err(|error| {
                            GenerateError::FieldFailed {
                                field: field.name().to_owned(),
                                source: InvokeError::from(error),
                            }
                        })?;
                        Action::Invoke { descriptor, args }
                    }
                };
                Ok(Step {
                    name: field.name(),
                    action,
                })
            })
            .collect()
    }

    /// Fills the object at one-based `row` of its scope.
    ///
    /// Every auto-increment field of the row emits `row`. A nested object is
    /// the only row of its own scope.
    fn fill_row(&self, plan: &[Step<'_, 'a>], row: i64) -> Result<Record, GenerateError> {
        let mut record = Record::with_capacity(plan.len());
        for step in plan {
            let value = match &step.action {
                Action::AutoIncrement => Value::Int(row),
                Action::Nested(children) => Value::Record(self.fill_row(children, 1)?),
                Action::Invoke { descriptor, args } => self
                    .invoker
                    .run(descriptor, args)
                    .map_err(|source| {
                        debug!(field = step.name, %source, "field generation failed");
                        GenerateError::FieldFailed {
                            field: step.name.to_owned(),
                            source,
                        }
                    })?,
            };
            record.insert(step.name, value);
        }
        Ok(record)
    }
}

/// A field resolved against the registry, ready to fill.
struct Step<'t, 'r> {
    name: &'t str,
    action: Action<'t, 'r>,
}

enum Action<'t, 'r> {
    AutoIncrement,
    Nested(Vec<Step<'t, 'r>>),
    Invoke {
        descriptor: &'r Descriptor,
        args: Arguments,
    },
}

fn row_total(value: &Value) -> usize {
    value.as_list().map_or(1, <[Value]>::len)
}

fn render(value: &Value, indent: bool) -> Result<String, GenerateError> {
    let to_error = |message: String| GenerateError::SerializeError { message };
    if !indent {
        return serde_json::to_string(value).map_err(|e| to_error(e.to_string()));
    }

    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    value
        .serialize(&mut serializer)
        .map_err(|e| to_error(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| to_error(e.to_string()))
}

#[cfg(test)]
mod tests;
