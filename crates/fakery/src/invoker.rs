//! Name-based invocation: lookup, bind, execute.

use tracing::debug;

use crate::binder::{Arguments, RawParams, bind, bind_positional};
use crate::error::InvokeError;
use crate::random::RandomSource;
use crate::registry::{Descriptor, Handler, Registry};
use crate::template::{RecordGenerator, RecordOptions};
use crate::value::Value;

/// Runs registered generators against a shared random source.
///
/// The invoker borrows both collaborators, so it is cheap to copy and can be
/// handed to every caller of a request or generation.
///
/// # Example
///
/// ```
/// use fakery::{Invoker, RandomSource, RawParams, Registry};
///
/// let registry = Registry::with_catalog();
/// let random = RandomSource::from_seed(3);
/// let invoker = Invoker::new(&registry, &random);
///
/// let params: RawParams = [("min", ["1"]), ("max", ["6"])].into_iter().collect();
/// let roll = invoker.call_by_name("number", &params).expect("number runs");
///
/// assert!((1..=6).contains(&roll.as_i64().expect("integer")));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Invoker<'a> {
    registry: &'a Registry,
    random: &'a RandomSource,
}

impl<'a> Invoker<'a> {
    /// Creates an invoker over `registry` drawing from `random`.
    #[must_use]
    pub const fn new(registry: &'a Registry, random: &'a RandomSource) -> Self {
        Self { registry, random }
    }

    /// Returns the registry used for lookups.
    #[must_use]
    pub const fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Returns the shared random source.
    #[must_use]
    pub const fn random(&self) -> &'a RandomSource {
        self.random
    }

    /// Binds `raw` against `descriptor` and runs it.
    ///
    /// # Errors
    ///
    /// Returns [`InvokeError::Bind`] when parameters do not bind and
    /// [`InvokeError::Catalog`] when the generator rejects its arguments.
    pub fn call(&self, descriptor: &Descriptor, raw: &RawParams) -> Result<Value, InvokeError> {
        let args = bind(descriptor, raw)?;
        self.run(descriptor, &args)
    }

    /// Looks up `name` and runs it with named parameters.
    ///
    /// # Errors
    ///
    /// Returns [`InvokeError::NotFound`] for unknown names, otherwise as
    /// [`Invoker::call`].
    pub fn call_by_name(&self, name: &str, raw: &RawParams) -> Result<Value, InvokeError> {
        let descriptor = self.registry.find(name)?;
        self.call(descriptor, raw)
    }

    /// Looks up `name` and runs it with positional tokens.
    ///
    /// # Errors
    ///
    /// As [`Invoker::call_by_name`].
    pub fn call_positional(&self, name: &str, tokens: &[String]) -> Result<Value, InvokeError> {
        let descriptor = self.registry.find(name)?;
        let args = bind_positional(descriptor, tokens)?;
        self.run(descriptor, &args)
    }

    /// Runs `descriptor` with arguments that are already bound.
    ///
    /// Templated generation yields the rendered document as a string.
    ///
    /// # Errors
    ///
    /// Returns [`InvokeError::Catalog`] when the generator rejects its
    /// arguments, and [`InvokeError::Options`] or [`InvokeError::Generate`]
    /// when templated generation fails.
    pub fn run(&self, descriptor: &Descriptor, args: &Arguments) -> Result<Value, InvokeError> {
        debug!(function = descriptor.name(), arguments = args.len(), "invoking generator");
        let result = match descriptor.handler() {
            Handler::Catalog(callable) => {
                callable(&mut self.random.handle(), args).map_err(InvokeError::from)
            }
            Handler::Record => self.run_template(args),
        };
        result.inspect_err(|error| {
            debug!(function = descriptor.name(), %error, "generator failed");
        })
    }

    fn run_template(&self, args: &Arguments) -> Result<Value, InvokeError> {
        let options = RecordOptions::from_arguments(args)?;
        let document = RecordGenerator::new(*self)
            .generate(&options)
            .map_err(Box::new)?;
        Ok(Value::String(document))
    }
}
