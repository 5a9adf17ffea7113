//! Deterministic fake data generation invoked by name.
//!
//! This crate exposes a catalog of generator functions (people, addresses,
//! numbers, text, credentials) behind a uniform, name-based invocation layer.
//! Front ends pass a function name together with loosely typed string
//! parameters; the crate binds those strings to typed arguments, runs the
//! generator against a shared seeded random source, and returns a [`Value`].
//!
//! # Overview
//!
//! The crate supports:
//!
//! - A [`Registry`] of [`Descriptor`]s describing every generator and its
//!   parameter schema
//! - Binding of untyped [`RawParams`] (CLI tokens, query strings, JSON bodies)
//!   into typed [`Arguments`]
//! - An [`Invoker`] tying lookup, binding and execution together
//! - A [`RecordGenerator`] that composes many invocations into one JSON
//!   document, with nested objects and an `autoincrement` row counter; it is
//!   also registered as the `json` function
//!
//! # Example
//!
//! ```
//! use fakery::{FieldSpec, Invoker, RandomSource, RecordGenerator, RecordOptions, Registry};
//!
//! let registry = Registry::with_catalog();
//! let random = RandomSource::from_seed(11);
//! let generator = RecordGenerator::new(Invoker::new(&registry, &random));
//!
//! let options = RecordOptions::array(
//!     vec![
//!         FieldSpec::new("id", "autoincrement"),
//!         FieldSpec::new("first_name", "firstname"),
//!     ],
//!     3,
//! );
//! let document = generator.generate(&options).expect("generation succeeds");
//!
//! assert!(document.starts_with('['));
//! ```

mod binder;
pub mod catalog;
pub mod cli;
mod config;
mod error;
mod invoker;
mod random;
mod registry;
mod template;
mod value;

pub use binder::{
    Argument, Arguments, RawParams, bind, bind_params, bind_positional, positional_params,
    split_list,
};
pub use config::FakerySettings;
pub use error::{
    ArgumentError, BindError, CatalogError, GenerateError, InvokeError, LookupError, OptionsError,
};
pub use invoker::Invoker;
pub use random::{RandomSource, SharedRng};
pub use registry::{Callable, Descriptor, ParamSpec, ParamType, Registry};
pub use template::{
    AUTOINCREMENT, FieldKind, FieldSpec, MAX_NESTING_DEPTH, OutputShape, RECORD_FUNCTION,
    RecordGenerator, RecordOptions,
};
pub use value::{Record, Value};
