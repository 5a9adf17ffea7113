//! Built-in generator catalog.
//!
//! Each submodule exposes plain generic functions over any [`rand::Rng`] and
//! a private `register` hook that wires them into a
//! [`Registry`](crate::Registry) with their parameter schemas. The functions
//! are usable directly; the registry entries are what name-based callers see.

pub mod address;
pub mod auth;
pub mod helpers;
pub mod misc;
pub mod number;
pub mod person;
pub mod text;

use crate::registry::Registry;

/// Registers every built-in generator.
pub(crate) fn register_all(registry: &mut Registry) {
    person::register(registry);
    address::register(registry);
    number::register(registry);
    text::register(registry);
    auth::register(registry);
    misc::register(registry);
}
