//! Numeric and boolean generators.

use rand::Rng;

use super::helpers::{float_range, int_range, random_char};
use crate::error::CatalogError;
use crate::registry::{Descriptor, ParamSpec, ParamType, Registry};
use crate::value::Value;

/// Generates an integer in `min..=max`.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidRange`] when `min > max`.
pub fn number<R: Rng>(rng: &mut R, min: i64, max: i64) -> Result<i64, CatalogError> {
    int_range(rng, min, max)
}

/// Generates a float in `min..=max`.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidRange`] when `min > max`.
pub fn float64_range<R: Rng>(rng: &mut R, min: f64, max: f64) -> Result<f64, CatalogError> {
    float_range(rng, min, max)
}

/// Generates a single decimal digit as a string.
pub fn digit<R: Rng>(rng: &mut R) -> String {
    random_char(rng, b"0123456789").to_string()
}

/// Generates a boolean with even odds.
pub fn boolean<R: Rng>(rng: &mut R) -> bool {
    rng.random_bool(0.5)
}

pub(super) fn register(registry: &mut Registry) {
    registry.register(
        Descriptor::new(
            "number",
            "number",
            "Random integer between min and max, inclusive",
            |rng, args| Ok(Value::Int(number(rng, args.int(0)?, args.int(1)?)?)),
        )
        .param(ParamSpec::new("min", ParamType::Int, "Minimum value").with_default("-2147483648"))
        .param(ParamSpec::new("max", ParamType::Int, "Maximum value").with_default("2147483647")),
    );
    registry.register(
        Descriptor::new(
            "float64range",
            "number",
            "Random float between min and max, inclusive",
            |rng, args| Ok(Value::Float(float64_range(rng, args.float(0)?, args.float(1)?)?)),
        )
        .param(ParamSpec::new("min", ParamType::Float, "Minimum value").with_default("0"))
        .param(ParamSpec::new("max", ParamType::Float, "Maximum value").with_default("1000000")),
    );
    registry.register(Descriptor::new(
        "digit",
        "number",
        "Random single digit",
        |rng, _| Ok(Value::String(digit(rng))),
    ));
    registry.register(Descriptor::new(
        "bool",
        "misc",
        "Random boolean",
        |rng, _| Ok(Value::Bool(boolean(rng))),
    ));
}
