//! Low-level randomisation primitives shared by the catalog.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::CatalogError;

const DIGITS: &[u8] = b"0123456789";
const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const HEX_LETTERS: &[u8] = b"0123456789abcdef";

/// Replaces every `#` in `pattern` with a random digit.
pub fn replace_with_numbers<R: Rng>(rng: &mut R, pattern: &str) -> String {
    substitute(rng, pattern, '#', DIGITS)
}

/// Replaces every `?` in `pattern` with a random ASCII letter.
pub fn replace_with_letters<R: Rng>(rng: &mut R, pattern: &str) -> String {
    substitute(rng, pattern, '?', LETTERS)
}

/// Replaces every `^` in `pattern` with a random lowercase hex digit.
pub fn replace_with_hex_letters<R: Rng>(rng: &mut R, pattern: &str) -> String {
    substitute(rng, pattern, '^', HEX_LETTERS)
}

fn substitute<R: Rng>(rng: &mut R, pattern: &str, marker: char, pool: &[u8]) -> String {
    pattern
        .chars()
        .map(|c| {
            if c == marker {
                random_char(rng, pool)
            } else {
                c
            }
        })
        .collect()
}

/// Picks one ASCII character from `pool`.
pub(crate) fn random_char<R: Rng>(rng: &mut R, pool: &[u8]) -> char {
    pool.choose(rng).map_or(' ', |byte| char::from(*byte))
}

/// Samples an integer in `min..=max`.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidRange`] when `min > max`.
pub fn int_range<R: Rng>(rng: &mut R, min: i64, max: i64) -> Result<i64, CatalogError> {
    if min > max {
        return Err(CatalogError::InvalidRange {
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(rng.random_range(min..=max))
}

/// Samples a float in `min..=max`; equal bounds return `min`.
///
/// Bounds too far apart for the uniform sampler are interpolated instead.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidRange`] when `min > max`.
#[expect(
    clippy::float_arithmetic,
    reason = "range width and interpolation are floating point"
)]
pub fn float_range<R: Rng>(rng: &mut R, min: f64, max: f64) -> Result<f64, CatalogError> {
    // The uniform sampler rescales the width, which must stay finite.
    const MAX_SAMPLED_WIDTH: f64 = f64::MAX / 4.0;

    if min > max {
        return Err(CatalogError::InvalidRange {
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    if min >= max {
        return Ok(min);
    }
    if max - min <= MAX_SAMPLED_WIDTH {
        return Ok(rng.random_range(min..=max));
    }
    let t: f64 = rng.random();
    Ok(min.mul_add(1.0 - t, max * t).clamp(min, max))
}

/// Truncates `value` to `places` decimal places.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "fixed-point truncation is inherently floating point"
)]
pub fn to_fixed(value: f64, places: i32) -> f64 {
    let scale = 10_f64.powi(places);
    (value * scale).trunc() / scale
}

/// Converts a count parameter into a `usize` no greater than `max`.
///
/// # Errors
///
/// Returns [`CatalogError::NegativeCount`] for negative values and
/// [`CatalogError::CountTooLarge`] above `max`.
pub(crate) fn count(field: &'static str, value: i64, max: usize) -> Result<usize, CatalogError> {
    let counted = usize::try_from(value).map_err(|_| CatalogError::NegativeCount { field, value })?;
    if counted > max {
        return Err(CatalogError::CountTooLarge { field, value, max });
    }
    Ok(counted)
}
