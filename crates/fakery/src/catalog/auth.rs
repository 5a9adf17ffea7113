//! Credential generators.

use rand::Rng;
use rand::seq::SliceRandom;

use super::helpers::{count, random_char};
use crate::binder::Arguments;
use crate::error::CatalogError;
use crate::random::SharedRng;
use crate::registry::{Descriptor, ParamSpec, ParamType, Registry};
use crate::value::Value;

const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const NUMERIC: &[u8] = b"0123456789";
const SPECIAL: &[u8] = b"!@#$%&*+-_=?:;,.|(){}<>";
const SPACE: &[u8] = b" ";

/// Largest accepted password `length`.
pub const MAX_PASSWORD_LENGTH: usize = 4_096;

/// Character classes a generated password may draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each flag mirrors an independent user-facing switch"
)]
pub struct PasswordPolicy {
    /// Include lowercase letters.
    pub lower: bool,
    /// Include uppercase letters.
    pub upper: bool,
    /// Include digits.
    pub numeric: bool,
    /// Include punctuation.
    pub special: bool,
    /// Include the space character.
    pub space: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            lower: true,
            upper: true,
            numeric: true,
            special: true,
            space: false,
        }
    }
}

impl PasswordPolicy {
    fn pools(self) -> Vec<&'static [u8]> {
        let pools: Vec<&'static [u8]> = [
            (self.lower, LOWER),
            (self.upper, UPPER),
            (self.numeric, NUMERIC),
            (self.special, SPECIAL),
            (self.space, SPACE),
        ]
        .into_iter()
        .filter_map(|(enabled, pool)| enabled.then_some(pool))
        .collect();
        if pools.is_empty() {
            vec![LOWER]
        } else {
            pools
        }
    }
}

/// Generates a password of `length` characters.
///
/// Every enabled class contributes at least one character while the length
/// allows. A policy with every class disabled falls back to lowercase.
pub fn password<R: Rng>(rng: &mut R, policy: PasswordPolicy, length: usize) -> String {
    let pools = policy.pools();
    let combined: Vec<u8> = pools.concat();

    let mut chars: Vec<char> = pools
        .iter()
        .take(length)
        .map(|pool| random_char(rng, pool))
        .collect();
    while chars.len() < length {
        chars.push(random_char(rng, &combined));
    }
    chars.shuffle(rng);
    chars.into_iter().collect()
}

fn password_adapter(rng: &mut SharedRng<'_>, args: &Arguments) -> Result<Value, CatalogError> {
    let policy = PasswordPolicy {
        lower: args.bool(0)?,
        upper: args.bool(1)?,
        numeric: args.bool(2)?,
        special: args.bool(3)?,
        space: args.bool(4)?,
    };
    let length = count("length", args.int(5)?, MAX_PASSWORD_LENGTH)?;
    Ok(Value::String(password(rng, policy, length)))
}

pub(super) fn register(registry: &mut Registry) {
    registry.register(
        Descriptor::new("password", "auth", "Random password", password_adapter)
            .param(
                ParamSpec::new("lower", ParamType::Bool, "Include lowercase letters")
                    .with_default("true"),
            )
            .param(
                ParamSpec::new("upper", ParamType::Bool, "Include uppercase letters")
                    .with_default("true"),
            )
            .param(ParamSpec::new("numeric", ParamType::Bool, "Include digits").with_default("true"))
            .param(
                ParamSpec::new("special", ParamType::Bool, "Include special characters")
                    .with_default("true"),
            )
            .param(ParamSpec::new("space", ParamType::Bool, "Include spaces").with_default("false"))
            .param(
                ParamSpec::new("length", ParamType::Int, "Number of characters").with_default("12"),
            ),
    );
}
