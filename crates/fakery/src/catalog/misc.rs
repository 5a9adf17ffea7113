//! Identifiers, raw bytes and pattern substitution.

use rand::Rng;
use uuid::{Builder, Uuid};

use super::helpers::{count, replace_with_letters, replace_with_numbers};
use crate::binder::Arguments;
use crate::error::CatalogError;
use crate::random::SharedRng;
use crate::registry::{Descriptor, ParamSpec, ParamType, Registry};
use crate::value::Value;

/// Largest accepted `bytes` length, one mebibyte.
pub const MAX_BYTES_LENGTH: usize = 1 << 20;

/// Generates a version 4 UUID from the supplied random source.
pub fn uuid<R: Rng>(rng: &mut R) -> Uuid {
    Builder::from_random_bytes(rng.random()).into_uuid()
}

/// Generates `length` random bytes.
pub fn bytes<R: Rng>(rng: &mut R, length: usize) -> Vec<u8> {
    let mut buffer = vec![0_u8; length];
    rng.fill_bytes(&mut buffer);
    buffer
}

fn bytes_adapter(rng: &mut SharedRng<'_>, args: &Arguments) -> Result<Value, CatalogError> {
    let length = count("length", args.int(0)?, MAX_BYTES_LENGTH)?;
    Ok(Value::Bytes(bytes(rng, length)))
}

pub(super) fn register(registry: &mut Registry) {
    registry.register(Descriptor::new(
        "uuid",
        "misc",
        "Random version 4 UUID",
        |rng, _| Ok(Value::String(uuid(rng).to_string())),
    ));
    registry.register(
        Descriptor::new("bytes", "misc", "Random bytes", bytes_adapter)
            .param(ParamSpec::new("length", ParamType::Int, "Number of bytes").with_default("16")),
    );
    registry.register(
        Descriptor::new(
            "numerify",
            "misc",
            "Replace # with random digits",
            |rng, args| Ok(Value::String(replace_with_numbers(rng, args.string(0)?))),
        )
        .param(
            ParamSpec::new("str", ParamType::String, "String value to replace #'s")
                .with_default("###-###-####"),
        ),
    );
    registry.register(
        Descriptor::new(
            "lexify",
            "misc",
            "Replace ? with random letters",
            |rng, args| Ok(Value::String(replace_with_letters(rng, args.string(0)?))),
        )
        .param(
            ParamSpec::new("str", ParamType::String, "String value to replace ?'s")
                .with_default("?????"),
        ),
    );
}
