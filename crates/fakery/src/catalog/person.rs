//! Person and identity generators.

use fake::Fake;
use fake::faker::internet::raw::{SafeEmail, Username};
use fake::faker::name::raw::{FirstName, LastName, Name};
use fake::locales::EN;
use rand::Rng;

use crate::registry::{Descriptor, Registry};
use crate::value::Value;

/// Generates a first name.
pub fn first_name<R: Rng>(rng: &mut R) -> String {
    FirstName(EN).fake_with_rng(rng)
}

/// Generates a last name.
pub fn last_name<R: Rng>(rng: &mut R) -> String {
    LastName(EN).fake_with_rng(rng)
}

/// Generates a full name.
pub fn name<R: Rng>(rng: &mut R) -> String {
    Name(EN).fake_with_rng(rng)
}

/// Generates a username.
pub fn username<R: Rng>(rng: &mut R) -> String {
    Username(EN).fake_with_rng(rng)
}

/// Generates an email address on a reserved example domain.
pub fn email<R: Rng>(rng: &mut R) -> String {
    SafeEmail(EN).fake_with_rng(rng)
}

pub(super) fn register(registry: &mut Registry) {
    registry.register(Descriptor::new(
        "firstname",
        "person",
        "Random first name",
        |rng, _| Ok(Value::String(first_name(rng))),
    ));
    registry.register(Descriptor::new(
        "lastname",
        "person",
        "Random last name",
        |rng, _| Ok(Value::String(last_name(rng))),
    ));
    registry.register(Descriptor::new(
        "name",
        "person",
        "Random full name",
        |rng, _| Ok(Value::String(name(rng))),
    ));
    registry.register(Descriptor::new(
        "username",
        "internet",
        "Random username",
        |rng, _| Ok(Value::String(username(rng))),
    ));
    registry.register(Descriptor::new(
        "email",
        "internet",
        "Random email address",
        |rng, _| Ok(Value::String(email(rng))),
    ));
}
