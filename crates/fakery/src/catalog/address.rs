//! Address generators.
//!
//! [`address`] produces a whole postal address as a [`Record`]; the other
//! functions produce its individual parts.

use fake::Fake;
use fake::faker::address::raw::{BuildingNumber, CityName, CountryName, StateName, StreetName, ZipCode};
use fake::locales::EN;
use rand::Rng;

use super::helpers::{float_range, to_fixed};
use crate::error::CatalogError;
use crate::registry::{Descriptor, ParamSpec, ParamType, Registry};
use crate::value::{Record, Value};

const COORDINATE_PLACES: i32 = 6;

/// Generates a street line: building number followed by street name.
pub fn street<R: Rng>(rng: &mut R) -> String {
    let number: String = BuildingNumber(EN).fake_with_rng(rng);
    let name: String = StreetName(EN).fake_with_rng(rng);
    format!("{number} {name}")
}

/// Generates a city name.
pub fn city<R: Rng>(rng: &mut R) -> String {
    CityName(EN).fake_with_rng(rng)
}

/// Generates a state name.
pub fn state<R: Rng>(rng: &mut R) -> String {
    StateName(EN).fake_with_rng(rng)
}

/// Generates a postal code.
pub fn zip<R: Rng>(rng: &mut R) -> String {
    ZipCode(EN).fake_with_rng(rng)
}

/// Generates a country name.
pub fn country<R: Rng>(rng: &mut R) -> String {
    CountryName(EN).fake_with_rng(rng)
}

/// Generates a latitude in `min..=max`, truncated to six decimal places.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidRange`] if the bounds are reversed.
pub fn latitude<R: Rng>(rng: &mut R, min: f64, max: f64) -> Result<f64, CatalogError> {
    float_range(rng, min.max(-90.0), max.min(90.0)).map(|value| to_fixed(value, COORDINATE_PLACES))
}

/// Generates a longitude in `min..=max`, truncated to six decimal places.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidRange`] if the bounds are reversed.
pub fn longitude<R: Rng>(rng: &mut R, min: f64, max: f64) -> Result<f64, CatalogError> {
    float_range(rng, min.max(-180.0), max.min(180.0))
        .map(|value| to_fixed(value, COORDINATE_PLACES))
}

/// Generates a full address record.
///
/// The record holds `address`, `street`, `city`, `state`, `zip`, `country`,
/// `latitude` and `longitude`, in that order.
///
/// # Errors
///
/// Propagates [`CatalogError`] from coordinate sampling.
pub fn address<R: Rng>(rng: &mut R) -> Result<Record, CatalogError> {
    let street_line = street(rng);
    let city_name = city(rng);
    let state_name = state(rng);
    let zip_code = zip(rng);
    let country_name = country(rng);
    let lat = latitude(rng, -90.0, 90.0)?;
    let lng = longitude(rng, -180.0, 180.0)?;

    let mut record = Record::with_capacity(8);
    record.insert(
        "address",
        Value::String(format!("{street_line}, {city_name}, {state_name} {zip_code}")),
    );
    record.insert("street", Value::String(street_line));
    record.insert("city", Value::String(city_name));
    record.insert("state", Value::String(state_name));
    record.insert("zip", Value::String(zip_code));
    record.insert("country", Value::String(country_name));
    record.insert("latitude", Value::Float(lat));
    record.insert("longitude", Value::Float(lng));
    Ok(record)
}

pub(super) fn register(registry: &mut Registry) {
    registry.register(Descriptor::new(
        "address",
        "address",
        "Random full address with coordinates",
        |rng, _| address(rng).map(Value::Record),
    ));
    registry.register(Descriptor::new(
        "street",
        "address",
        "Random street line",
        |rng, _| Ok(Value::String(street(rng))),
    ));
    registry.register(Descriptor::new(
        "city",
        "address",
        "Random city name",
        |rng, _| Ok(Value::String(city(rng))),
    ));
    registry.register(Descriptor::new(
        "state",
        "address",
        "Random state name",
        |rng, _| Ok(Value::String(state(rng))),
    ));
    registry.register(Descriptor::new(
        "zip",
        "address",
        "Random postal code",
        |rng, _| Ok(Value::String(zip(rng))),
    ));
    registry.register(Descriptor::new(
        "country",
        "address",
        "Random country name",
        |rng, _| Ok(Value::String(country(rng))),
    ));
    registry.register(
        Descriptor::new(
            "latitude",
            "address",
            "Random latitude within a range",
            |rng, args| Ok(Value::Float(latitude(rng, args.float(0)?, args.float(1)?)?)),
        )
        .param(ParamSpec::new("min", ParamType::Float, "Minimum latitude").with_default("-90"))
        .param(ParamSpec::new("max", ParamType::Float, "Maximum latitude").with_default("90")),
    );
    registry.register(
        Descriptor::new(
            "longitude",
            "address",
            "Random longitude within a range",
            |rng, args| Ok(Value::Float(longitude(rng, args.float(0)?, args.float(1)?)?)),
        )
        .param(ParamSpec::new("min", ParamType::Float, "Minimum longitude").with_default("-180"))
        .param(ParamSpec::new("max", ParamType::Float, "Maximum longitude").with_default("180")),
    );
}
