//! Model declarations and data shared by the integration tests.
//!
//! The models describe a zoo organization: living beings, humans and
//! employees, animals of several kinds, zoos and the organization owning them.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use jsonmap::reflect::info::{DataStructure, Predicate, PropertyOptions, TypeRef};
use jsonmap::reflect::registry::{ClassDeclaration, ClassRegistry};
use jsonmap::serde::options::{ErrorCallback, JsonSerializerOptions};
use jsonmap::{Instance, JsonSerializer, SerializerError, Value};
use serde_json::json;

// =============================================================================
// Declarations
// =============================================================================

fn living_being() -> ClassDeclaration {
    ClassDeclaration::new("LivingBeing").property("id", TypeRef::Number)
}

fn human() -> ClassDeclaration {
    ClassDeclaration::new("Human")
        .extends("LivingBeing")
        .constructor_property(0, "name", TypeRef::String, PropertyOptions::new())
        .constructor_property(
            1,
            "id",
            TypeRef::Number,
            PropertyOptions::new().name("humanId").required(true),
        )
        .constructor_property(2, "gender", TypeRef::Number, PropertyOptions::new())
        .constructor_property(3, "birthDate", TypeRef::Date, PropertyOptions::new())
}

fn employee() -> ClassDeclaration {
    ClassDeclaration::new("Employee")
        .extends("Human")
        .property_with(
            "email",
            TypeRef::String,
            PropertyOptions::new().required(true),
        )
        .property_with(
            "phoneNumber",
            TypeRef::Object,
            PropertyOptions::new().ty(phone_number_type()),
        )
        .constructor_field(0, "name", TypeRef::String)
        .constructor_property(1, "id", TypeRef::Number, "employeeId")
        .constructor_field(2, "gender", TypeRef::Number)
        .constructor_field(3, "birthDate", TypeRef::Date)
}

fn phone_number() -> ClassDeclaration {
    ClassDeclaration::new("PhoneNumber")
        .property("countryCode", TypeRef::String)
        .property("value", TypeRef::String)
        .constructor_field(0, "value", TypeRef::String)
}

fn animal() -> ClassDeclaration {
    ClassDeclaration::new("Animal")
        .extends("LivingBeing")
        .property("name", TypeRef::String)
        .property("birthDate", TypeRef::Date)
        .property("numberOfPaws", TypeRef::Number)
        .property("gender", TypeRef::Number)
        .property_with("childrenIds", TypeRef::Array, "childrenIdentifiers")
        .property("status", TypeRef::String)
        .constructor_field(0, "name", TypeRef::String)
}

fn panther() -> ClassDeclaration {
    ClassDeclaration::new("Panther")
        .extends("Animal")
        .property("color", TypeRef::String)
        .constructor_field(0, "name", TypeRef::String)
        .constructor_property(1, "isSpeckled", TypeRef::Boolean, PropertyOptions::new())
}

fn snake() -> ClassDeclaration {
    ClassDeclaration::new("Snake")
        .extends("Animal")
        .property("isPoisonous", TypeRef::Boolean)
}

fn unknown_animal() -> ClassDeclaration {
    ClassDeclaration::new("UnknownAnimal").extends("Animal")
}

fn zoo() -> ClassDeclaration {
    ClassDeclaration::new("Zoo")
        .property("boss", TypeRef::class("Employee"))
        .property("city", TypeRef::String)
        .property("country", TypeRef::String)
        .property_with(
            "coordinates",
            TypeRef::Object,
            PropertyOptions::new()
                .before_deserialize(|value, _| {
                    let items = value.as_items().unwrap_or_default();
                    let at = |i: usize| items.get(i).cloned().unwrap_or_default();
                    Instance::new()
                        .with("x", at(0))
                        .with("y", at(1))
                        .with("z", at(2))
                        .into()
                })
                .after_serialize(|value, _| {
                    Value::Array(["x", "y", "z"].map(|axis| value.get(axis).clone()).to_vec())
                }),
        )
        .property("description", TypeRef::String)
        .property_with(
            "employees",
            TypeRef::Object,
            PropertyOptions::new()
                .ty(TypeRef::class("Employee"))
                .data_structure(DataStructure::Set),
        )
        .property("id", TypeRef::Number)
        .property("name", TypeRef::String)
        .property_with(
            "animals",
            TypeRef::Array,
            PropertyOptions::new().name("Animals").ty(snake_or_panther()),
        )
        .property_with(
            "mascot",
            TypeRef::Object,
            PropertyOptions::new().ty(snake_or_panther()),
        )
        .property_with(
            "unknownAnimals",
            TypeRef::Object,
            PropertyOptions::new()
                .dictionary()
                .ty(TypeRef::class("UnknownAnimal")),
        )
        .property_with(
            "phoneBook",
            TypeRef::Map,
            PropertyOptions::new().ty(phone_number_type()),
        )
        .field("isOpen", TypeRef::Boolean)
        .initializer("isOpen", true)
}

fn society() -> ClassDeclaration {
    ClassDeclaration::new("Society")
        .property_with("id", TypeRef::String, PropertyOptions::new().required(true))
        .property("name", TypeRef::String)
        .initializer("id", "4")
}

fn organization() -> ClassDeclaration {
    ClassDeclaration::new("Organization")
        .extends("Society")
        .property_with(
            "zoos",
            TypeRef::Array,
            PropertyOptions::new().name("zoos").ty(TypeRef::class("Zoo")),
        )
        .property_with(
            "zoosName",
            TypeRef::Object,
            PropertyOptions::new().dictionary(),
        )
        .property_with(
            "shareholders",
            TypeRef::Array,
            PropertyOptions::new()
                .names(["mainShareholder", "secondaryShareholder", "thirdShareholder"])
                .ty(TypeRef::class("Human"))
                .before_deserialize(|value, _| match value {
                    Value::Object(slots) => {
                        Value::Array(slots.iter().map(|(_, slot)| slot.clone()).collect())
                    }
                    other => other,
                })
                .after_serialize(|value, _| {
                    let items = value.as_items().unwrap_or_default();
                    let at = |i: usize| items.get(i).cloned().unwrap_or_default();
                    Instance::new()
                        .with("mainShareholder", at(0))
                        .with("secondaryShareholder", at(1))
                        .with("thirdShareholder", at(2))
                        .into()
                }),
        )
}

/// Panthers have no `isPoisonous` key.
pub fn snake_or_panther() -> Predicate {
    Predicate::new(|animal, _| {
        if animal.get("isPoisonous").is_undefined() {
            Some(TypeRef::class("Panther"))
        } else {
            Some(TypeRef::class("Snake"))
        }
    })
}

/// Structured phone numbers have a `value`; plain strings stay strings.
pub fn phone_number_type() -> Predicate {
    Predicate::new(|property, _| {
        (!property.get("value").is_undefined()).then(|| TypeRef::class("PhoneNumber"))
    })
}

/// All zoo models, declared in no particular order.
pub fn registry() -> ClassRegistry {
    let mut registry = ClassRegistry::new();
    for declaration in [
        organization(),
        society(),
        zoo(),
        employee(),
        human(),
        living_being(),
        phone_number(),
        panther(),
        snake(),
        unknown_animal(),
        animal(),
    ] {
        assert!(registry.register(declaration));
    }
    registry
}

// =============================================================================
// Serializers
// =============================================================================

pub type Errors = Arc<Mutex<Vec<SerializerError>>>;

/// A serializer over the zoo models, with `options`, collecting reported errors.
pub fn collecting(options: JsonSerializerOptions) -> (JsonSerializer, Errors) {
    let errors: Errors = Arc::default();
    let sink = errors.clone();
    let options = options.with_error_callback(Some(ErrorCallback::new(move |error| {
        sink.lock().unwrap().push(error);
        Ok(())
    })));
    (
        JsonSerializer::with_options(Arc::new(registry()), options),
        errors,
    )
}

/// A serializer over the zoo models aborting on the first error.
pub fn throwing() -> JsonSerializer {
    JsonSerializer::with_options(
        Arc::new(registry()),
        JsonSerializerOptions::default().with_error_callback(Some(ErrorCallback::throw())),
    )
}

pub fn messages(errors: &Errors) -> Vec<String> {
    errors.lock().unwrap().iter().map(ToString::to_string).collect()
}

// =============================================================================
// Data
// =============================================================================

pub fn bagheera() -> serde_json::Value {
    json!({
        "id": 1,
        "name": "Bagheera",
        "birthDate": "2010-01-11T22:00:00.000Z",
        "numberOfPaws": 4,
        "gender": 1,
        "childrenIdentifiers": [2, 3],
        "status": "Sick",
        "color": "black",
        "isSpeckled": false
    })
}

pub fn employee_json(id: u32, name: &str, email: &str) -> serde_json::Value {
    json!({
        "employeeId": id,
        "name": name,
        "gender": 1,
        "birthDate": "1984-04-03T22:00:00.000Z",
        "email": email
    })
}

/// A serialized zoo; every key is declared.
pub fn zoo_json() -> serde_json::Value {
    json!({
        "boss": employee_json(1, "Bob Razowsky", "bob.razowsky@tgzoo.fr"),
        "city": "Bordeaux",
        "country": "France",
        "coordinates": [1, 2, 3],
        "employees": [
            employee_json(1, "Bob Razowsky", "bob.razowsky@tgzoo.fr"),
            employee_json(2, "Mikasa Ackerman", "mikasa.ackerman@tgzoo.fr")
        ],
        "id": 15,
        "name": "The Greatest Zoo",
        "Animals": [
            bagheera(),
            {
                "id": 3,
                "name": "Ka",
                "birthDate": "2018-09-09T00:00:00.000Z",
                "numberOfPaws": 0,
                "gender": 1,
                "status": "Alive",
                "isPoisonous": true
            },
            {
                "id": 4,
                "name": "Schrodinger",
                "numberOfPaws": 4,
                "gender": 1,
                "status": "Dead and alive",
                "color": "brown",
                "isSpeckled": false
            }
        ],
        "mascot": bagheera(),
        "unknownAnimals": { "snowy": { "name": null } },
        "phoneBook": {
            "office": { "countryCode": "33", "value": "556000000" },
            "fax": "0556000001"
        }
    })
}

/// A serialized organization; every key is declared.
pub fn organization_json() -> serde_json::Value {
    json!({
        "id": "1",
        "name": "Zoos Organization",
        "zoos": [zoo_json()],
        "zoosName": { "15": "The Greatest Zoo" },
        "mainShareholder": {
            "name": "Elon Musk",
            "humanId": 100,
            "gender": 1,
            "birthDate": "1971-06-28T22:00:00.000Z"
        },
        "secondaryShareholder": {
            "name": "Bill Gates",
            "humanId": 101,
            "gender": 1,
            "birthDate": "1955-10-28T22:00:00.000Z"
        }
    })
}

/// Converts JSON data into a [`Value`].
pub fn value(json: serde_json::Value) -> Value {
    Value::from(json)
}
