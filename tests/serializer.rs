//! End-to-end conversions over the zoo models.

mod fixtures;

use std::sync::Arc;

use fixtures::{collecting, messages, throwing, value};
use jsonmap::reflect::info::{PropertyOptions, TypeRef};
use jsonmap::reflect::registry::{ClassDeclaration, ClassRegistry};
use jsonmap::reflect::value::date;
use jsonmap::serde::options::{ErrorCallback, JsonSerializerOptions, NullishPolicy, Policy};
use jsonmap::{Instance, JsonSerializer, Value};
use serde_json::json;

fn to_json(value: &Value) -> serde_json::Value {
    serde_json::to_value(value).unwrap()
}

fn fried_richter(registry: &ClassRegistry) -> Instance {
    let birth_date = date::parse_date("1994-04-01T22:00:00.000Z").unwrap();
    registry.instantiate(
        &TypeRef::class("Employee"),
        &[
            Value::from("Fried Richter"),
            Value::from(4),
            Value::from(1),
            Value::from(birth_date),
        ],
    )
}

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn organization_round_trip() {
    let (serializer, errors) = collecting(JsonSerializerOptions::default());
    let json = value(fixtures::organization_json());

    let organization = serializer.deserialize(&json, "Organization").unwrap();
    let again = serializer.serialize(&organization).unwrap();

    assert_eq!(to_json(&again), fixtures::organization_json());
    assert!(messages(&errors).is_empty(), "{:?}", messages(&errors));
}

#[test]
fn organization_graph() {
    let serializer = throwing();
    let organization = serializer
        .deserialize(&value(fixtures::organization_json()), "Organization")
        .unwrap();

    assert_eq!(organization.class_name(), Some("Organization"));
    assert_eq!(organization.get("id"), &Value::from("1"));

    let shareholders = organization.get("shareholders").as_items().unwrap();
    assert_eq!(shareholders.len(), 2);
    assert_eq!(shareholders[0].class_name(), Some("Human"));
    assert_eq!(shareholders[1].get("id"), &Value::from(101));

    let zoo = &organization.get("zoos").as_items().unwrap()[0];
    assert_eq!(zoo.class_name(), Some("Zoo"));
    assert_eq!(zoo.get("isOpen"), &Value::from(true));
    assert_eq!(zoo.get("boss").class_name(), Some("Employee"));
    assert!(zoo.get("boss").get("birthDate").as_date().is_some());
    assert_eq!(
        zoo.get("coordinates"),
        &Value::from(Instance::new().with("x", 1).with("y", 2).with("z", 3))
    );

    let Value::Set(employees) = zoo.get("employees") else {
        panic!("employees should be a set");
    };
    assert_eq!(employees.len(), 2);

    let animals = zoo.get("animals").as_items().unwrap();
    let classes: Vec<_> = animals.iter().filter_map(Value::class_name).collect();
    assert_eq!(classes, ["Panther", "Snake", "Panther"]);
    assert_eq!(animals[0].get("childrenIds"), &value(json!([2, 3])));
    assert_eq!(zoo.get("mascot").class_name(), Some("Panther"));

    let unknown = zoo.get("unknownAnimals").get("snowy");
    assert_eq!(unknown.class_name(), Some("UnknownAnimal"));
    assert_eq!(unknown.get("name"), &Value::Null);

    let Value::Map(phone_book) = zoo.get("phoneBook") else {
        panic!("phoneBook should be a map");
    };
    assert_eq!(phone_book[0].0, Value::from("office"));
    assert_eq!(phone_book[0].1.class_name(), Some("PhoneNumber"));
    assert_eq!(phone_book[1].1, Value::from("0556000001"));
}

// =============================================================================
// Inheritance
// =============================================================================

#[test]
fn derived_names_win() {
    let serializer = throwing();
    let employee = serializer
        .deserialize(&value(fixtures::employee_json(7, "Ada", "ada@tgzoo.fr")), "Employee")
        .unwrap();
    assert_eq!(employee.get("id"), &Value::from(7));

    let human = serializer
        .deserialize(
            &value(json!({ "humanId": 8, "name": "Alan", "gender": 1 })),
            "Human",
        )
        .unwrap();
    assert_eq!(human.get("id"), &Value::from(8));

    let json = to_json(&serializer.serialize(&employee).unwrap());
    assert_eq!(json["employeeId"], json!(7));
    assert!(json.get("humanId").is_none());
}

#[test]
fn required_on_deserialize() {
    let serializer = throwing();
    let json = r#"{"employeeId":4,"name":"Fried Richter","birthDate":"1994-04-01T22:00:00.000Z","gender":1}"#;

    let error = serializer.deserialize_str(json, "Employee").unwrap_err();
    assert_eq!(
        error.to_string(),
        format!("Fail to deserialize: Property 'email' is required in Employee {json}.")
    );
}

#[test]
fn required_on_serialize() {
    let serializer = throwing();
    let employee = fried_richter(serializer.registry());

    let error = serializer.serialize(&Value::from(employee)).unwrap_err();
    assert_eq!(
        error.to_string(),
        r#"Fail to serialize: Property 'email' is required in Employee {"name":"Fried Richter","id":4,"gender":1,"birthDate":"1994-04-01T22:00:00.000Z"}."#
    );
}

#[test]
fn inherited_required_property() {
    let (serializer, errors) = collecting(JsonSerializerOptions::default());
    let json = json!({ "name": "Ada", "email": "ada@tgzoo.fr" });

    let employee = serializer.deserialize(&value(json), "Employee").unwrap();
    assert_eq!(employee.get("email"), &Value::from("ada@tgzoo.fr"));
    assert_eq!(
        messages(&errors),
        [r#"Fail to deserialize: Property 'id' is required in Employee {"name":"Ada","email":"ada@tgzoo.fr"}."#]
    );
}

// =============================================================================
// Options
// =============================================================================

#[test]
fn nullish_policies() {
    let employee = |serializer: &JsonSerializer| {
        let mut employee = fried_richter(serializer.registry());
        employee.set("email", Value::Null);
        employee.set("phoneNumber", Value::Undefined);
        serializer.serialize(&Value::from(employee)).unwrap()
    };

    let (serializer, errors) = collecting(JsonSerializerOptions::default());
    let json = to_json(&employee(&serializer));
    assert_eq!(json["email"], json!(null));
    assert!(json.get("phoneNumber").is_none());
    assert_eq!(
        messages(&errors),
        [r#"Fail to serialize: Property 'email' is required in Employee {"name":"Fried Richter","id":4,"gender":1,"birthDate":"1994-04-01T22:00:00.000Z","email":null}."#]
    );

    let (serializer, errors) = collecting(
        JsonSerializerOptions::default().with_nullish_policy(NullishPolicy {
            undefined: Policy::Allow,
            null: Policy::Remove,
        }),
    );
    let serialized = employee(&serializer);
    assert_eq!(serialized.get("phoneNumber"), &Value::Undefined);
    assert!(serialized.as_object().unwrap().contains_key("phoneNumber"));
    assert!(!serialized.as_object().unwrap().contains_key("email"));
    assert_eq!(messages(&errors).len(), 1);

    let (serializer, errors) = collecting(
        JsonSerializerOptions::default().with_nullish_policy(NullishPolicy {
            undefined: Policy::Disallow,
            null: Policy::Disallow,
        }),
    );
    let json = to_json(&employee(&serializer));
    assert!(json.get("email").is_none());
    assert!(json.get("phoneNumber").is_none());
    assert_eq!(
        messages(&errors)[1..],
        [
            "Disallowed null value detected: email.",
            "Disallowed undefined value detected: phoneNumber.",
        ]
    );
}

#[test]
fn remove_undefined_flag() {
    let policy = NullishPolicy::from(false);
    assert_eq!(policy.undefined, Policy::Allow);
    assert_eq!(policy.null, Policy::Allow);
    assert_eq!(NullishPolicy::from(true), NullishPolicy::default());
}

#[test]
fn additional_properties() {
    let json = json!({ "name": "Zoo", "isOpen": false, "visitors": 120 });

    let (serializer, errors) = collecting(JsonSerializerOptions::default());
    let zoo = serializer.deserialize(&value(json.clone()), "Zoo").unwrap();
    assert_eq!(zoo.get("visitors"), &Value::Undefined);
    assert_eq!(zoo.get("isOpen"), &Value::from(true));
    assert!(messages(&errors).is_empty());

    let (serializer, errors) = collecting(
        JsonSerializerOptions::default().with_additional_properties_policy(Policy::Allow),
    );
    let zoo = serializer.deserialize(&value(json.clone()), "Zoo").unwrap();
    assert_eq!(zoo.get("visitors"), &Value::from(120));
    assert_eq!(zoo.get("isOpen"), &Value::from(false));

    let serialized = to_json(&serializer.serialize(&zoo).unwrap());
    assert_eq!(serialized, json);
    assert!(messages(&errors).is_empty());

    let (serializer, errors) = collecting(
        JsonSerializerOptions::default().with_additional_properties_policy(Policy::Disallow),
    );
    let zoo = serializer.deserialize(&value(json), "Zoo").unwrap();
    assert_eq!(zoo.get("visitors"), &Value::Undefined);
    serializer.serialize(&zoo).unwrap();
    assert_eq!(
        messages(&errors),
        [
            r#"Additional properties detected in {"name":"Zoo","isOpen":false,"visitors":120}: isOpen,visitors."#,
            r#"Additional properties detected in {"isOpen":true,"name":"Zoo"}: isOpen."#,
        ]
    );
}

#[test]
fn global_name_formatter() {
    let (serializer, errors) = collecting(
        JsonSerializerOptions::default().with_format_property_name(|name| format!("_{name}")),
    );
    let json = json!({
        "employeeId": 2,
        "_name": "Mikasa Ackerman",
        "_gender": 0,
        "_birthDate": "1994-04-01T22:00:00.000Z",
        "_email": "mikasa.ackerman@tgzoo.fr"
    });

    let employee = serializer.deserialize(&value(json.clone()), "Employee").unwrap();
    assert_eq!(employee.get("name"), &Value::from("Mikasa Ackerman"));
    assert_eq!(employee.get("id"), &Value::from(2));

    assert_eq!(to_json(&serializer.serialize(&employee).unwrap()), json);
    assert!(messages(&errors).is_empty());
}

// =============================================================================
// Declarations
// =============================================================================

fn ticketing() -> JsonSerializer {
    let mut registry = fixtures::registry();
    registry.register(
        ClassDeclaration::new("Ticket")
            .format_property_names(|name| name.to_uppercase())
            .property("code", TypeRef::String)
            .property_with("price", TypeRef::Number, PropertyOptions::new().default_value(10))
            .property_with("kind", TypeRef::String, "type")
            .constructor_params(vec![Value::from("T-0")])
            .constructor_field(0, "code", TypeRef::String),
    );
    registry.register(
        ClassDeclaration::new("ChildTicket")
            .extends("Ticket")
            .property("age", TypeRef::Number),
    );
    registry.register(
        ClassDeclaration::new("Gate")
            .constructor(|args| {
                Instance::new()
                    .with("number", args.first().cloned().unwrap_or(Value::from(1)))
                    .with("open", true)
            })
            .property("number", TypeRef::Number),
    );
    JsonSerializer::with_options(
        Arc::new(registry),
        JsonSerializerOptions::default()
            .with_error_callback(Some(ErrorCallback::throw())),
    )
}

#[test]
fn class_name_formatter() {
    let serializer = ticketing();
    let ticket = serializer
        .deserialize(
            &value(json!({ "CODE": "T-1", "PRICE": 12, "type": "adult" })),
            "Ticket",
        )
        .unwrap();
    assert_eq!(ticket.get("code"), &Value::from("T-1"));
    assert_eq!(ticket.get("kind"), &Value::from("adult"));

    let child = Instance::of_class("ChildTicket")
        .with("code", "T-2")
        .with("age", 7);
    assert_eq!(
        serializer.serialize(&Value::from(child)).unwrap().render(),
        r#"{"CODE":"T-2","AGE":7}"#
    );
}

#[test]
fn default_values_are_left_out() {
    let serializer = ticketing();
    let ticket = Instance::of_class("Ticket")
        .with("code", "T-1")
        .with("price", 10);
    assert_eq!(
        serializer.serialize(&Value::from(ticket)).unwrap().render(),
        r#"{"CODE":"T-1"}"#
    );

    let ticket = Instance::of_class("Ticket")
        .with("code", "T-1")
        .with("price", 15);
    assert_eq!(
        serializer.serialize(&Value::from(ticket)).unwrap().render(),
        r#"{"CODE":"T-1","PRICE":15}"#
    );
}

#[test]
fn constructors() {
    let serializer = ticketing();

    let ticket = serializer
        .deserialize(&value(json!({ "PRICE": 12 })), "Ticket")
        .unwrap();
    assert_eq!(ticket.get("code"), &Value::from("T-0"));

    let gate = serializer
        .deserialize(&value(json!({ "number": 3 })), "Gate")
        .unwrap();
    assert_eq!(gate.class_name(), Some("Gate"));
    assert_eq!(gate.get("open"), &Value::from(true));
    assert_eq!(gate.get("number"), &Value::from(3));
}

#[test]
fn existing_instance() {
    let serializer = throwing();
    let zoo = serializer
        .registry()
        .instantiate(&TypeRef::class("Zoo"), &[])
        .with("isOpen", false)
        .with("description", "Closed for the winter");

    let zoo = serializer
        .deserialize(&value(json!({ "name": "The Greatest Zoo", "city": null })), zoo)
        .unwrap();
    assert_eq!(zoo.get("name"), &Value::from("The Greatest Zoo"));
    assert_eq!(zoo.get("city"), &Value::Null);
    assert_eq!(zoo.get("isOpen"), &Value::from(false));
    assert_eq!(zoo.get("description"), &Value::from("Closed for the winter"));
}

#[test]
fn arrays_of_instances() {
    let serializer = throwing();
    let json = json!([
        fixtures::employee_json(1, "Bob Razowsky", "bob.razowsky@tgzoo.fr"),
        fixtures::employee_json(2, "Mikasa Ackerman", "mikasa.ackerman@tgzoo.fr")
    ]);

    let employees = serializer.deserialize(&value(json.clone()), "Employee").unwrap();
    let items = employees.as_items().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item.class_name() == Some("Employee")));

    assert_eq!(to_json(&serializer.serialize(&employees).unwrap()), json);
}

// =============================================================================
// Casts
// =============================================================================

#[test]
fn cast_simple_data() {
    let serializer = throwing();

    let created_at = serializer
        .cast_simple_data(
            Some("Date"),
            &Value::from("2018-05-01T12:50:59.534Z"),
            "createdAt".into(),
        )
        .unwrap();
    assert_eq!(
        created_at.as_date().map(date::to_iso_string),
        Some("2018-05-01T12:50:59.534Z".to_owned())
    );

    let error = serializer
        .cast_simple_data(Some("boolean"), &Value::from(4), "isOpen".into())
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "Fail to deserialize: type 'number' is not assignable to type 'boolean' in property 'isOpen'.\nReceived: 4."
    );
}

#[test]
fn wrong_property_types() {
    let (serializer, errors) = collecting(JsonSerializerOptions::default());
    let zoo = serializer
        .deserialize(
            &value(json!({ "name": "Zoo", "id": "fifteen", "Animals": "none" })),
            "Zoo",
        )
        .unwrap();

    assert_eq!(zoo.get("id"), &Value::Undefined);
    assert_eq!(zoo.get("animals"), &Value::Undefined);
    assert_eq!(
        messages(&errors),
        [
            "Fail to deserialize: type 'string' is not assignable to type 'number' in property 'id' of Zoo.\nReceived: \"fifteen\".",
            "Fail to deserialize: type 'string' is not assignable to type 'Array' in property 'animals' of Zoo.\nReceived: \"none\".",
        ]
    );
}
