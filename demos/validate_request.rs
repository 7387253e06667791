//! Request validation example.
//!
//! Declares a person spec, validates a raw JSON body against it, projects
//! the result onto an output shape that hides the password, and validates
//! a composite request whose parts fail independently.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p request-schema-demos --example validate_request
//! ```

use request_schema_core::{
    CompositePart, FieldSpec, RecordSpec, assemble_composite, omit_fields, project,
    validate_value,
};
use serde_json::json;

fn main() {
    let person = RecordSpec::new("person")
        .with_field(FieldSpec::string("first_name").with_length(1, 50))
        .with_field(FieldSpec::integer("age").gt(17).le(115))
        .with_field(FieldSpec::enumeration("hair_color", &["black", "brown", "red"]).optional())
        .with_field(FieldSpec::email("email"))
        .with_field(FieldSpec::string("password").min_length(8));
    let person_out = omit_fields(&person, "person_out", &["password"]).unwrap();

    // Valid body: optional fields are filled in, the password is dropped on output
    let body = json!({
        "first_name": "Miguel",
        "age": "25",
        "email": "miguel@example.com",
        "password": "supersecret",
    });
    let record = validate_value(&person, &body).unwrap();
    let public = project(&record, &person_out).unwrap();
    println!("Accepted: {}", public.to_json());

    // Invalid body: every problem is reported at once
    let body = json!({
        "first_name": "",
        "age": 16,
        "hair_color": "green",
        "email": "nope",
    });
    match validate_value(&person, &body) {
        Ok(_) => println!("unexpectedly valid"),
        Err(errors) => {
            println!("Rejected with {} error(s):", errors.len());
            for error in errors.iter() {
                println!("  {}: {}", error.field, error.message());
            }
        }
    }

    // Composite request: path parameter plus two embedded body parts
    let path_spec = RecordSpec::new("person_path").with_field(FieldSpec::integer("person_id").gt(0));
    let location = ["city", "state", "country"]
        .into_iter()
        .fold(RecordSpec::new("location"), |spec, name| {
            spec.with_field(FieldSpec::string(name).with_length(1, 35))
        });

    let path_raw = json!({"person_id": "0"});
    let person_raw = json!({
        "first_name": "Miguel",
        "age": 30,
        "email": "miguel@example.com",
        "password": "supersecret",
    });
    let location_raw = json!({"city": "Lima", "state": "Lima"});
    let (Some(path_raw), Some(person_raw), Some(location_raw)) = (
        path_raw.as_object(),
        person_raw.as_object(),
        location_raw.as_object(),
    ) else {
        unreachable!("literals above are objects");
    };

    let parts = [
        CompositePart::new("path", &path_spec, path_raw),
        CompositePart::new("person", &person, person_raw),
        CompositePart::new("location", &location, location_raw),
    ];
    match assemble_composite(&parts).into_result() {
        Ok(_) => println!("Composite accepted"),
        Err(errors) => {
            println!("Composite rejected in {:?}:", errors.part_names());
            for part in errors.iter() {
                for error in part.errors.iter() {
                    println!("  {}.{}: {}", part.part, error.field, error.message());
                }
            }
        }
    }
}
