//! People API example.
//!
//! Builds an `AppContext` from the built-in specs and runs every operation
//! once, printing the status and body each one responds with.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p request-schema-demos --example people_api
//! ```

use request_schema_host::AppContext;
use request_schema_host::api::{Operation, Request, dispatch};
use request_schema_host::decode::{
    UploadedFile, parse_cookies, parse_form, parse_headers, path_params, split_target,
};
use serde_json::json;

fn main() {
    let ctx = AppContext::builtin().unwrap();

    let person = json!({
        "first_name": "Miguel",
        "last_name": "Torres",
        "age": 25,
        "hair_color": "black",
        "email": "miguel@example.com",
        "password": "supersecret",
    });

    for operation in Operation::ALL {
        let request = sample_request(operation, &person);
        let response = dispatch(&ctx, operation, &request);
        println!(
            "{} {} -> {}",
            operation.method(),
            operation.path_template(),
            response.status
        );
        println!("  {}", response.body);
    }
}

fn sample_request(operation: Operation, person: &serde_json::Value) -> Request {
    match operation {
        Operation::Home => Request::default(),
        Operation::CreatePerson => Request {
            body: Some(person.clone()),
            ..Default::default()
        },
        Operation::ShowPersonQuery => {
            let (_, query) = split_target("/person/detail?name=Rocio&age=15").unwrap();
            Request {
                query,
                ..Default::default()
            }
        }
        Operation::ShowPersonById => Request {
            path: path_params(operation.path_template(), "/person/detail/3").unwrap(),
            ..Default::default()
        },
        Operation::UpdatePerson => Request {
            path: path_params(operation.path_template(), "/person/7").unwrap(),
            body: Some(json!({
                "person": person,
                "location": {"city": "Lima", "state": "Lima"},
            })),
            ..Default::default()
        },
        Operation::Login => Request {
            form: parse_form(b"username=miguel&password=secret"),
            ..Default::default()
        },
        Operation::Contact => Request {
            form: parse_form(
                b"first_name=Ana&last_name=Diaz&email=ana%40example.com&message=Hello+there%2C+long+enough+now",
            ),
            headers: parse_headers(["User-Agent: people-api-example"]).unwrap(),
            cookies: parse_cookies("ads=off"),
            ..Default::default()
        },
        Operation::PostImage => Request {
            files: vec![UploadedFile::new("image", "cat.jpg", Some("image/jpeg"), vec![0; 1536])],
            ..Default::default()
        },
    }
}
