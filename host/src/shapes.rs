//! Built-in specs of the people API.
//!
//! Every input and output shape the operations in [`crate::api`] use. A
//! service can replace any of them by loading a spec with the same name
//! from a directory or bundle; these are the fallback.

use request_schema_core::{ComposeError, FieldSpec, RecordSpec, SpecPackage, extend_spec, subset_spec};

/// `city`, `state`, `country`.
pub const LOCATION: &str = "location";
/// Shared person fields.
pub const PERSON_BASE: &str = "person_base";
/// Person input: base fields plus `password`.
pub const PERSON: &str = "person";
/// Person output: base fields only.
pub const PERSON_OUT: &str = "person_out";
/// Login response.
pub const LOGIN_OUT: &str = "login_out";
/// Login form.
pub const LOGIN_FORM: &str = "login_form";
/// Contact form fields.
pub const CONTACT_FORM: &str = "contact_form";
/// Contact headers.
pub const CONTACT_HEADERS: &str = "contact_headers";
/// Contact cookies.
pub const CONTACT_COOKIES: &str = "contact_cookies";
/// `name`/`age` query of the person lookup.
pub const PERSON_QUERY: &str = "person_query";
/// `person_id` path parameter.
pub const PERSON_PATH: &str = "person_path";
/// Metadata of an uploaded image.
pub const IMAGE_UPLOAD: &str = "image_upload";

/// Hair colors accepted by `hair_color`.
pub const HAIR_COLORS: [&str; 5] = ["white", "brown", "black", "blonde", "red"];

/// Default `message` of a login response.
pub const LOGIN_MESSAGE: &str = "Login Succesfuly!";

/// Package version of the built-in specs.
pub const BUILTIN_VERSION: &str = "1.0.0";

fn name_field(name: &str, max: usize, example: &str) -> FieldSpec {
    FieldSpec::string(name).with_length(1, max).with_example(example)
}

/// Where a person lives: `city`, `state`, `country`, each 1..=35 chars.
pub fn location() -> RecordSpec {
    RecordSpec::new(LOCATION)
        .with_description("Where a person lives")
        .with_field(name_field("city", 35, "Lima").with_title("City"))
        .with_field(name_field("state", 35, "Lima").with_title("State"))
        .with_field(name_field("country", 35, "Peru").with_title("Country"))
}

/// Fields shared by the person input and output shapes.
pub fn person_base() -> RecordSpec {
    RecordSpec::new(PERSON_BASE)
        .with_field(name_field("first_name", 50, "Miguel").with_title("First name"))
        .with_field(name_field("last_name", 50, "Torres").with_title("Last name"))
        .with_field(FieldSpec::integer("age").gt(17).le(115).with_example(25))
        .with_field(
            FieldSpec::enumeration("hair_color", &HAIR_COLORS)
                .optional()
                .with_example("black"),
        )
        .with_field(FieldSpec::boolean("is_married").optional().with_example(false))
        .with_field(FieldSpec::email("email").with_example("miguel@example.com"))
        .with_field(FieldSpec::url("web_page").optional())
        .with_field(FieldSpec::positive_integer("identity").optional())
}

/// Person input shape.
///
/// # Errors
///
/// Fails only if `person_base` already declared `password`.
pub fn person() -> Result<RecordSpec, ComposeError> {
    extend_spec(
        &person_base(),
        PERSON,
        vec![
            FieldSpec::string("password")
                .min_length(8)
                .with_description("Never echoed back"),
        ],
    )
}

/// Person output shape: the input minus anything outside `person_base`.
///
/// # Errors
///
/// Fails only if `person` lost a base field.
pub fn person_out() -> Result<RecordSpec, ComposeError> {
    let base = person_base();
    subset_spec(&person()?, PERSON_OUT, &base.field_names())
}

/// Login response: `username` (max 20) and a default `message`.
pub fn login_out() -> RecordSpec {
    RecordSpec::new(LOGIN_OUT)
        .with_field(FieldSpec::string("username").max_length(20).with_example("miguel2021"))
        .with_field(FieldSpec::string("message").optional().with_default(LOGIN_MESSAGE))
}

/// Login form: required `username` and `password`.
pub fn login_form() -> RecordSpec {
    RecordSpec::new(LOGIN_FORM)
        .with_field(FieldSpec::string("username"))
        .with_field(FieldSpec::string("password"))
}

/// Contact form fields.
pub fn contact_form() -> RecordSpec {
    RecordSpec::new(CONTACT_FORM)
        .with_field(name_field("first_name", 20, "Miguel"))
        .with_field(name_field("last_name", 20, "Torres"))
        .with_field(FieldSpec::email("email"))
        .with_field(FieldSpec::string("message").min_length(20))
}

/// Contact headers: optional `user_agent`.
pub fn contact_headers() -> RecordSpec {
    RecordSpec::new(CONTACT_HEADERS).with_field(FieldSpec::string("user_agent").optional())
}

/// Contact cookies: optional `ads`.
pub fn contact_cookies() -> RecordSpec {
    RecordSpec::new(CONTACT_COOKIES).with_field(FieldSpec::string("ads").optional())
}

/// Query of the person lookup: optional `name`, required `age` over 17.
pub fn person_query() -> RecordSpec {
    RecordSpec::new(PERSON_QUERY)
        .with_field(
            name_field("name", 50, "Rocio")
                .optional()
                .with_title("Person Name")
                .with_description("This is the person name. It's between 1 and 50 characters"),
        )
        .with_field(
            FieldSpec::integer("age")
                .gt(17)
                .with_title("Person Age")
                .with_description("This is the person age. It's required")
                .with_example(25),
        )
}

/// `person_id` path parameter, greater than 0.
pub fn person_path() -> RecordSpec {
    RecordSpec::new(PERSON_PATH).with_field(
        FieldSpec::integer("person_id")
            .gt(0)
            .with_title("Person Id")
            .with_example(3),
    )
}

/// Metadata of the uploaded `image`: file name, content type and size.
pub fn image_upload() -> RecordSpec {
    RecordSpec::new(IMAGE_UPLOAD)
        .with_field(FieldSpec::string("filename").with_length(1, 255))
        .with_field(FieldSpec::string("content_type").optional())
        .with_field(FieldSpec::integer("size").ge(0))
}

/// Every built-in spec in one package.
///
/// # Errors
///
/// Returns the [`ComposeError`] of a broken derived shape.
///
/// # Examples
///
/// ```
/// use request_schema_host::shapes::{PERSON, PERSON_OUT, builtin_package};
///
/// let package = builtin_package().unwrap();
/// assert_eq!(package.spec_count(), 12);
/// assert!(package.get(PERSON).unwrap().contains("password"));
/// assert!(!package.get(PERSON_OUT).unwrap().contains("password"));
/// ```
pub fn builtin_package() -> Result<SpecPackage, ComposeError> {
    let mut package = SpecPackage::new(BUILTIN_VERSION, "1970-01-01T00:00:00Z");
    package.name = Some("builtin".to_string());
    package.description = Some("Built-in people API specs".to_string());
    package.specs = vec![
        location(),
        person_base(),
        person()?,
        person_out()?,
        login_out(),
        login_form(),
        contact_form(),
        contact_headers(),
        contact_cookies(),
        person_query(),
        person_path(),
        image_upload(),
    ];
    Ok(package)
}

#[cfg(test)]
mod tests {
    use request_schema_core::{check_package, is_subset_of};

    use super::*;

    #[test]
    fn test_builtin_package_passes_checks() {
        let package = builtin_package().unwrap();
        assert!(check_package(&package).is_empty());
    }

    #[test]
    fn test_person_out_matches_base_fields() {
        let out = person_out().unwrap();
        assert_eq!(out.field_names(), person_base().field_names());
        assert!(is_subset_of(&out, &person().unwrap()));
        assert!(!out.contains("password"));
    }

    #[test]
    fn test_person_base_optional_fields() {
        let base = person_base();
        let optional: Vec<&str> = base
            .fields
            .iter()
            .filter(|f| !f.required)
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(optional, vec!["hair_color", "is_married", "web_page", "identity"]);
    }

    #[test]
    fn test_small_shapes_bounds() {
        let field = |spec: &RecordSpec, name: &str| {
            spec.fields.iter().find(|f| f.name == name).cloned().unwrap()
        };

        assert_eq!(field(&login_out(), "username").bounds.max_length, Some(20));
        assert!(!field(&login_out(), "message").required);
        assert_eq!(field(&person_path(), "person_id").bounds.gt, Some(0));
        assert_eq!(field(&person_query(), "age").bounds.gt, Some(17));
        assert_eq!(field(&location(), "country").bounds.max_length, Some(35));
        assert!(!field(&contact_headers(), "user_agent").required);
        assert_eq!(image_upload().field_names(), vec!["filename", "content_type", "size"]);
    }
}
