//! Spec database loading example.
//!
//! Writes a few spec files (JSON and YAML) to a temporary directory, loads
//! them with `SpecDatabase`, seals them into a bundle and shows the builder
//! fallback chain.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p request-schema-demos --example load_spec_dir
//! ```

use request_schema_core::{FieldSpec, RecordSpec};
use request_schema_db::{SpecDatabase, write_bundle, write_file};

fn main() {
    let dir = std::env::temp_dir().join("request_schema_example_db");
    std::fs::create_dir_all(&dir).unwrap();

    let location = ["city", "state", "country"]
        .into_iter()
        .fold(RecordSpec::new("location"), |spec, name| {
            spec.with_field(FieldSpec::string(name).with_length(1, 35))
        });
    let login = RecordSpec::new("login_form")
        .with_field(FieldSpec::string("username"))
        .with_field(FieldSpec::string("password"));

    write_file(&dir.join("location.json"), &location).unwrap();
    write_file(&dir.join("login_form.yaml"), &login).unwrap();

    // Load every spec file in the directory
    let start = std::time::Instant::now();
    let db = SpecDatabase::from_dir(&dir).unwrap();
    println!("Loaded {} specs in {:.2?}", db.len(), start.elapsed());
    for name in db.names() {
        let spec = db.get(name).unwrap();
        println!("  {name}: {:?}", spec.field_names());
    }

    // Seal into a bundle
    let bundle_path = dir.join("bundle.json");
    let package = write_bundle(&bundle_path, db.to_package("1.0.0", "2026-01-01T00:00:00Z")).unwrap();
    println!();
    println!(
        "Bundle hash: {}",
        package.bundle_hash.as_deref().unwrap_or("<none>")
    );

    // Builder pattern with fallback chain
    println!();
    println!("Builder pattern with fallback:");
    let db = SpecDatabase::builder()
        .from_dir("/nonexistent/specs") // Missing, skipped
        .from_bundle(&bundle_path) // Loads
        .build()
        .unwrap();
    println!("  Loaded {} specs from {:?}", db.len(), db.source());

    std::fs::remove_dir_all(&dir).ok();
}
