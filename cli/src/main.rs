use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use request_schema_core::{RecordSpec, SpecPackage, check_record_spec, project, validate_value};
use request_schema_db::{ServiceConfig, SpecFileFormat, read_file, write_bundle};
use request_schema_host::api::{Operation, Request, dispatch};
use request_schema_host::decode::{
    UploadedFile, parse_cookies, parse_form, parse_headers, parse_json_body, parse_query,
    path_params,
};
use request_schema_host::{AppContext, ErrorDetail, Source};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Parser)]
#[command(
    name = "schema-check",
    about = "Check, bundle and apply declarative request specs"
)]
struct Cli {
    /// Enable debug logging on stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check spec files for authoring mistakes.
    Check(CheckArgs),
    /// Bundle spec files into one sealed package.
    Bundle(BundleArgs),
    /// Validate JSON record files against a spec.
    Validate(ValidateArgs),
    /// Run one people API operation and print its response.
    Invoke(InvokeArgs),
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Spec files or directories.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct BundleArgs {
    /// Spec files or directories.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Output bundle path (`.json`, `.yaml` or `.yml`).
    #[arg(long)]
    output: PathBuf,
    /// Package name.
    #[arg(long)]
    name: Option<String>,
    /// Package description.
    #[arg(long)]
    description: Option<String>,
}

/// Where specs come from for commands that apply them.
#[derive(Debug, Args)]
struct SpecSourceArgs {
    /// Service configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Spec directory, tried before any configured source.
    #[arg(long)]
    specs: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Spec to validate against.
    #[arg(long)]
    spec: String,
    /// Output spec to project valid records onto.
    #[arg(long)]
    project: Option<String>,
    #[command(flatten)]
    source: SpecSourceArgs,
    /// JSON record files.
    #[arg(required = true)]
    records: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct InvokeArgs {
    /// Operation name, e.g. `create_person`.
    operation: Operation,
    /// Concrete request path, e.g. `/person/detail/3`.
    #[arg(long)]
    path: Option<String>,
    /// Query string, e.g. `name=Rocio&age=25`.
    #[arg(long)]
    query: Option<String>,
    /// JSON body file.
    #[arg(long)]
    body: Option<PathBuf>,
    /// URL-encoded form fields, e.g. `username=ana&password=secret`.
    #[arg(long)]
    form: Option<String>,
    /// Request header line (`Name: value`); repeatable.
    #[arg(long = "header")]
    headers: Vec<String>,
    /// Cookie pair (`name=value`); repeatable.
    #[arg(long = "cookie")]
    cookies: Vec<String>,
    /// Uploaded file as `field=path` or `field=path;type=mime`; repeatable.
    #[arg(long = "file")]
    files: Vec<String>,
    #[command(flatten)]
    source: SpecSourceArgs,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Check(args) => run_check(args),
        Command::Bundle(args) => run_bundle(args),
        Command::Validate(args) => run_validate(args),
        Command::Invoke(args) => run_invoke(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ---------------------------------------------------------------------------
// check / bundle
// ---------------------------------------------------------------------------

fn run_check(args: CheckArgs) -> Result<(), String> {
    let paths = collect_spec_paths(&args.inputs)?;
    let specs = load_checked_specs(&paths)?;
    println!(
        "Checked {} spec file(s) defining {} spec(s).",
        paths.len(),
        specs.len()
    );
    Ok(())
}

fn run_bundle(args: BundleArgs) -> Result<(), String> {
    let paths = collect_spec_paths(&args.inputs)?;
    let specs = load_checked_specs(&paths)?;

    let mut package = SpecPackage::new(PACKAGE_VERSION, chrono::Utc::now().to_rfc3339());
    package.name = args.name;
    package.description = args.description;
    package.specs = specs;

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                format!(
                    "Failed to create output directory '{}': {err}",
                    parent.display()
                )
            })?;
        }
    }

    let package = write_bundle(&args.output, package).map_err(|e| e.to_string())?;
    println!(
        "Bundled {} spec(s) into '{}'.",
        package.spec_count(),
        args.output.display()
    );
    Ok(())
}

/// Expands directories into their spec files. Result is sorted and free of
/// duplicates.
fn collect_spec_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, String> {
    let mut paths = BTreeSet::new();

    for input in inputs {
        if input.is_dir() {
            let entries = fs::read_dir(input)
                .map_err(|err| format!("Failed to read '{}': {err}", input.display()))?;
            for entry in entries {
                let path = entry
                    .map_err(|err| format!("Failed to read '{}': {err}", input.display()))?
                    .path();
                if path.is_file() && SpecFileFormat::from_path(&path).is_some() {
                    paths.insert(path);
                }
            }
            continue;
        }

        if input.is_file() {
            if SpecFileFormat::from_path(input).is_none() {
                return Err(format!(
                    "Spec file '{}' must end in .json, .yaml or .yml",
                    input.display()
                ));
            }
            paths.insert(input.clone());
            continue;
        }

        return Err(format!("Spec path '{}' does not exist", input.display()));
    }

    if paths.is_empty() {
        return Err("No spec files found".to_string());
    }
    Ok(paths.into_iter().collect())
}

/// Loads every file and runs the structural checks. All problems are
/// printed before failing.
fn load_checked_specs(paths: &[PathBuf]) -> Result<Vec<RecordSpec>, String> {
    let mut specs: Vec<RecordSpec> = Vec::with_capacity(paths.len());
    let mut names = BTreeSet::new();
    let mut failed = 0usize;

    for path in paths {
        let problems = match read_file::<RecordSpec>(path) {
            Ok(spec) => {
                let mut problems: Vec<String> =
                    check_record_spec(&spec).iter().map(ToString::to_string).collect();
                if !names.insert(spec.name.clone()) {
                    problems.push(format!("spec '{}' is defined more than once", spec.name));
                }
                if problems.is_empty() {
                    debug!(spec = %spec.name, file = %path.display(), "spec passed checks");
                    specs.push(spec);
                }
                problems
            }
            Err(err) => vec![err.to_string()],
        };

        for problem in &problems {
            eprintln!("{}: {problem}", path.display());
        }
        if !problems.is_empty() {
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(format!("{failed} of {} spec file(s) failed checks", paths.len()));
    }
    Ok(specs)
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

/// One output line of `validate`.
#[derive(Debug, Serialize)]
struct RecordOutcome {
    file: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    detail: Vec<ErrorDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl RecordOutcome {
    fn accepted(file: &Path, record: Value) -> Self {
        Self {
            file: file.display().to_string(),
            valid: true,
            record: Some(record),
            detail: Vec::new(),
            error: None,
        }
    }

    fn rejected(file: &Path, detail: Vec<ErrorDetail>) -> Self {
        Self {
            file: file.display().to_string(),
            valid: false,
            record: None,
            detail,
            error: None,
        }
    }

    fn failed(file: &Path, error: String) -> Self {
        Self {
            file: file.display().to_string(),
            valid: false,
            record: None,
            detail: Vec::new(),
            error: Some(error),
        }
    }
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let ctx = load_context(&args.source)?;
    let spec = ctx.spec(&args.spec).map_err(|e| e.to_string())?;
    let output = args
        .project
        .as_deref()
        .map(|name| ctx.spec(name))
        .transpose()
        .map_err(|e| e.to_string())?;

    let outcomes: Vec<RecordOutcome> = args
        .records
        .par_iter()
        .map(|path| {
            let raw = match fs::read(path) {
                Ok(bytes) => bytes,
                Err(err) => return RecordOutcome::failed(path, format!("read failed: {err}")),
            };
            let value = match parse_json_body(&raw) {
                Ok(value) => value,
                Err(err) => return RecordOutcome::failed(path, err.to_string()),
            };
            let record = match validate_value(spec, &value) {
                Ok(record) => record,
                Err(errors) => {
                    let detail = errors
                        .iter()
                        .map(|e| ErrorDetail::from_field_error(Source::Body, None, e))
                        .collect();
                    return RecordOutcome::rejected(path, detail);
                }
            };
            match output.map(|out| project(&record, out)).transpose() {
                Ok(projected) => {
                    RecordOutcome::accepted(path, projected.unwrap_or(record).to_json())
                }
                Err(err) => RecordOutcome::failed(path, err.to_string()),
            }
        })
        .collect();

    let mut failed = 0usize;
    for outcome in &outcomes {
        let line = serde_json::to_string(outcome)
            .map_err(|err| format!("Failed to serialize result: {err}"))?;
        println!("{line}");
        if !outcome.valid {
            failed += 1;
        }
    }

    info!(
        spec = %args.spec,
        records = outcomes.len(),
        failed,
        "validated records"
    );
    if failed > 0 {
        return Err(format!(
            "{failed} of {} record(s) failed validation",
            outcomes.len()
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// invoke
// ---------------------------------------------------------------------------

fn run_invoke(args: InvokeArgs) -> Result<(), String> {
    let ctx = load_context(&args.source)?;
    let request = build_request(&args)?;

    let response = dispatch(&ctx, args.operation, &request);
    let raw = serde_json::to_string_pretty(&response)
        .map_err(|err| format!("Failed to serialize response: {err}"))?;
    println!("{raw}");

    if !response.is_success() {
        return Err(format!(
            "{} responded with {}",
            args.operation, response.status
        ));
    }
    Ok(())
}

fn build_request(args: &InvokeArgs) -> Result<Request, String> {
    let template = args.operation.path_template();
    let path = match &args.path {
        Some(path) => path_params(template, path).map_err(|e| e.to_string())?,
        None => Default::default(),
    };

    let body = args
        .body
        .as_ref()
        .map(|path| {
            let bytes = fs::read(path)
                .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
            parse_json_body(&bytes).map_err(|e| e.to_string())
        })
        .transpose()?;

    let headers =
        parse_headers(args.headers.iter().map(String::as_str)).map_err(|e| e.to_string())?;
    let files = args
        .files
        .iter()
        .map(String::as_str)
        .map(read_upload)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Request {
        path,
        query: args.query.as_deref().map(parse_query).unwrap_or_default(),
        body,
        form: args
            .form
            .as_deref()
            .map(|form| parse_form(form.as_bytes()))
            .unwrap_or_default(),
        headers,
        cookies: parse_cookies(&args.cookies.join("; ")),
        files,
    })
}

/// Reads a `field=path[;type=mime]` upload argument.
fn read_upload(arg: &str) -> Result<UploadedFile, String> {
    let (field, rest) = arg
        .split_once('=')
        .filter(|(field, _)| !field.is_empty())
        .ok_or_else(|| format!("Invalid --file '{arg}', expected field=path"))?;
    let (path, content_type) = match rest.split_once(";type=") {
        Some((path, mime)) => (path, Some(mime)),
        None => (rest, None),
    };
    let path = Path::new(path);
    let bytes =
        fs::read(path).map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(UploadedFile::new(field, filename, content_type, bytes))
}

// ---------------------------------------------------------------------------
// shared
// ---------------------------------------------------------------------------

fn load_context(source: &SpecSourceArgs) -> Result<AppContext, String> {
    let mut config = match &source.config {
        Some(path) => ServiceConfig::load(path)
            .map_err(|e| format!("Failed to load config '{}': {e}", path.display()))?,
        None => ServiceConfig::default(),
    };
    if let Some(dir) = &source.specs {
        config.specs.dirs.insert(0, dir.clone());
    }
    AppContext::from_config(&config).map_err(|e| e.to_string())
}
