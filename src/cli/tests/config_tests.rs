use clap::Parser;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::args::{CliArgs, EmitKind};
use super::config::{DEFAULT_INPUT, load_config, parse_config, resolve_options};

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

fn args(extra: &[&str]) -> CliArgs {
    let mut argv = vec!["enumstr"];
    argv.extend_from_slice(extra);
    CliArgs::try_parse_from(argv).expect("args should parse")
}

#[test]
fn parses_camel_case_fields() {
    let config = parse_config(
        r#"{
          "types": ["Pill"],
          "trimPrefix": "Pill",
          "lineComment": true,
          "driverAdapter": false,
          "pointerWidth": 32,
          "emit": "plan",
          "typePath": "crate::pill"
        }"#,
    )
    .expect("config should parse");

    assert_eq!(config.types, Some(vec!["Pill".to_string()]));
    assert_eq!(config.trim_prefix.as_deref(), Some("Pill"));
    assert_eq!(config.line_comment, Some(true));
    assert_eq!(config.driver_adapter, Some(false));
    assert_eq!(config.pointer_width, Some(32));
    assert_eq!(config.emit.as_deref(), Some("plan"));
    assert_eq!(config.type_path.as_deref(), Some("crate::pill"));
}

#[test]
fn booleans_accept_string_spellings() {
    let config = parse_config(r#"{"lineComment": "yes", "marshalers": "off", "tests": "TRUE"}"#)
        .expect("string booleans should parse");

    assert_eq!(config.line_comment, Some(true));
    assert_eq!(config.marshalers, Some(false));
    assert_eq!(config.tests, Some(true));
}

#[test]
fn rejects_invalid_boolean_string() {
    let err = parse_config(r#"{"lineComment": "maybe"}"#).expect_err("should reject");

    assert!(format!("{err:#}").contains("invalid boolean value: 'maybe'"));
}

#[test]
fn defaults_without_config() {
    let cwd = Path::new("/work");
    let options = resolve_options(&args(&[]), cwd).expect("defaults should resolve");

    assert!(options.types.is_empty());
    assert_eq!(options.input, cwd.join(DEFAULT_INPUT));
    assert_eq!(options.output, None);
    assert_eq!(options.trim_prefix, "");
    assert!(options.marshalers);
    assert!(options.tests);
    assert!(!options.driver_adapter);
    assert!(!options.line_comment);
    assert_eq!(options.pointer_width, 64);
    assert_eq!(options.emit, EmitKind::Code);
    assert_eq!(options.type_path, "super");

    let settings = options.to_settings();
    assert!(settings.emit_marshalers);
    assert!(settings.emit_tests);
    assert_eq!(settings.pointer_width, 64);
}

#[test]
fn default_output_sits_next_to_input() {
    let cwd = Path::new("/work");
    let options =
        resolve_options(&args(&["--input", "defs/enums.json"]), cwd).expect("should resolve");

    assert_eq!(
        options.output_path("Pill"),
        PathBuf::from("/work/defs/pill_string.rs")
    );
}

#[test]
fn plan_output_uses_json_suffix() {
    let cwd = Path::new("/work");
    let options = resolve_options(&args(&["--emit", "plan"]), cwd).expect("should resolve");

    assert_eq!(
        options.output_path("HTTPStatus"),
        PathBuf::from("/work/httpstatus_plan.json")
    );
}

#[test]
fn cli_values_override_config_file() {
    let temp = TempDir::new().expect("temp dir");
    let config = write_file(
        temp.path(),
        "enumstr.json",
        r#"{
          "types": ["Day"],
          "input": "defs.json",
          "trimPrefix": "Day",
          "lineComment": "true",
          "pointerWidth": 32,
          "emit": "plan"
        }"#,
    );
    let config_arg = config.to_string_lossy().into_owned();

    let from_file = resolve_options(&args(&["--config", &config_arg]), temp.path())
        .expect("config should resolve");
    assert_eq!(from_file.types, vec!["Day"]);
    assert_eq!(from_file.input, temp.path().join("defs.json"));
    assert_eq!(from_file.trim_prefix, "Day");
    assert!(from_file.line_comment);
    assert_eq!(from_file.pointer_width, 32);
    assert_eq!(from_file.emit, EmitKind::Plan);

    let overridden = resolve_options(
        &args(&[
            "--config",
            &config_arg,
            "--type",
            "Pill",
            "--trimprefix",
            "Pill",
            "--pointer-width",
            "64",
            "--emit",
            "code",
        ]),
        temp.path(),
    )
    .expect("overrides should resolve");
    assert_eq!(overridden.types, vec!["Pill"]);
    assert_eq!(overridden.trim_prefix, "Pill");
    assert_eq!(overridden.pointer_width, 64);
    assert_eq!(overridden.emit, EmitKind::Code);
}

#[test]
fn config_paths_are_relative_to_the_config_file() {
    let temp = TempDir::new().expect("temp dir");
    let nested = temp.path().join("conf");
    std::fs::create_dir_all(&nested).expect("mkdir");
    let config = write_file(
        &nested,
        "enumstr.json",
        r#"{"input": "enums.json", "output": "gen/out.rs"}"#,
    );

    let options = resolve_options(
        &args(&["--config", &config.to_string_lossy()]),
        temp.path(),
    )
    .expect("config should resolve");

    assert_eq!(options.input, nested.join("enums.json"));
    assert_eq!(options.output, Some(nested.join("gen/out.rs")));
}

#[test]
fn rejects_bad_pointer_width_in_config() {
    let temp = TempDir::new().expect("temp dir");
    let config = write_file(temp.path(), "enumstr.json", r#"{"pointerWidth": 16}"#);

    let err = resolve_options(&args(&["--config", &config.to_string_lossy()]), temp.path())
        .expect_err("16 is not a pointer width");

    assert!(err.to_string().contains("pointer width must be 32 or 64"));
}

#[test]
fn rejects_unknown_emit_kind_in_config() {
    let temp = TempDir::new().expect("temp dir");
    let config = write_file(temp.path(), "enumstr.json", r#"{"emit": "yaml"}"#);

    let err = resolve_options(&args(&["--config", &config.to_string_lossy()]), temp.path())
        .expect_err("yaml is not an emit kind");

    assert!(err.to_string().contains("unsupported emit kind 'yaml'"));
}

#[test]
fn driver_adapter_requires_marshalers() {
    let err = resolve_options(
        &args(&["--driver-adapter", "--no-marshalers"]),
        Path::new("/work"),
    )
    .expect_err("adapter without marshalers should fail");

    assert!(err.to_string().contains("driver adapter"));
}

#[test]
fn config_can_disable_marshalers_and_tests() {
    let temp = TempDir::new().expect("temp dir");
    let config = write_file(
        temp.path(),
        "enumstr.json",
        r#"{"marshalers": false, "tests": "false"}"#,
    );

    let options = resolve_options(&args(&["--config", &config.to_string_lossy()]), temp.path())
        .expect("config should resolve");

    assert!(!options.marshalers);
    assert!(!options.tests);
}

#[test]
fn load_config_reports_missing_file() {
    let temp = TempDir::new().expect("temp dir");
    let err = load_config(&temp.path().join("missing.json")).expect_err("missing file");

    assert!(err.to_string().contains("failed to read config"));
}
