use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

/// Helper to create a temp directory that is cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path =
            std::env::temp_dir().join(format!("envdoc_cli_test_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("failed to create temp dir");
        Self { path }
    }

    fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

const SIMPLE_TABLE: &str = "\
| Name | Description | Type  | Example | Default |
| ---- | ----------- | ----- | ------- | ------- |
| A    |             | str   |         | -       |
| B    |             | int   | 1       | 1       |
| C    | c           | list  | 1,2,3   | None    |
| D    | abc         | tuple | 1,2     | (1, 2)  |
";

/// The four-field settings schema as a YAML document.
fn write_simple_yaml(dir: &TempDir) -> PathBuf {
    let yaml = r#"root: SimpleSettings
schemas:
  - name: SimpleSettings
    fields:
      - name: a
        type: str
        required: true
      - name: b
        type: int
        default: 1
      - name: c
        type: list
        default: null
        description: c
        example: [1, 2, 3]
      - name: d
        type: tuple
        default: [1, 2]
        description: abc
"#;
    let path = dir.join("settings.yaml");
    fs::write(&path, yaml).expect("failed to write schema");
    path
}

fn write_json(dir: &TempDir, name: &str, document: &serde_json::Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(document).unwrap())
        .expect("failed to write schema");
    path
}

fn envdoc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_envdoc"))
        .args(args)
        .output()
        .expect("failed to run envdoc")
}

// ---------------------------------------------------------------------------
// Generate tests
// ---------------------------------------------------------------------------

#[test]
fn generate_prints_markdown_table() {
    let dir = TempDir::new("generate_markdown");
    let schema = write_simple_yaml(&dir);

    let out = envdoc(&["generate", schema.to_str().unwrap()]);

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(String::from_utf8_lossy(&out.stdout), SIMPLE_TABLE);
}

#[test]
fn generate_applies_prefix_flag() {
    let dir = TempDir::new("generate_prefix");
    let schema = write_simple_yaml(&dir);

    let out = envdoc(&["generate", schema.to_str().unwrap(), "--prefix", "app_"]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let names: Vec<&str> = stdout
        .lines()
        .skip(2)
        .filter_map(|line| line.split('|').nth(1))
        .map(str::trim)
        .collect();
    assert_eq!(names, vec!["APP_A", "APP_B", "APP_C", "APP_D"]);
}

#[test]
fn generate_writes_json_rows() {
    let dir = TempDir::new("generate_json");
    let schema = write_simple_yaml(&dir);

    let out = envdoc(&["generate", schema.to_str().unwrap(), "--format", "json"]);

    assert!(out.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid JSON");
    let rows = rows.as_array().expect("array of rows");
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["name"], "A");
    assert_eq!(rows[0]["default"], "-");
    assert_eq!(rows[2]["type"], "list");
    assert_eq!(rows[2]["example"], serde_json::json!(["1", "2", "3"]));
}

#[test]
fn generate_writes_output_file() {
    let dir = TempDir::new("generate_output");
    let schema = write_simple_yaml(&dir);
    let target = dir.join("docs/env.md");

    let out = envdoc(&[
        "generate",
        schema.to_str().unwrap(),
        "--output",
        target.to_str().unwrap(),
    ]);

    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    assert_eq!(fs::read_to_string(&target).unwrap(), SIMPLE_TABLE);
}

#[test]
fn generate_flattens_nested_json_schema() {
    let dir = TempDir::new("generate_nested");
    let schema = write_json(
        &dir,
        "nested.json",
        &serde_json::json!({
            "root": "Settings",
            "naming": { "env_prefix": "app_", "nested_delimiter": "__" },
            "schemas": [
                { "name": "Settings", "fields": [
                    { "name": "debug", "type": "bool", "default": false },
                    { "name": "db", "nested": "Database" },
                    { "name": "token", "type": "str", "required": true, "env": ["api_token", "token"] }
                ]},
                { "name": "Database", "fields": [
                    { "name": "url", "type": "str", "required": true, "description": "Connection URL" }
                ]}
            ]
        }),
    );

    let out = envdoc(&["generate", schema.to_str().unwrap(), "--format", "json"]);

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let rows: Vec<serde_json::Value> = serde_json::from_slice(&out.stdout).unwrap();
    let names: Vec<&str> = rows.iter().map(|row| row["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec!["APP_DEBUG", "APP_DB__URL", "Any of APP_API_TOKEN; APP_TOKEN"]
    );
    assert_eq!(rows[0]["example"], "false");
    assert_eq!(rows[1]["description"], "Connection URL");
    assert_eq!(rows[1]["default"], "-");
}

#[test]
fn generate_no_merge_emits_row_per_alias() {
    let dir = TempDir::new("generate_no_merge");
    let schema = write_json(
        &dir,
        "aliases.json",
        &serde_json::json!({
            "root": "S",
            "schemas": [{ "name": "S", "fields": [
                { "name": "token", "type": "str", "env": ["api_token", "token"] }
            ]}]
        }),
    );

    let out = envdoc(&[
        "generate",
        schema.to_str().unwrap(),
        "--no-merge",
        "--format",
        "json",
    ]);

    assert!(out.status.success());
    let rows: Vec<serde_json::Value> = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "API_TOKEN");
    assert_eq!(rows[1]["name"], "TOKEN");
}

#[test]
fn generate_fails_on_schema_cycle() {
    let dir = TempDir::new("generate_cycle");
    let schema = write_json(
        &dir,
        "cycle.json",
        &serde_json::json!({
            "root": "A",
            "schemas": [
                { "name": "A", "fields": [{ "name": "b", "nested": "B" }] },
                { "name": "B", "fields": [{ "name": "a", "nested": "A" }] }
            ]
        }),
    );

    let out = envdoc(&["generate", schema.to_str().unwrap()]);

    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("A -> B -> A"), "stderr: {stderr}");
}

#[test]
fn generate_fails_on_missing_file() {
    let dir = TempDir::new("generate_missing");
    let missing = dir.join("nope.yaml");

    let out = envdoc(&["generate", missing.to_str().unwrap()]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("error: Failed to read"), "stderr: {stderr}");
}

#[test]
fn generate_infers_format_from_output_extension() {
    let dir = TempDir::new("generate_infer_format");
    let schema = write_simple_yaml(&dir);
    let target = dir.join("env.json");

    let out = envdoc(&[
        "generate",
        schema.to_str().unwrap(),
        "--output",
        target.to_str().unwrap(),
    ]);

    assert!(out.status.success());
    let rows: Vec<serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(rows[3]["default"], "(1, 2)");
}

// ---------------------------------------------------------------------------
// Validate tests
// ---------------------------------------------------------------------------

#[test]
fn validate_reports_field_count() {
    let dir = TempDir::new("validate_ok");
    let schema = write_simple_yaml(&dir);

    let out = envdoc(&["validate", schema.to_str().unwrap()]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("Validated 1 schema document(s) with 4 field(s)."),
        "stdout: {stdout}"
    );
}

#[test]
fn validate_rejects_duplicate_fields() {
    let dir = TempDir::new("validate_duplicate");
    let schema = write_json(
        &dir,
        "dup.json",
        &serde_json::json!({
            "root": "S",
            "schemas": [{ "name": "S", "fields": [
                { "name": "port", "type": "int" },
                { "name": "port", "type": "str" }
            ]}]
        }),
    );

    let out = envdoc(&["validate", schema.to_str().unwrap()]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("duplicate field"), "stderr: {stderr}");
}
