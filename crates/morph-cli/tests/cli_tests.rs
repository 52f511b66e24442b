use clap::Parser;
use std::fs;
use tempfile::TempDir;

use morph_cli::args::CliArgs;
use morph_cli::commands::{self, EXIT_ERRORS, EXIT_SUCCESS, EXIT_UNMAPPED};

const CONFIG: &str = r#"{
    "classes": {
        "Order": {
            "properties": {
                "reference": { "type": { "builtin": "string" } },
                "placedAt": { "type": { "object": { "class": "DateTime" } } },
                "status": { "type": { "object": { "class": "OrderStatus" } } },
                "customer": { "type": { "object": { "class": "Customer" } } }
            }
        },
        "OrderDto": {
            "properties": {
                "reference": { "type": { "builtin": "string" } },
                "placedAt": { "type": { "builtin": "string" } },
                "status": { "type": { "builtin": "int" } },
                "customer": { "type": { "object": { "class": "CustomerDto" } } }
            }
        },
        "OrderStatus": { "kind": "backedEnum", "backing": "int" },
        "Customer": { "properties": {} },
        "CustomerDto": { "properties": {} }
    },
    "mappings": [
        { "source": "Order", "target": "OrderDto" }
    ]
}"#;

fn write_config(dir: &TempDir, contents: &str) -> String {
    let path = dir.path().join("morph.json");
    fs::write(&path, contents).unwrap();
    path.display().to_string()
}

fn run(args: &[&str]) -> (i32, String) {
    let args = CliArgs::try_parse_from(
        ["morph", "--pretty", "false"].iter().chain(args.iter()),
    )
    .unwrap();
    let mut out = Vec::new();
    let status = commands::run(&args, &mut out).unwrap();
    (status, String::from_utf8(out).unwrap())
}

#[test]
fn test_plan_prints_transformers() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, CONFIG);

    let (status, output) = run(&["plan", "Order", "OrderDto", "--config", &config]);
    assert_eq!(status, EXIT_SUCCESS);
    assert!(output.starts_with("Order -> OrderDto\n"), "{output}");
    assert!(output.contains("placedAt"), "{output}");
    assert!(output.contains("datetime_to_string("), "{output}");
    assert!(output.contains("source_enum"), "{output}");
    assert!(output.contains("customer   no transformer"), "{output}");
}

#[test]
fn test_plan_json_output() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, CONFIG);

    let (status, output) = run(&["plan", "Order", "OrderDto", "--json", "--config", &config]);
    assert_eq!(status, EXIT_SUCCESS);
    let plan: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(plan["metadata"]["source"], "Order");
    assert_eq!(plan["properties"][0]["property"], "reference");
    assert_eq!(plan["properties"][0]["transformer"]["kind"], "builtin");
    assert_eq!(plan["unmapped"][0], "customer");
}

#[test]
fn test_plan_unknown_class_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, CONFIG);
    let args = CliArgs::try_parse_from(["morph", "plan", "Order", "Missing", "--config", &config])
        .unwrap();
    let err = commands::run(&args, &mut Vec::new()).unwrap_err();
    assert!(format!("{err:#}").contains("unknown class \"Missing\""), "{err:#}");
}

#[test]
fn test_plan_populate_refuses_readonly_target() {
    let dir = TempDir::new().unwrap();
    let frozen = CONFIG.replace(
        r#""CustomerDto": { "properties": {} }"#,
        r#""CustomerDto": { "properties": {} },
        "FrozenOrderDto": { "readonly": true, "parents": ["OrderDto"] }"#,
    );
    let config = write_config(&dir, &frozen);

    let (status, _) = run(&["plan", "Order", "FrozenOrderDto", "--config", &config]);
    assert_eq!(status, EXIT_SUCCESS);

    let args = CliArgs::try_parse_from([
        "morph",
        "plan",
        "Order",
        "FrozenOrderDto",
        "--populate",
        "--config",
        &config,
    ])
    .unwrap();
    let err = commands::run(&args, &mut Vec::new()).unwrap_err();
    assert!(format!("{err:#}").contains("read-only target"), "{err:#}");
}

#[test]
fn test_check_statuses() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, CONFIG);

    let (status, output) = run(&["check", "--config", &config]);
    assert_eq!(status, EXIT_SUCCESS);
    assert_eq!(output, "warning Order -> OrderDto: 3 properties, unmapped: customer\n");

    let (status, _) = run(&["check", "--strict", "--config", &config]);
    assert_eq!(status, EXIT_UNMAPPED);

    let broken = CONFIG.replace(
        r#"{ "source": "Order", "target": "OrderDto" }"#,
        r#"{ "source": "Order", "target": "Invoice" }"#,
    );
    let config = write_config(&dir, &broken);
    let (status, output) = run(&["check", "--config", &config]);
    assert_eq!(status, EXIT_ERRORS);
    assert!(output.starts_with("error Order -> Invoice"), "{output}");
}

#[test]
fn test_legacy_without_config() {
    let (status, output) = run(&["legacy", r#"{"union":[{"builtin":"int"},{"builtin":"null"}]}"#]);
    assert_eq!(status, EXIT_SUCCESS);
    assert_eq!(output, "int|null\n  ?int\n");

    let (_, output) = run(&["legacy", r#"{"builtin":"mixed"}"#, "--json"]);
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["type"], "mixed");
    assert!(report["legacy"].is_null());
}

#[test]
fn test_legacy_resolves_enum_kinds_from_config() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, CONFIG);
    let (_, output) = run(&[
        "legacy",
        r#"{"object":{"class":"OrderStatus"}}"#,
        "--json",
        "--config",
        &config,
    ]);
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["legacy"][0]["className"], "OrderStatus");
}

#[test]
fn test_classes_lists_declarations() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, CONFIG);

    let (status, output) = run(&["classes", "--config", &config]);
    assert_eq!(status, EXIT_SUCCESS);
    assert!(output.starts_with("Order (class)\n  reference: string\n"), "{output}");
    assert!(output.contains("OrderStatus (enum: int)"), "{output}");

    let (_, output) = run(&["classes", "--json", "--config", &config]);
    let classes: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(classes[2]["name"], "OrderStatus");
    assert_eq!(classes[2]["kind"], "backedEnum");
}

#[test]
fn test_missing_config_reports_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.json");
    let args = CliArgs::try_parse_from([
        "morph",
        "check",
        "--config",
        missing.to_str().unwrap(),
    ])
    .unwrap();
    let err = commands::run(&args, &mut Vec::new()).unwrap_err();
    assert!(err.to_string().contains(&missing.display().to_string()), "{err}");
}
