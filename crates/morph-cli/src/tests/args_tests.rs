use clap::Parser;
use std::path::Path;

use crate::args::{CliArgs, Command, DEFAULT_CONFIG};

#[test]
fn parses_plan_with_defaults() {
    let args = CliArgs::try_parse_from(["morph", "plan", "User", "UserDto"])
        .expect("plan args should parse");

    assert_eq!(
        args.command,
        Command::Plan {
            source: "User".to_string(),
            target: "UserDto".to_string(),
            populate: false,
        }
    );
    assert_eq!(args.config_path(), Path::new(DEFAULT_CONFIG));
    assert!(!args.json);
    assert_eq!(args.pretty, None);
}

#[test]
fn parses_global_flags_after_subcommand() {
    let args = CliArgs::try_parse_from([
        "morph",
        "check",
        "--strict",
        "--config",
        "configs/mapper.json",
        "--json",
        "--pretty",
        "false",
    ])
    .expect("check args should parse");

    assert_eq!(args.command, Command::Check { strict: true });
    assert_eq!(args.config_path(), Path::new("configs/mapper.json"));
    assert!(args.json);
    assert!(!args.color());
}

#[test]
fn parses_legacy_type_argument() {
    let args = CliArgs::try_parse_from(["morph", "legacy", r#"{"builtin":"null"}"#, "--keep-null"])
        .expect("legacy args should parse");

    assert_eq!(
        args.command,
        Command::Legacy {
            ty: r#"{"builtin":"null"}"#.to_string(),
            keep_null: true,
        }
    );
}

#[test]
fn parses_plan_populate_flag() {
    let args = CliArgs::try_parse_from(["morph", "plan", "User", "UserDto", "--populate"])
        .expect("plan args should parse");

    assert!(matches!(args.command, Command::Plan { populate: true, .. }));
}

#[test]
fn rejects_missing_subcommand() {
    assert!(CliArgs::try_parse_from(["morph"]).is_err());
    assert!(CliArgs::try_parse_from(["morph", "plan", "User"]).is_err());
}
