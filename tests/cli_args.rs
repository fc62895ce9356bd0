//! CLI argument parsing tests
//!
//! These tests pin down the command-line interface of the otcapi binary.

use clap::Parser;
use otcapi::cli::{Cli, Command};

#[test]
fn test_cli_parses_list_subcommand() {
    let cli = Cli::parse_from(["otcapi", "list", "dcs.instance"]);

    assert!(!cli.json);
    match cli.command {
        Command::List(args) => {
            assert_eq!(args.resource, "dcs.instance");
            assert!(args.filters.is_empty());
            assert!(!args.no_paginate);

            let options = args.options();
            assert!(options.paginated);
            assert_eq!(options.limit, None);
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_list_options() {
    let cli = Cli::parse_from([
        "otcapi",
        "list",
        "dcs.backup",
        "-f",
        "begin=20240101000000",
        "--filter",
        "end=20240201000000",
        "-p",
        "instance_id=abc",
        "--limit",
        "25",
        "--no-paginate",
    ]);

    match cli.command {
        Command::List(args) => {
            let options = args.options();
            assert_eq!(
                options.filters.get("begin").map(String::as_str),
                Some("20240101000000")
            );
            assert_eq!(
                options.filters.get("end").map(String::as_str),
                Some("20240201000000")
            );
            assert_eq!(
                options.path_params.get("instance_id").map(String::as_str),
                Some("abc")
            );
            assert_eq!(options.limit, Some(25));
            assert!(!options.paginated);
            assert!(!options.allow_unknown_filters);
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_marker_and_unknown_filters() {
    let cli = Cli::parse_from([
        "otcapi",
        "list",
        "fgs.function",
        "--marker",
        "400",
        "--allow-unknown-filters",
        "-f",
        "runtime=Python3.9",
    ]);

    match cli.command {
        Command::List(args) => {
            let options = args.options();
            assert_eq!(options.marker.as_deref(), Some("400"));
            assert!(options.allow_unknown_filters);
            assert_eq!(
                options.filters.get("runtime").map(String::as_str),
                Some("Python3.9")
            );
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_start_offset() {
    let cli = Cli::parse_from(["otcapi", "list", "rds.instance", "--start", "50", "--limit", "50"]);

    match cli.command {
        Command::List(args) => {
            let options = args.options();
            assert_eq!(options.start, Some(50));
            assert_eq!(options.marker, None);
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_get_subcommand() {
    let cli = Cli::parse_from(["otcapi", "get", "dms.queue", "q-1"]);

    match cli.command {
        Command::Get {
            resource,
            id,
            params,
        } => {
            assert_eq!(resource, "dms.queue");
            assert_eq!(id, "q-1");
            assert!(params.is_empty());
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_delete_with_several_ids() {
    let cli = Cli::parse_from([
        "otcapi",
        "delete",
        "dms.group",
        "g-1",
        "g-2",
        "--param",
        "queue_id=q-1",
    ]);

    match cli.command {
        Command::Delete {
            resource,
            ids,
            params,
        } => {
            assert_eq!(resource, "dms.group");
            assert_eq!(ids, vec!["g-1", "g-2"]);
            let params = otcapi::cli::to_map(&params);
            assert_eq!(params.get("queue_id").map(String::as_str), Some("q-1"));
        }
        _ => panic!("Expected Delete command"),
    }
}

#[test]
fn test_cli_delete_requires_an_id() {
    let result = Cli::try_parse_from(["otcapi", "delete", "dcs.instance"]);
    assert!(result.is_err(), "Delete without ids should be rejected");
}

#[test]
fn test_cli_parses_resources_subcommand() {
    let cli = Cli::parse_from(["otcapi", "resources"]);
    assert!(matches!(cli.command, Command::Resources));
}

#[test]
fn test_cli_json_flag_is_global() {
    let before = Cli::parse_from(["otcapi", "--json", "list", "rds.instance"]);
    assert!(before.json);

    let after = Cli::parse_from(["otcapi", "list", "rds.instance", "--json"]);
    assert!(after.json);
}

#[test]
fn test_cli_rejects_unknown_resource() {
    let result = Cli::try_parse_from(["otcapi", "list", "ecs.server"]);
    assert!(result.is_err(), "Unknown resource kinds should be rejected");
}

#[test]
fn test_cli_rejects_malformed_filter() {
    let result = Cli::try_parse_from(["otcapi", "list", "dcs.instance", "-f", "status"]);
    assert!(result.is_err(), "Filters must be KEY=VALUE");
}

#[test]
fn test_cli_every_catalog_kind_is_accepted() {
    for def in otcapi::models::CATALOG {
        let result = Cli::try_parse_from(["otcapi", "list", def.kind]);
        assert!(result.is_ok(), "{} should be a valid resource", def.kind);
    }
}
