// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use clap::{CommandFactory, Parser};
use serde_json::Value;
use time::macros::date;

use crate::Args;
use crate::commands::{CliError, parse_date, parse_line_item};
use atelier_api::Workspace;

fn parse(argv: &[&str]) -> Args {
    let mut full = vec!["atelier", "--today", "2026-01-02"];
    full.extend_from_slice(argv);
    Args::try_parse_from(full).expect("Failed to parse arguments")
}

fn run(workspace: &Workspace, argv: &[&str]) -> Result<Value, CliError> {
    parse(argv).command.execute(workspace)
}

fn create_test_workspace() -> Workspace {
    parse(&["profile", "show"])
        .workspace()
        .expect("Failed to create workspace")
}

#[test]
fn test_cli_definition_is_valid() {
    Args::command().debug_assert();
}

#[test]
fn test_parse_line_item() {
    let item = parse_line_item("Design:2:500000").unwrap();
    assert_eq!(item.item_name, "Design");
    assert_eq!(item.quantity, 2);
    assert_eq!(item.unit_price, 500_000);

    let item = parse_line_item("Retainer: March:1:-250").unwrap();
    assert_eq!(item.item_name, "Retainer: March");
    assert_eq!(item.unit_price, -250);

    assert!(parse_line_item("Design:2").is_err());
    assert!(parse_line_item("Design:two:100").is_err());
}

#[test]
fn test_parse_date() {
    assert_eq!(parse_date("2026-03-01").unwrap(), date!(2026 - 03 - 01));
    assert!(parse_date("2026-02-30").is_err());
    assert!(parse_date("01/03/2026").is_err());
}

#[test]
fn test_invoice_commands_end_to_end() {
    let workspace = create_test_workspace();
    run(
        &workspace,
        &["profile", "set", "--invoice-format", "GC-INV-{YY}{MM}{DD}-{####}"],
    )
    .unwrap();

    let preview = run(&workspace, &["invoice", "preview"]).unwrap();
    assert_eq!(preview["next"], "GC-INV-260102-0001");

    let created = run(&workspace, &["invoice", "new", "--item", "Design:2:500000"]).unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["number"], "GC-INV-260102-0001");
    assert_eq!(created["total"], 1_000_000);
    assert_eq!(created["status"], "draft");

    run(&workspace, &["invoice", "send", &id]).unwrap();
    let err = run(&workspace, &["invoice", "edit", &id, "--notes", "late"]).unwrap_err();
    assert_eq!(err.kind(), "frozen_entity");

    let shown = run(&workspace, &["invoice", "show", &id]).unwrap();
    assert_eq!(shown["effectiveDueDate"], "2026-02-01");
    assert_eq!(shown["overdue"], false);

    let paid = run(&workspace, &["invoice", "pay", &id]).unwrap();
    assert_eq!(paid["status"], "paid");
}

#[test]
fn test_invoice_list_filters() {
    let workspace = create_test_workspace();
    let client = run(&workspace, &["client", "add", "--name", "Ada Lovelace"]).unwrap();
    let client_id = client["id"].as_str().unwrap().to_string();

    run(
        &workspace,
        &["invoice", "new", "--client", &client_id, "--item", "Design:1:100"],
    )
    .unwrap();
    let other = run(&workspace, &["invoice", "new", "--item", "Design:1:100"]).unwrap();
    run(&workspace, &["invoice", "send", other["id"].as_str().unwrap()]).unwrap();

    let listed = run(&workspace, &["invoice", "list", "--client", &client_id]).unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let listed = run(&workspace, &["invoice", "list", "--status", "sent"]).unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let listed = run(
        &workspace,
        &["invoice", "list", "--client", &client_id, "--status", "sent"],
    )
    .unwrap();
    assert!(listed.as_array().unwrap().is_empty());
}

#[test]
fn test_contract_commands() {
    let workspace = create_test_workspace();
    run(
        &workspace,
        &["profile", "set", "--contract-terms", "Net 14."],
    )
    .unwrap();

    let created = run(
        &workspace,
        &["contract", "new", "--scope", "Logo", "--scope", "Brand guide"],
    )
    .unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["terms"], "Net 14.");
    assert_eq!(created["scope"].as_array().unwrap().len(), 2);
    assert_eq!(created["number"], "CTR-260102-0001");

    run(&workspace, &["contract", "send", &id]).unwrap();
    let reverted = run(&workspace, &["contract", "revert", &id]).unwrap();
    assert_eq!(reverted["status"], "draft");
    assert_eq!(reverted["number"], created["number"]);

    run(&workspace, &["contract", "send", &id]).unwrap();
    let signed = run(&workspace, &["contract", "sign", &id]).unwrap();
    assert_eq!(signed["status"], "signed");

    let err = run(&workspace, &["contract", "rm", &id]).unwrap_err();
    assert_eq!(err.kind(), "domain_rule_violation");
}

#[test]
fn test_show_missing_record() {
    let workspace = create_test_workspace();

    let err = run(&workspace, &["client", "show", "nobody"]).unwrap_err();

    assert!(matches!(err, CliError::Missing { .. }));
    assert_eq!(err.kind(), "not_found");
    assert_eq!(err.to_string(), "Client 'nobody' not found");
}

#[test]
fn test_file_database_persists_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("studio.db");
    let path = path.to_str().unwrap();

    {
        let args = parse(&["--database", path, "invoice", "new", "--item", "Design:1:100"]);
        let workspace = args.workspace().unwrap();
        args.command.execute(&workspace).unwrap();
    }

    let args = parse(&["--database", path, "invoice", "list"]);
    let workspace = args.workspace().unwrap();
    let listed = args.command.execute(&workspace).unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let args = parse(&["--database", path, "invoice", "preview"]);
    let workspace = args.workspace().unwrap();
    let preview = args.command.execute(&workspace).unwrap();
    assert_eq!(preview["next"], "INV-260102-0002");
}
