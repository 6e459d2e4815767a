// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use shellbook_app::{CommandId, CommandStatus, LintIssue, LintLevel, LintStatus};
use shellbook_db::{NewCommand, Store, UpdateCommand, validate_db_path};
use shellbook_testkit::temp_db_path;
use std::fs;

fn new_command(title: &str, script: &str) -> NewCommand {
    NewCommand {
        title: title.to_owned(),
        description: String::new(),
        script: script.to_owned(),
        status: CommandStatus::Saved,
    }
}

#[test]
fn validate_db_path_rejects_uri_forms() {
    assert!(validate_db_path("file:test.db").is_err());
    assert!(validate_db_path("https://example.com/db.sqlite").is_err());
    assert!(validate_db_path("db.sqlite?mode=ro").is_err());
    assert!(validate_db_path("").is_err());
    assert!(validate_db_path(":memory:").is_ok());
    assert!(validate_db_path("/tmp/shellbook.db").is_ok());
}

#[test]
fn bootstrap_is_idempotent_and_persists() -> Result<()> {
    let (_dir, path) = temp_db_path()?;
    {
        let store = Store::open(&path)?;
        store.bootstrap()?;
        store.create_command(&new_command("ports", "ss -tulpn"))?;
    }
    let store = Store::open(&path)?;
    store.bootstrap()?;
    let commands = store.list_commands()?;
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].script, "ss -tulpn");
    Ok(())
}

#[test]
fn bootstrap_rejects_schema_missing_required_column() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    store.raw_connection().execute_batch(
        "
        DROP TABLE commands;
        CREATE TABLE commands (
          id INTEGER PRIMARY KEY,
          title TEXT NOT NULL,
          script TEXT NOT NULL,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL
        );
        ",
    )?;

    let err = store
        .bootstrap()
        .expect_err("schema validation should fail");
    let message = err.to_string();
    assert!(message.contains("table `commands` is missing required columns"));
    assert!(message.contains("lint_status"));
    Ok(())
}

#[test]
fn create_defaults_title_and_rejects_blank_scripts() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    let id = store.create_command(&new_command("  ", "git status --short"))?;
    let command = store.get_command(id)?;
    assert_eq!(command.title, "git status --short");
    assert_eq!(command.lint_status, LintStatus::Unchecked);
    assert!(command.lint_issues.is_empty());
    assert_eq!(command.elapsed_ms, None);

    assert!(store.create_command(&new_command("empty", "   ")).is_err());
    Ok(())
}

#[test]
fn list_orders_by_updated_at_with_id_tiebreak() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    let first = store.create_command(&new_command("a", "echo a"))?;
    let second = store.create_command(&new_command("b", "echo b"))?;
    let third = store.create_command(&new_command("c", "echo c"))?;
    store.raw_connection().execute_batch(
        "UPDATE commands SET updated_at = '2026-01-01T00:00:00Z';
         UPDATE commands SET updated_at = '2026-02-01T00:00:00Z' WHERE id = 1;",
    )?;

    let ids = store
        .list_commands()?
        .iter()
        .map(|command| command.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![first, third, second]);
    Ok(())
}

#[test]
fn update_and_status_changes_round_trip() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    let id = store.create_command(&new_command("old", "echo old"))?;

    store.update_command(
        id,
        &UpdateCommand {
            title: "new".to_owned(),
            description: "renamed".to_owned(),
            script: "echo new".to_owned(),
        },
    )?;
    let archived = store.set_status(id, CommandStatus::Archived)?;
    assert_eq!(archived.title, "new");
    assert_eq!(archived.description, "renamed");
    assert_eq!(archived.status, CommandStatus::Archived);

    let missing = CommandId::new(99);
    assert!(store.set_status(missing, CommandStatus::Saved).is_err());
    assert!(store.get_command(missing).is_err());
    Ok(())
}

#[test]
fn lint_results_and_elapsed_time_are_recorded() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    let id = store.create_command(&new_command("glob", "rm $files"))?;

    let issues = vec![LintIssue {
        line: 1,
        column: 4,
        level: LintLevel::Warning,
        code: 2086,
        message: "Double quote to prevent globbing and word splitting.".to_owned(),
    }];
    let linted = store.record_lint(id, &issues)?;
    assert_eq!(linted.lint_status, LintStatus::Warnings);
    assert_eq!(linted.lint_issues, issues);

    store.record_elapsed(id, 1_250)?;
    assert_eq!(store.get_command(id)?.elapsed_ms, Some(1_250));
    assert!(store.record_elapsed(id, -1).is_err());
    Ok(())
}

#[test]
fn delete_reports_only_existing_rows() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    let kept = store.create_command(&new_command("keep", "echo keep"))?;
    let gone = store.create_command(&new_command("drop", "echo drop"))?;

    let deleted = store.delete_commands(&[gone, CommandId::new(42)])?;
    assert_eq!(deleted, vec![gone]);
    let remaining = store
        .list_commands()?
        .iter()
        .map(|command| command.id)
        .collect::<Vec<_>>();
    assert_eq!(remaining, vec![kept]);
    Ok(())
}

#[test]
fn history_import_skips_known_scripts() -> Result<()> {
    let (dir, db_path) = temp_db_path()?;
    let store = Store::open(&db_path)?;
    store.bootstrap()?;
    store.create_command(&new_command("status", "git status"))?;

    let history = dir.path().join("bash_history");
    fs::write(
        &history,
        "#1700000000\ngit status\nls -la\n\n#1700000001\nls -la\ncargo fmt\n",
    )?;

    let imported = store.import_history_file(&history)?;
    let scripts = imported
        .iter()
        .map(|command| command.script.as_str())
        .collect::<Vec<_>>();
    assert_eq!(scripts, vec!["ls -la", "cargo fmt"]);
    assert!(
        imported
            .iter()
            .all(|command| command.status == CommandStatus::Imported)
    );

    assert!(store.import_history_file(&history)?.is_empty());
    assert_eq!(store.list_commands()?.len(), 3);
    Ok(())
}

#[test]
fn missing_history_file_is_an_error() -> Result<()> {
    let (dir, db_path) = temp_db_path()?;
    let store = Store::open(&db_path)?;
    store.bootstrap()?;
    let err = store
        .import_history_file(&dir.path().join("nope"))
        .expect_err("missing file should fail");
    assert!(err.to_string().contains("read history file"));
    Ok(())
}

#[test]
fn demo_data_seeds_every_status() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    store.seed_demo_data()?;
    let commands = store.list_commands()?;
    for status in CommandStatus::ALL {
        assert!(
            commands.iter().any(|command| command.status == status),
            "expected a {} demo command",
            status.as_str()
        );
    }
    Ok(())
}
