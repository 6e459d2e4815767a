// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use log::debug;
use rusqlite::{Connection, OptionalExtension, Row, params};
use shellbook_app::{
    Command, CommandId, CommandStatus, LintIssue, LintStatus, parse_history, title_for_script,
};
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

pub const APP_NAME: &str = "shellbook";

const COMMAND_COLUMNS: &str = "id, title, description, script, status, lint_status, lint_issues, elapsed_ms, created_at, updated_at";

const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[(
    "commands",
    &[
        "id",
        "title",
        "description",
        "script",
        "status",
        "lint_status",
        "lint_issues",
        "elapsed_ms",
        "created_at",
        "updated_at",
    ],
)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RequiredIndex {
    name: &'static str,
    create_sql: &'static str,
}

const REQUIRED_INDEXES: &[RequiredIndex] = &[
    RequiredIndex {
        name: "idx_commands_status",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_commands_status ON commands (status);",
    },
    RequiredIndex {
        name: "idx_commands_updated_at",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_commands_updated_at ON commands (updated_at);",
    },
    RequiredIndex {
        name: "idx_commands_script",
        create_sql: "CREATE UNIQUE INDEX IF NOT EXISTS idx_commands_script ON commands (script);",
    },
];

const DEMO_COMMANDS: &[(&str, &str, CommandStatus)] = &[
    (
        "List listening ports",
        "ss -tulpn | grep LISTEN",
        CommandStatus::Saved,
    ),
    (
        "Disk usage by directory",
        "du -h --max-depth=1 . | sort -h",
        CommandStatus::Saved,
    ),
    (
        "Find large files",
        "find . -type f -size +100M -exec ls -lh {} \\;",
        CommandStatus::Saved,
    ),
    (
        "Tail system journal",
        "journalctl -f -n 200",
        CommandStatus::Imported,
    ),
    (
        "Prune docker images",
        "docker image prune -a --filter \"until=168h\"",
        CommandStatus::Imported,
    ),
    (
        "Count lines of rust",
        "find . -name '*.rs' | xargs wc -l | tail -1",
        CommandStatus::Imported,
    ),
    (
        "Show git branches by date",
        "git for-each-ref --sort=-committerdate refs/heads/ --format='%(refname:short)'",
        CommandStatus::Saved,
    ),
    (
        "Old backup rsync",
        "rsync -avz --delete ~/docs/ backup:/srv/docs/",
        CommandStatus::Archived,
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCommand {
    pub title: String,
    pub description: String,
    pub script: String,
    pub status: CommandStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCommand {
    pub title: String,
    pub description: String,
    pub script: String,
}

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let printable = path.to_string_lossy().to_string();
        validate_db_path(&printable)?;
        let conn = Connection::open(path)
            .with_context(|| format!("open database at {}", path.display()))?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory database")?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    pub fn raw_connection(&self) -> &Connection {
        &self.conn
    }

    pub fn bootstrap(&self) -> Result<()> {
        if has_user_tables(&self.conn)? {
            validate_schema(&self.conn)?;
        } else {
            self.conn
                .execute_batch(include_str!("sql/schema.sql"))
                .context("create schema")?;
        }

        ensure_required_indexes(&self.conn)
    }

    pub fn list_commands(&self) -> Result<Vec<Command>> {
        let sql = format!("SELECT {COMMAND_COLUMNS} FROM commands ORDER BY updated_at DESC, id DESC");
        let mut stmt = self.conn.prepare(&sql).context("prepare commands query")?;
        let rows = stmt
            .query_map([], command_from_row)
            .context("query commands")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect commands")
    }

    pub fn get_command(&self, command_id: CommandId) -> Result<Command> {
        self.find_command(command_id)?
            .ok_or_else(|| anyhow!("command {command_id} not found"))
    }

    pub fn find_command(&self, command_id: CommandId) -> Result<Option<Command>> {
        let sql = format!("SELECT {COMMAND_COLUMNS} FROM commands WHERE id = ?");
        self.conn
            .query_row(&sql, params![command_id.get()], command_from_row)
            .optional()
            .with_context(|| format!("load command {command_id}"))
    }

    pub fn create_command(&self, new_command: &NewCommand) -> Result<CommandId> {
        if new_command.script.trim().is_empty() {
            bail!("command script is required");
        }
        let title = if new_command.title.trim().is_empty() {
            title_for_script(&new_command.script)
        } else {
            new_command.title.trim().to_owned()
        };
        let now = now_rfc3339()?;
        self.conn
            .execute(
                "
                INSERT INTO commands (title, description, script, status, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?)
                ",
                params![
                    title,
                    new_command.description,
                    new_command.script,
                    new_command.status.as_str(),
                    now,
                    now,
                ],
            )
            .with_context(|| format!("insert command {title:?}"))?;
        Ok(CommandId::new(self.conn.last_insert_rowid()))
    }

    pub fn update_command(&self, command_id: CommandId, update: &UpdateCommand) -> Result<()> {
        if update.script.trim().is_empty() {
            bail!("command script is required");
        }
        let changed = self
            .conn
            .execute(
                "
                UPDATE commands
                SET title = ?, description = ?, script = ?, updated_at = ?
                WHERE id = ?
                ",
                params![
                    update.title,
                    update.description,
                    update.script,
                    now_rfc3339()?,
                    command_id.get(),
                ],
            )
            .with_context(|| format!("update command {command_id}"))?;
        if changed == 0 {
            bail!("command {command_id} not found");
        }
        Ok(())
    }

    pub fn set_status(&self, command_id: CommandId, status: CommandStatus) -> Result<Command> {
        let changed = self
            .conn
            .execute(
                "UPDATE commands SET status = ?, updated_at = ? WHERE id = ?",
                params![status.as_str(), now_rfc3339()?, command_id.get()],
            )
            .with_context(|| format!("set status of command {command_id}"))?;
        if changed == 0 {
            bail!("command {command_id} not found");
        }
        self.get_command(command_id)
    }

    pub fn record_lint(&self, command_id: CommandId, issues: &[LintIssue]) -> Result<Command> {
        let encoded = serde_json::to_string(issues).context("encode lint issues")?;
        let status = LintStatus::from_issues(issues);
        let changed = self
            .conn
            .execute(
                "
                UPDATE commands
                SET lint_status = ?, lint_issues = ?, updated_at = ?
                WHERE id = ?
                ",
                params![status.as_str(), encoded, now_rfc3339()?, command_id.get()],
            )
            .with_context(|| format!("record lint result for command {command_id}"))?;
        if changed == 0 {
            bail!("command {command_id} not found");
        }
        self.get_command(command_id)
    }

    pub fn record_elapsed(&self, command_id: CommandId, elapsed_ms: i64) -> Result<()> {
        if elapsed_ms < 0 {
            bail!("elapsed time must be non-negative, got {elapsed_ms}");
        }
        self.conn
            .execute(
                "UPDATE commands SET elapsed_ms = ? WHERE id = ?",
                params![elapsed_ms, command_id.get()],
            )
            .with_context(|| format!("record elapsed time for command {command_id}"))?;
        Ok(())
    }

    /// Deletes the given commands and returns the ids that actually existed.
    pub fn delete_commands(&self, command_ids: &[CommandId]) -> Result<Vec<CommandId>> {
        let mut deleted = Vec::new();
        for command_id in command_ids {
            let changed = self
                .conn
                .execute(
                    "DELETE FROM commands WHERE id = ?",
                    params![command_id.get()],
                )
                .with_context(|| format!("delete command {command_id}"))?;
            if changed > 0 {
                deleted.push(*command_id);
            }
        }
        debug!("deleted {} of {} commands", deleted.len(), command_ids.len());
        Ok(deleted)
    }

    /// Inserts every script not already stored as an imported command.
    pub fn import_scripts(&self, scripts: &[String]) -> Result<Vec<Command>> {
        let mut existing = self.known_scripts()?;
        let mut imported = Vec::new();
        for script in scripts {
            if !existing.insert(script.clone()) {
                continue;
            }
            let id = self.create_command(&NewCommand {
                title: title_for_script(script),
                description: String::new(),
                script: script.clone(),
                status: CommandStatus::Imported,
            })?;
            imported.push(self.get_command(id)?);
        }
        debug!("imported {} new commands", imported.len());
        Ok(imported)
    }

    pub fn import_history_file(&self, path: &Path) -> Result<Vec<Command>> {
        let raw = fs::read(path).with_context(|| format!("read history file {}", path.display()))?;
        let text = String::from_utf8_lossy(&raw);
        self.import_scripts(&parse_history(&text))
    }

    pub fn seed_demo_data(&self) -> Result<()> {
        for (title, script, status) in DEMO_COMMANDS {
            self.create_command(&NewCommand {
                title: (*title).to_owned(),
                description: String::new(),
                script: (*script).to_owned(),
                status: *status,
            })
            .with_context(|| format!("seed demo command {title:?}"))?;
        }
        Ok(())
    }

    fn known_scripts(&self) -> Result<BTreeSet<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT script FROM commands")
            .context("prepare scripts query")?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .context("query scripts")?;
        rows.collect::<rusqlite::Result<BTreeSet<_>>>()
            .context("collect scripts")
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    if let Some(override_path) = env::var_os("SHELLBOOK_DB_PATH") {
        return Ok(PathBuf::from(override_path));
    }

    let app_dir = data_dir()?;
    Ok(app_dir.join("shellbook.db"))
}

pub fn data_dir() -> Result<PathBuf> {
    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set SHELLBOOK_DB_PATH to a writable database path")
    })?;

    let app_dir = data_root.join(APP_NAME);
    fs::create_dir_all(&app_dir)
        .with_context(|| format!("create data directory {}", app_dir.display()))?;
    Ok(app_dir)
}

pub fn validate_db_path(path: &str) -> Result<()> {
    if path.is_empty() {
        bail!("database path must not be empty");
    }
    if path == ":memory:" {
        return Ok(());
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            bail!(
                "database path {path:?} looks like a URI ({scheme}://); pass a filesystem path instead"
            );
        }
    }

    if path.starts_with("file:") {
        bail!("database path {path:?} uses file: URI syntax; pass a plain filesystem path");
    }

    if path.contains('?') {
        bail!(
            "database path {path:?} contains '?'; remove query parameters and use a plain file path"
        );
    }

    Ok(())
}

fn command_from_row(row: &Row<'_>) -> rusqlite::Result<Command> {
    let status_raw: String = row.get(4)?;
    let status = CommandStatus::parse(&status_raw)
        .ok_or_else(|| to_sql_error(anyhow!("unknown command status {status_raw}")))?;
    let lint_raw: String = row.get(5)?;
    let lint_status = LintStatus::parse(&lint_raw)
        .ok_or_else(|| to_sql_error(anyhow!("unknown lint status {lint_raw}")))?;
    let issues_raw: String = row.get(6)?;
    let lint_issues: Vec<LintIssue> = serde_json::from_str(&issues_raw)
        .map_err(|error| to_sql_error(anyhow!("decode lint issues: {error}")))?;
    let created_at_raw: String = row.get(8)?;
    let updated_at_raw: String = row.get(9)?;

    Ok(Command {
        id: CommandId::new(row.get(0)?),
        title: row.get(1)?,
        description: row.get(2)?,
        script: row.get(3)?,
        status,
        lint_status,
        lint_issues,
        elapsed_ms: row.get(7)?,
        created_at: parse_datetime(&created_at_raw).map_err(to_sql_error)?,
        updated_at: parse_datetime(&updated_at_raw).map_err(to_sql_error)?,
    })
}

fn has_user_tables(conn: &Connection) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "
            SELECT COUNT(*)
            FROM sqlite_master
            WHERE type = 'table'
              AND name NOT LIKE 'sqlite_%'
            ",
            [],
            |row| row.get(0),
        )
        .context("count user tables")?;
    Ok(count > 0)
}

fn validate_schema(conn: &Connection) -> Result<()> {
    for (table, required_columns) in REQUIRED_SCHEMA {
        if !table_exists(conn, table)? {
            bail!(
                "database is missing required table `{table}`; use a shellbook database or migrate first"
            );
        }

        let columns = table_columns(conn, table)?;
        let missing: Vec<&str> = required_columns
            .iter()
            .copied()
            .filter(|column| !columns.contains(*column))
            .collect();

        if !missing.is_empty() {
            bail!(
                "table `{table}` is missing required columns: {}; run migration before launching",
                missing.join(", ")
            );
        }
    }

    Ok(())
}

fn ensure_required_indexes(conn: &Connection) -> Result<()> {
    for index in REQUIRED_INDEXES {
        conn.execute_batch(index.create_sql)
            .with_context(|| format!("ensure required index `{}`", index.name))?;
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let exists = conn
        .query_row(
            "
            SELECT EXISTS(
              SELECT 1
              FROM sqlite_master
              WHERE type = 'table' AND name = ?
            )
            ",
            params![table],
            |row| row.get::<_, i64>(0),
        )
        .with_context(|| format!("check table existence for {table}"))?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> Result<BTreeSet<String>> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .with_context(|| format!("inspect columns for {table}"))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .with_context(|| format!("query column info for {table}"))?;

    rows.collect::<rusqlite::Result<BTreeSet<_>>>()
        .with_context(|| format!("collect columns for {table}"))
}

fn configure_connection(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        ",
    )
    .context("configure sqlite pragmas")
}

fn now_rfc3339() -> Result<String> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("format current timestamp")
}

fn parse_datetime(raw: &str) -> Result<OffsetDateTime> {
    if let Ok(value) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(value);
    }

    if let Ok(value) = PrimitiveDateTime::parse(
        raw,
        &format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ) {
        return Ok(value.assume_utc());
    }

    bail!("unsupported datetime format {raw:?}")
}

fn to_sql_error(error: anyhow::Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            error.to_string(),
        )),
    )
}
