// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use shellbook_app::{
    COMMAND_KIND, Command, CommandId, CommandSource, CommandStatus, IdAllocator, LintIssue,
    LintLevel, LintStatus, parse_history, title_for_script,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

const TEMPLATES: [(&str, &str); 16] = [
    ("Tail api logs", "kubectl logs -f deploy/api"),
    ("Disk usage", "du -sh * | sort -h"),
    ("Find large files", "find . -type f -size +100M"),
    ("Git prune branches", "git fetch --prune && git branch -vv"),
    ("Docker cleanup", "docker system prune -af"),
    ("Open ports", "ss -tulpn"),
    ("Rebuild index", "psql -c 'REINDEX DATABASE app'"),
    ("Count lines", "wc -l src/*.rs"),
    ("Watch memory", "watch -n1 free -m"),
    ("Sync bucket", "aws s3 sync ./dist s3://site"),
    ("Grep todos", "rg -n TODO"),
    ("Restart nginx", "sudo systemctl restart nginx"),
    ("Check certs", "openssl s_client -connect example.com:443"),
    ("Tar backup", "tar czf backup.tgz ~/notes"),
    ("Journal errors", "journalctl -p err -b"),
    ("Top processes", "ps aux --sort=-%mem | head"),
];

const DESCRIPTIONS: [&str; 6] = [
    "",
    "Run before deploying.",
    "Handy when the disk fills up.",
    "Needs VPN.",
    "Weekly chore.",
    "Copied from the runbook.",
];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Builds plausible commands. The same seed always yields the same
/// sequence; ids come from the faker's own allocator and timestamps grow
/// with the id.
#[derive(Debug)]
pub struct CommandFaker {
    rng: DeterministicRng,
    ids: IdAllocator,
}

impl CommandFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            ids: IdAllocator::new(),
        }
    }

    pub fn command(&mut self) -> Command {
        let id = self.ids.next_command_id();
        let (title, script) = TEMPLATES[self.rng.int_n(TEMPLATES.len())];
        let description = DESCRIPTIONS[self.rng.int_n(DESCRIPTIONS.len())];
        let status = CommandStatus::ALL[self.rng.int_n(CommandStatus::ALL.len())];
        let lint_issues = if self.rng.int_n(3) == 0 {
            vec![LintIssue {
                line: 1,
                column: 1 + self.rng.int_n(20) as u32,
                level: LintLevel::Warning,
                code: 2086,
                message: "Double quote to prevent globbing and word splitting.".to_owned(),
            }]
        } else {
            Vec::new()
        };
        let lint_status = if self.rng.int_n(4) == 0 {
            LintStatus::Unchecked
        } else {
            LintStatus::from_issues(&lint_issues)
        };
        let elapsed_ms = match self.rng.int_n(3) {
            0 => None,
            _ => Some(self.rng.int_n(90_000) as i64),
        };
        let updated_at = fixture_datetime() + Duration::minutes(id.get());
        Command {
            id,
            title: format!("{title} {id}"),
            description: description.to_owned(),
            script: format!("{script} # {id}"),
            status,
            lint_status,
            lint_issues,
            elapsed_ms,
            created_at: updated_at - Duration::hours(1),
            updated_at,
        }
    }

    pub fn commands(&mut self, count: usize) -> Vec<Command> {
        (0..count).map(|_| self.command()).collect()
    }
}

/// In-memory [`CommandSource`] for driving the UI without a database.
#[derive(Debug, Default)]
pub struct MemorySource {
    ids: IdAllocator,
    commands: Mutex<BTreeMap<CommandId, Command>>,
    history: Mutex<String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_commands(commands: Vec<Command>) -> Self {
        let source = Self::new();
        if let Some(max) = commands.iter().map(|command| command.id.get()).max() {
            source.ids.observe(COMMAND_KIND, max);
        }
        if let Ok(mut stored) = source.commands.lock() {
            stored.extend(commands.into_iter().map(|command| (command.id, command)));
        }
        source
    }

    /// Replaces the text `import_history` reads.
    pub fn set_history(&self, text: &str) -> Result<()> {
        let mut history = self
            .history
            .lock()
            .map_err(|_| anyhow!("history lock poisoned"))?;
        *history = text.to_owned();
        Ok(())
    }

    pub fn snapshot(&self) -> Result<Vec<Command>> {
        Ok(self.lock()?.values().cloned().collect())
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<CommandId, Command>>> {
        self.commands
            .lock()
            .map_err(|_| anyhow!("command lock poisoned"))
    }
}

impl CommandSource for MemorySource {
    fn list_commands(&self) -> Result<Vec<Command>> {
        let mut commands = self.snapshot()?;
        commands.sort_by(|left, right| {
            right
                .updated_at
                .cmp(&left.updated_at)
                .then_with(|| right.id.cmp(&left.id))
        });
        Ok(commands)
    }

    fn get_command(&self, id: CommandId) -> Result<Option<Command>> {
        Ok(self.lock()?.get(&id).cloned())
    }

    fn delete_commands(&self, ids: &[CommandId]) -> Result<Vec<CommandId>> {
        let mut commands = self.lock()?;
        Ok(ids
            .iter()
            .copied()
            .filter(|id| commands.remove(id).is_some())
            .collect())
    }

    fn set_status(&self, ids: &[CommandId], status: CommandStatus) -> Result<Vec<Command>> {
        let mut commands = self.lock()?;
        let mut changed = Vec::new();
        for id in ids {
            let command = commands
                .get_mut(id)
                .with_context(|| format!("command {id} not found"))?;
            command.status = status;
            command.updated_at += Duration::seconds(1);
            changed.push(command.clone());
        }
        Ok(changed)
    }

    fn import_history(&self) -> Result<Vec<Command>> {
        let text = self
            .history
            .lock()
            .map_err(|_| anyhow!("history lock poisoned"))?
            .clone();
        let mut commands = self.lock()?;
        let mut imported = Vec::new();
        for script in parse_history(&text) {
            if commands.values().any(|command| command.script == script) {
                continue;
            }
            let id = self.ids.next_command_id();
            let now = fixture_datetime() + Duration::days(1) + Duration::minutes(id.get());
            let command = Command {
                id,
                title: title_for_script(&script),
                description: String::new(),
                script,
                status: CommandStatus::Imported,
                lint_status: LintStatus::Unchecked,
                lint_issues: Vec::new(),
                elapsed_ms: None,
                created_at: now,
                updated_at: now,
            };
            commands.insert(id, command.clone());
            imported.push(command);
        }
        Ok(imported)
    }
}

pub fn temp_db_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let db_path = dir.path().join("shellbook.db");
    Ok((dir, db_path))
}

pub const fn fixture_datetime() -> OffsetDateTime {
    datetime!(2026-02-19 12:34:56 UTC)
}

#[cfg(test)]
mod tests {
    use super::{CommandFaker, MemorySource};
    use anyhow::Result;
    use shellbook_app::{CommandId, CommandSource, CommandStatus};
    use std::collections::BTreeSet;

    #[test]
    fn same_seed_same_commands() {
        let left = CommandFaker::new(42).commands(5);
        let right = CommandFaker::new(42).commands(5);
        assert_eq!(left, right);
    }

    #[test]
    fn ids_and_scripts_are_unique() {
        let commands = CommandFaker::new(7).commands(40);
        let ids = commands.iter().map(|command| command.id).collect::<BTreeSet<_>>();
        let scripts = commands
            .iter()
            .map(|command| command.script.as_str())
            .collect::<BTreeSet<_>>();
        assert_eq!(ids.len(), 40);
        assert_eq!(scripts.len(), 40);
        assert!(commands.windows(2).all(|pair| pair[0].updated_at < pair[1].updated_at));
    }

    #[test]
    fn memory_source_lists_newest_first() -> Result<()> {
        let source = MemorySource::with_commands(CommandFaker::new(1).commands(3));
        let ids = source
            .list_commands()?
            .iter()
            .map(|command| command.id.get())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![3, 2, 1]);
        Ok(())
    }

    #[test]
    fn delete_reports_only_existing_ids() -> Result<()> {
        let source = MemorySource::with_commands(CommandFaker::new(1).commands(2));
        let deleted = source.delete_commands(&[CommandId::new(2), CommandId::new(9)])?;
        assert_eq!(deleted, vec![CommandId::new(2)]);
        assert_eq!(source.snapshot()?.len(), 1);
        Ok(())
    }

    #[test]
    fn import_skips_known_scripts_and_continues_ids() -> Result<()> {
        let existing = CommandFaker::new(1).commands(2);
        let known = existing[0].script.clone();
        let source = MemorySource::with_commands(existing);
        source.set_history(&format!("#1700000000\nls -la\n{known}\nls -la\n\ngit status\n"))?;

        let imported = source.import_history()?;
        let scripts = imported
            .iter()
            .map(|command| command.script.as_str())
            .collect::<Vec<_>>();
        assert_eq!(scripts, vec!["ls -la", "git status"]);
        assert_eq!(imported[0].id, CommandId::new(3));
        assert!(imported.iter().all(|command| command.status == CommandStatus::Imported));
        assert!(source.import_history()?.is_empty());
        Ok(())
    }
}
