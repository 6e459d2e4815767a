// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use log::info;
use shellbook_app::{Command, CommandId, CommandSource, CommandStatus};
use shellbook_db::Store;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

/// SQLite-backed [`CommandSource`]. Task threads share one connection.
pub struct DbSource {
    store: Mutex<Store>,
    history_path: PathBuf,
}

impl DbSource {
    pub fn new(store: Store, history_path: PathBuf) -> Self {
        Self {
            store: Mutex::new(store),
            history_path,
        }
    }

    fn store(&self) -> Result<MutexGuard<'_, Store>> {
        self.store
            .lock()
            .map_err(|_| anyhow!("database lock poisoned by an earlier failure"))
    }
}

impl CommandSource for DbSource {
    fn list_commands(&self) -> Result<Vec<Command>> {
        self.store()?.list_commands()
    }

    fn get_command(&self, id: CommandId) -> Result<Option<Command>> {
        self.store()?.find_command(id)
    }

    fn delete_commands(&self, ids: &[CommandId]) -> Result<Vec<CommandId>> {
        self.store()?.delete_commands(ids)
    }

    fn set_status(&self, ids: &[CommandId], status: CommandStatus) -> Result<Vec<Command>> {
        let store = self.store()?;
        ids.iter().map(|id| store.set_status(*id, status)).collect()
    }

    fn import_history(&self) -> Result<Vec<Command>> {
        let imported = self.store()?.import_history_file(&self.history_path)?;
        info!(
            "imported {} commands from {}",
            imported.len(),
            self.history_path.display()
        );
        Ok(imported)
    }
}
