// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Command, CommandId, CommandStatus};
use anyhow::Result;

/// Where commands come from and where changes to them go.
///
/// Implementations are called from worker threads, one request at a time per
/// thread, so they must be shareable.
pub trait CommandSource: Send + Sync {
    fn list_commands(&self) -> Result<Vec<Command>>;
    fn get_command(&self, id: CommandId) -> Result<Option<Command>>;
    /// Returns the ids that existed and were removed.
    fn delete_commands(&self, ids: &[CommandId]) -> Result<Vec<CommandId>>;
    fn set_status(&self, ids: &[CommandId], status: CommandStatus) -> Result<Vec<Command>>;
    /// Returns the commands the import added.
    fn import_history(&self) -> Result<Vec<Command>>;
}
