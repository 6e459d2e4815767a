// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crossterm::event::KeyEvent;
use shellbook_app::{Command, CommandId, CommandStatus};

/// Side-effecting work handed to the task runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    LoadCommands,
    LoadCommand(CommandId),
    DeleteCommands(Vec<CommandId>),
    SetStatus {
        ids: Vec<CommandId>,
        status: CommandStatus,
    },
    ImportHistory,
    ClearStatus {
        token: u64,
    },
}

impl Request {
    pub fn describe(&self) -> String {
        match self {
            Self::LoadCommands => "load commands".to_owned(),
            Self::LoadCommand(id) => format!("load command {id}"),
            Self::DeleteCommands(ids) => format!("delete {}", plural(ids.len(), "command")),
            Self::SetStatus { ids, status } => {
                format!("mark {} {}", plural(ids.len(), "command"), status.as_str())
            }
            Self::ImportHistory => "import shell history".to_owned(),
            Self::ClearStatus { token } => format!("clear status {token}"),
        }
    }
}

/// Everything the event loop feeds to the app: terminal input and the
/// results of finished requests.
#[derive(Debug, Clone)]
pub enum Message {
    Key(KeyEvent),
    Resize {
        width: u16,
        height: u16,
    },
    CommandsLoaded(Vec<Command>),
    CommandLoaded {
        id: CommandId,
        command: Option<Command>,
    },
    CommandsChanged {
        upserted: Vec<Command>,
        deleted: Vec<CommandId>,
    },
    Failed {
        context: String,
        error: String,
    },
    ClearStatus {
        token: u64,
    },
}

impl Message {
    /// Task results every cached model should see, not just the focused one.
    pub const fn is_data(&self) -> bool {
        matches!(
            self,
            Self::CommandsLoaded(_) | Self::CommandLoaded { .. } | Self::CommandsChanged { .. }
        )
    }
}

pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
