// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::ids::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CommandStatus {
    Imported,
    Saved,
    Archived,
}

impl CommandStatus {
    pub const ALL: [Self; 3] = [Self::Imported, Self::Saved, Self::Archived];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Imported => "imported",
            Self::Saved => "saved",
            Self::Archived => "archived",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "imported" => Some(Self::Imported),
            "saved" => Some(Self::Saved),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }

    /// Stable small integer used when a status has to travel as a page id.
    pub const fn code(self) -> i64 {
        match self {
            Self::Imported => 1,
            Self::Saved => 2,
            Self::Archived => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LintStatus {
    Unchecked,
    Clean,
    Warnings,
    Errors,
}

impl LintStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unchecked => "unchecked",
            Self::Clean => "clean",
            Self::Warnings => "warnings",
            Self::Errors => "errors",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "unchecked" => Some(Self::Unchecked),
            "clean" => Some(Self::Clean),
            "warnings" => Some(Self::Warnings),
            "errors" => Some(Self::Errors),
            _ => None,
        }
    }

    /// Derives the status a set of issues implies.
    pub fn from_issues(issues: &[LintIssue]) -> Self {
        if issues.iter().any(|issue| issue.level == LintLevel::Error) {
            Self::Errors
        } else if issues.is_empty() {
            Self::Clean
        } else {
            Self::Warnings
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LintLevel {
    Error,
    Warning,
    Info,
    Style,
}

impl LintLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Style => "style",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintIssue {
    pub line: u32,
    pub column: u32,
    pub level: LintLevel,
    pub code: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub id: CommandId,
    pub title: String,
    pub description: String,
    pub script: String,
    pub status: CommandStatus,
    pub lint_status: LintStatus,
    pub lint_issues: Vec<LintIssue>,
    pub elapsed_ms: Option<i64>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Command {
    /// First line of the script, used where a single-line preview is needed.
    pub fn script_preview(&self) -> &str {
        self.script.lines().next().unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}
