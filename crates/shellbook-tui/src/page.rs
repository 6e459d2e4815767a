// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Sidebar,
    Commands,
    CommandDetail,
    Help,
}

impl Kind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sidebar => "sidebar",
            Self::Commands => "commands",
            Self::CommandDetail => "command",
            Self::Help => "help",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a piece of pane content, and the key the model cache uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Page {
    pub kind: Kind,
    pub id: Option<i64>,
}

impl Page {
    pub const fn new(kind: Kind) -> Self {
        Self { kind, id: None }
    }

    pub const fn with_id(kind: Kind, id: i64) -> Self {
        Self { kind, id: Some(id) }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "{}#{id}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    Left,
    TopRight,
    BottomRight,
}

impl Position {
    pub const ALL: [Self; 3] = [Self::Left, Self::TopRight, Self::BottomRight];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::TopRight => "top-right",
            Self::BottomRight => "bottom-right",
        }
    }
}
