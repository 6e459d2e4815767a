// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

macro_rules! entity_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(i64);

        impl $name {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(CommandId);

/// Hands out monotonically increasing ids, one counter per kind.
///
/// Ids are only unique within a kind. The allocator is meant to be owned by
/// whoever creates items (a store, a fixture source) and passed around
/// explicitly rather than living in a static.
#[derive(Debug, Default)]
pub struct IdAllocator {
    counters: Mutex<HashMap<&'static str, i64>>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, kind: &'static str) -> i64 {
        let mut counters = match self.counters.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let counter = counters.entry(kind).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Moves the counter for `kind` forward so the next id is above `floor`.
    pub fn observe(&self, kind: &'static str, floor: i64) {
        let mut counters = match self.counters.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let counter = counters.entry(kind).or_insert(0);
        if *counter < floor {
            *counter = floor;
        }
    }

    pub fn next_command_id(&self) -> CommandId {
        CommandId::new(self.next(COMMAND_KIND))
    }
}

pub const COMMAND_KIND: &str = "command";
