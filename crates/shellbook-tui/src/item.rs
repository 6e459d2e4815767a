// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;

/// Anything a [`crate::table::Table`] can show.
///
/// Ids only need to be unique within one table.
pub trait TableItem {
    fn id(&self) -> i64;

    /// Display text for the column with the given key.
    fn cell(&self, column: &str) -> String;

    /// Text the filter box matches against. When empty, the rendered cells
    /// are searched instead.
    fn search_fields(&self) -> Vec<String> {
        Vec::new()
    }

    fn compare_field(&self, other: &Self, field: &str) -> Ordering;
}
