// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::item::TableItem;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use shellbook_app::SortDirection;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortField {
    pub key: &'static str,
    pub label: &'static str,
}

impl SortField {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOption {
    pub field: &'static str,
    pub direction: SortDirection,
}

impl SortOption {
    pub const fn asc(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortCursor {
    PrimaryField,
    PrimaryDirection,
    SecondaryField,
    SecondaryDirection,
}

impl SortCursor {
    const ALL: [Self; 4] = [
        Self::PrimaryField,
        Self::PrimaryDirection,
        Self::SecondaryField,
        Self::SecondaryDirection,
    ];

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|cursor| *cursor == self)
            .unwrap_or(0)
    }
}

/// Primary and optional secondary ordering for one table, plus the cursor
/// used while the sort line is being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    fields: Vec<SortField>,
    identity: &'static str,
    primary: SortOption,
    secondary: Option<SortOption>,
    editing: bool,
    cursor: SortCursor,
}

impl SortState {
    /// Starts sorted by `identity` ascending with no secondary.
    pub fn new(fields: Vec<SortField>, identity: &'static str) -> Self {
        Self {
            fields,
            identity,
            primary: SortOption::asc(identity),
            secondary: None,
            editing: false,
            cursor: SortCursor::PrimaryField,
        }
    }

    pub fn fields(&self) -> &[SortField] {
        &self.fields
    }

    pub const fn primary(&self) -> SortOption {
        self.primary
    }

    pub const fn secondary(&self) -> Option<SortOption> {
        self.secondary
    }

    pub const fn is_editing(&self) -> bool {
        self.editing
    }

    pub const fn cursor(&self) -> SortCursor {
        self.cursor
    }

    pub fn set_primary_field(&mut self, field: &'static str) {
        if !self.knows(field) {
            return;
        }
        self.primary.field = field;
        if self.secondary.is_none() && field != self.identity {
            self.secondary = Some(SortOption::asc(self.identity));
        }
        self.collapse_secondary();
    }

    pub fn set_primary_direction(&mut self, direction: SortDirection) {
        self.primary.direction = direction;
    }

    pub fn set_secondary_field(&mut self, field: &'static str) {
        if !self.knows(field) {
            return;
        }
        let direction = self
            .secondary
            .map_or(SortDirection::Asc, |option| option.direction);
        self.secondary = Some(SortOption { field, direction });
        self.collapse_secondary();
    }

    pub fn set_secondary_direction(&mut self, direction: SortDirection) {
        if let Some(secondary) = self.secondary.as_mut() {
            secondary.direction = direction;
        }
    }

    pub fn begin_edit(&mut self) {
        self.editing = true;
        self.cursor = SortCursor::PrimaryField;
    }

    pub fn end_edit(&mut self) {
        self.editing = false;
    }

    pub fn next_position(&mut self) {
        self.shift_cursor(1);
    }

    pub fn prev_position(&mut self) {
        self.shift_cursor(-1);
    }

    /// Changes the value under the cursor: fields step through the sortable
    /// columns, directions flip.
    pub fn cycle_value(&mut self, delta: isize) {
        match self.cursor {
            SortCursor::PrimaryField => {
                let next = self.step_field(self.primary.field, delta);
                self.set_primary_field(next);
            }
            SortCursor::PrimaryDirection => {
                self.primary.direction = self.primary.direction.toggled();
            }
            SortCursor::SecondaryField => {
                if let Some(secondary) = self.secondary {
                    let next = self.step_field(secondary.field, delta);
                    self.set_secondary_field(next);
                }
            }
            SortCursor::SecondaryDirection => {
                if let Some(secondary) = self.secondary.as_mut() {
                    secondary.direction = secondary.direction.toggled();
                }
            }
        }
    }

    pub fn compare<V: TableItem>(&self, left: &V, right: &V) -> Ordering {
        compare_option(self.primary, left, right)
            .then_with(|| {
                self.secondary
                    .map_or(Ordering::Equal, |option| compare_option(option, left, right))
            })
            .then_with(|| left.id().cmp(&right.id()))
    }

    /// Header suffix for a column: a bare arrow when only the primary is
    /// active, numbered triangles when both are.
    pub fn header_marker(&self, field: &str) -> Option<String> {
        let Some(secondary) = self.secondary else {
            return (self.primary.field == field).then(|| self.primary.direction.arrow().to_owned());
        };
        [self.primary, secondary]
            .iter()
            .enumerate()
            .find(|(_, option)| option.field == field)
            .map(|(index, option)| {
                let marker = match option.direction {
                    SortDirection::Asc => "▲",
                    SortDirection::Desc => "▼",
                };
                format!("{marker}{}", index + 1)
            })
    }

    /// One-line summary, e.g. `sort: title ↑ · id ↑`.
    pub fn indicator(&self) -> Line<'static> {
        let highlight = Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let mut spans = vec![Span::styled("sort: ", Style::default().fg(Color::DarkGray))];
        let mut push = |text: String, cursor: SortCursor| {
            let style = if self.editing && self.cursor == cursor {
                highlight
            } else {
                Style::default()
            };
            spans.push(Span::styled(text, style));
        };

        push(self.label_for(self.primary.field).to_owned(), SortCursor::PrimaryField);
        push(" ".to_owned(), SortCursor::PrimaryField);
        push(self.primary.direction.arrow().to_owned(), SortCursor::PrimaryDirection);
        if let Some(secondary) = self.secondary {
            push(" · ".to_owned(), SortCursor::SecondaryField);
            push(self.label_for(secondary.field).to_owned(), SortCursor::SecondaryField);
            push(" ".to_owned(), SortCursor::SecondaryField);
            push(secondary.direction.arrow().to_owned(), SortCursor::SecondaryDirection);
        }
        Line::from(spans)
    }

    pub fn label_for<'a>(&'a self, field: &'a str) -> &'a str {
        self.fields
            .iter()
            .find(|candidate| candidate.key == field)
            .map_or(field, |candidate| candidate.label)
    }

    fn knows(&self, field: &str) -> bool {
        field == self.identity || self.fields.iter().any(|candidate| candidate.key == field)
    }

    fn collapse_secondary(&mut self) {
        if self
            .secondary
            .is_some_and(|secondary| secondary.field == self.primary.field)
        {
            self.secondary = None;
            if matches!(
                self.cursor,
                SortCursor::SecondaryField | SortCursor::SecondaryDirection
            ) {
                self.cursor = SortCursor::PrimaryField;
            }
        }
    }

    fn positions(&self) -> usize {
        if self.secondary.is_some() { 4 } else { 2 }
    }

    fn shift_cursor(&mut self, delta: isize) {
        let positions = self.positions() as isize;
        let current = (self.cursor.index() as isize).min(positions - 1);
        let next = (current + delta).rem_euclid(positions) as usize;
        self.cursor = SortCursor::ALL[next];
    }

    fn step_field(&self, current: &'static str, delta: isize) -> &'static str {
        if self.fields.is_empty() {
            return current;
        }
        let len = self.fields.len() as isize;
        let index = self
            .fields
            .iter()
            .position(|field| field.key == current)
            .map_or(0, |index| index as isize);
        let next = (index + delta).rem_euclid(len) as usize;
        self.fields[next].key
    }
}

fn compare_option<V: TableItem>(option: SortOption, left: &V, right: &V) -> Ordering {
    let ordering = left.compare_field(right, option.field);
    match option.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::{SortCursor, SortField, SortOption, SortState};
    use crate::item::TableItem;
    use shellbook_app::SortDirection;
    use std::cmp::Ordering;

    #[derive(Debug, Clone)]
    struct Entry {
        id: i64,
        name: &'static str,
        size: i64,
    }

    impl TableItem for Entry {
        fn id(&self) -> i64 {
            self.id
        }

        fn cell(&self, column: &str) -> String {
            match column {
                "name" => self.name.to_owned(),
                "size" => self.size.to_string(),
                _ => self.id.to_string(),
            }
        }

        fn compare_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "name" => self.name.cmp(other.name),
                "size" => self.size.cmp(&other.size),
                _ => self.id.cmp(&other.id),
            }
        }
    }

    fn state() -> SortState {
        SortState::new(
            vec![
                SortField::new("id", "id"),
                SortField::new("name", "name"),
                SortField::new("size", "size"),
            ],
            "id",
        )
    }

    fn line_text(state: &SortState) -> String {
        state
            .indicator()
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    #[test]
    fn non_identity_primary_adds_identity_secondary() {
        let mut sort = state();
        assert_eq!(sort.secondary(), None);
        sort.set_primary_field("name");
        assert_eq!(sort.secondary(), Some(SortOption::asc("id")));
        assert_eq!(line_text(&sort), "sort: name ↑ · id ↑");
    }

    #[test]
    fn matching_secondary_collapses() {
        let mut sort = state();
        sort.set_primary_field("name");
        sort.set_secondary_field("size");
        sort.set_primary_field("size");
        assert_eq!(sort.primary().field, "size");
        assert_eq!(sort.secondary(), None);
    }

    #[test]
    fn cursor_wraps_over_two_or_four_positions() {
        let mut sort = state();
        sort.begin_edit();
        sort.next_position();
        assert_eq!(sort.cursor(), SortCursor::PrimaryDirection);
        sort.next_position();
        assert_eq!(sort.cursor(), SortCursor::PrimaryField);

        sort.set_primary_field("name");
        sort.prev_position();
        assert_eq!(sort.cursor(), SortCursor::SecondaryDirection);
        sort.next_position();
        assert_eq!(sort.cursor(), SortCursor::PrimaryField);
    }

    #[test]
    fn cycling_values_changes_field_and_direction() {
        let mut sort = state();
        sort.begin_edit();
        sort.cycle_value(1);
        assert_eq!(sort.primary().field, "name");
        sort.next_position();
        sort.cycle_value(1);
        assert_eq!(sort.primary().direction, SortDirection::Desc);
        sort.next_position();
        assert_eq!(sort.cursor(), SortCursor::SecondaryField);
        sort.cycle_value(1);
        assert_eq!(sort.secondary(), None);
        assert_eq!(sort.cursor(), SortCursor::PrimaryField);
    }

    #[test]
    fn comparator_breaks_ties_by_id() {
        let mut sort = state();
        sort.set_primary_field("size");
        sort.set_primary_direction(SortDirection::Desc);
        sort.set_secondary_field("name");

        let mut entries = vec![
            Entry { id: 4, name: "b", size: 1 },
            Entry { id: 2, name: "a", size: 1 },
            Entry { id: 3, name: "a", size: 1 },
            Entry { id: 1, name: "z", size: 9 },
        ];
        entries.sort_by(|left, right| sort.compare(left, right));
        let ids = entries.iter().map(|entry| entry.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        entries.reverse();
        entries.sort_by(|left, right| sort.compare(left, right));
        let again = entries.iter().map(|entry| entry.id).collect::<Vec<_>>();
        assert_eq!(again, ids);
    }

    #[test]
    fn header_markers_follow_sort_count() {
        let mut sort = state();
        assert_eq!(sort.header_marker("id").as_deref(), Some("↑"));
        sort.set_primary_field("name");
        sort.set_primary_direction(SortDirection::Desc);
        assert_eq!(sort.header_marker("name").as_deref(), Some("▼1"));
        assert_eq!(sort.header_marker("id").as_deref(), Some("▲2"));
        assert_eq!(sort.header_marker("size"), None);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut sort = state();
        sort.set_primary_field("missing");
        assert_eq!(sort.primary(), SortOption::asc("id"));
    }
}
