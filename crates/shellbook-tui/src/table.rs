// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Virtualized table over any [`TableItem`].
//!
//! The table owns the full item set and derives the visible rows from it on
//! every change: items that fail the filter are dropped, the rest are ordered
//! by relevance (optionally) and then by the [`SortState`] comparator. Only
//! the rows inside the viewport are drawn.

use crate::fuzzy;
use crate::item::TableItem;
use crate::sort::SortState;
use crate::viewport;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Widget;
use std::collections::{BTreeSet, HashMap, HashSet};

const ELLIPSIS: char = '…';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Truncation {
    #[default]
    Ellipsis,
    Leading,
    Clip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub title: &'static str,
    pub width: u16,
    pub right_align: bool,
    pub truncation: Truncation,
}

impl Column {
    pub const fn new(key: &'static str, title: &'static str, width: u16) -> Self {
        Self {
            key,
            title,
            width,
            right_align: false,
            truncation: Truncation::Ellipsis,
        }
    }

    pub const fn right_aligned(mut self) -> Self {
        self.right_align = true;
        self
    }

    pub const fn truncation(mut self, truncation: Truncation) -> Self {
        self.truncation = truncation;
        self
    }
}

pub type RenderedRow = HashMap<&'static str, String>;

/// Pads or shortens `text` to exactly `width` chars.
pub fn fit_cell(text: &str, width: usize, truncation: Truncation, right_align: bool) -> String {
    let len = text.chars().count();
    if len > width {
        return match truncation {
            _ if width == 0 => String::new(),
            Truncation::Ellipsis => {
                let mut out: String = text.chars().take(width - 1).collect();
                out.push(ELLIPSIS);
                out
            }
            Truncation::Leading => {
                let mut out = String::from(ELLIPSIS);
                out.extend(text.chars().skip(len - (width - 1)));
                out
            }
            Truncation::Clip => text.chars().take(width).collect(),
        };
    }
    let padding = " ".repeat(width - len);
    if right_align {
        format!("{padding}{text}")
    } else {
        format!("{text}{padding}")
    }
}

#[derive(Debug, Clone)]
pub struct Table<V: TableItem> {
    columns: Vec<Column>,
    items: HashMap<i64, V>,
    rendered: HashMap<i64, RenderedRow>,
    rows: Vec<i64>,
    current: Option<usize>,
    current_id: Option<i64>,
    start: usize,
    height: usize,
    selection: BTreeSet<i64>,
    selectable: bool,
    relevance_order: bool,
    filter: String,
    sort: SortState,
    editing: bool,
    focused: bool,
    empty_message: &'static str,
}

impl<V: TableItem> Table<V> {
    pub fn new(columns: Vec<Column>, sort: SortState) -> Self {
        Self {
            columns,
            items: HashMap::new(),
            rendered: HashMap::new(),
            rows: Vec::new(),
            current: None,
            current_id: None,
            start: 0,
            height: 1,
            selection: BTreeSet::new(),
            selectable: true,
            relevance_order: true,
            filter: String::new(),
            sort,
            editing: false,
            focused: false,
            empty_message: "nothing here yet",
        }
    }

    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    pub fn relevance_order(mut self, enabled: bool) -> Self {
        self.relevance_order = enabled;
        self
    }

    pub fn empty_message(mut self, message: &'static str) -> Self {
        self.empty_message = message;
        self
    }

    pub fn rows(&self) -> &[i64] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn item(&self, id: i64) -> Option<&V> {
        self.items.get(&id)
    }

    pub fn rendered_row(&self, id: i64) -> Option<&RenderedRow> {
        self.rendered.get(&id)
    }

    pub const fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub const fn current_id(&self) -> Option<i64> {
        self.current_id
    }

    pub fn current_item(&self) -> Option<&V> {
        self.current_id.and_then(|id| self.items.get(&id))
    }

    pub const fn start(&self) -> usize {
        self.start
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub fn selection(&self) -> &BTreeSet<i64> {
        &self.selection
    }

    /// Selected ids in display order, or the current row when nothing is
    /// selected.
    pub fn targets(&self) -> Vec<i64> {
        if self.selection.is_empty() {
            return self.current_id.into_iter().collect();
        }
        self.rows
            .iter()
            .copied()
            .filter(|id| self.selection.contains(id))
            .collect()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// `height` counts the header line.
    pub fn set_height(&mut self, height: u16) {
        self.height = usize::from(height.saturating_sub(1)).max(1);
        self.clamp_viewport();
    }

    pub fn set_items(&mut self, items: Vec<V>) {
        self.items.clear();
        self.rendered.clear();
        for item in items {
            self.insert(item);
        }
        self.refresh();
    }

    pub fn add_items(&mut self, items: Vec<V>) {
        for item in items {
            self.insert(item);
        }
        self.refresh();
    }

    /// Removing the current row moves the cursor to the nearest surviving
    /// row above it, or below when none is left above.
    pub fn remove_items(&mut self, ids: &[i64]) {
        let removed: HashSet<i64> = ids.iter().copied().collect();
        let fallback = self
            .current
            .filter(|_| self.current_id.is_some_and(|id| removed.contains(&id)))
            .and_then(|current| {
                let survives = |id: &&i64| !removed.contains(*id);
                self.rows[..current]
                    .iter()
                    .rev()
                    .find(survives)
                    .or_else(|| self.rows[current..].iter().find(survives))
                    .copied()
            });
        for id in &removed {
            self.items.remove(id);
            self.rendered.remove(id);
            self.selection.remove(id);
        }
        self.refresh();
        if let Some(id) = fallback {
            self.goto_id(id);
        }
    }

    pub fn move_up(&mut self, n: usize) -> bool {
        self.move_by(-isize::try_from(n).unwrap_or(isize::MAX))
    }

    pub fn move_down(&mut self, n: usize) -> bool {
        self.move_by(isize::try_from(n).unwrap_or(isize::MAX))
    }

    pub fn page_up(&mut self) -> bool {
        self.move_up(self.height.max(1))
    }

    pub fn page_down(&mut self) -> bool {
        self.move_down(self.height.max(1))
    }

    pub fn half_page_up(&mut self) -> bool {
        self.move_up(self.half_page())
    }

    pub fn half_page_down(&mut self) -> bool {
        self.move_down(self.half_page())
    }

    pub fn goto_top(&mut self) -> bool {
        if self.rows.is_empty() {
            return false;
        }
        self.set_current(0)
    }

    pub fn goto_bottom(&mut self) -> bool {
        if self.rows.is_empty() {
            return false;
        }
        self.set_current(self.rows.len() - 1)
    }

    /// Unknown ids leave the cursor where it is.
    pub fn goto_id(&mut self, id: i64) -> bool {
        match self.rows.iter().position(|row| *row == id) {
            Some(index) => self.set_current(index),
            None => {
                self.clamp_viewport();
                false
            }
        }
    }

    pub fn toggle_selection(&mut self) {
        if let Some(id) = self.current_id {
            self.toggle_selection_by_id(id);
        }
    }

    pub fn toggle_selection_by_id(&mut self, id: i64) {
        if !self.selectable || !self.rows.contains(&id) {
            return;
        }
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
    }

    pub fn select_all(&mut self) {
        if self.selectable {
            self.selection.extend(self.rows.iter().copied());
        }
    }

    pub fn deselect_all(&mut self) {
        if self.selectable {
            self.selection.clear();
        }
    }

    /// Extends the selection to the current row from the nearest selected
    /// row before it, or else from the current row up to the next selected
    /// row after it.
    pub fn select_range(&mut self) {
        if !self.selectable || self.selection.is_empty() {
            return;
        }
        let Some(current) = self.current else {
            return;
        };

        let mut after_selected = None;
        let mut passed_current = false;
        let mut range = None;
        for (index, id) in self.rows.iter().enumerate() {
            if index == current {
                if let Some(from) = after_selected {
                    range = Some(from..current + 1);
                    break;
                }
                passed_current = true;
                continue;
            }
            if self.selection.contains(id) {
                if passed_current {
                    range = Some(current..index);
                    break;
                }
                after_selected = Some(index + 1);
            }
        }

        if let Some(range) = range {
            let ids = self.rows[range].to_vec();
            self.selection.extend(ids);
        }
    }

    pub fn set_filter(&mut self, filter: &str) {
        if self.filter == filter {
            return;
        }
        self.filter = filter.to_owned();
        self.refresh();
    }

    /// The current row takes the edit style while the sort is being edited.
    pub fn edit_sort(&mut self, edit: impl FnOnce(&mut SortState)) {
        edit(&mut self.sort);
        self.editing = self.sort.is_editing();
        self.refresh();
    }

    fn insert(&mut self, item: V) {
        let id = item.id();
        let row = self
            .columns
            .iter()
            .map(|column| (column.key, item.cell(column.key)))
            .collect();
        self.rendered.insert(id, row);
        self.items.insert(id, item);
    }

    fn score(&self, item: &V) -> i32 {
        let fields = item.search_fields();
        if !fields.is_empty() {
            return fuzzy::score_fields(item.id(), &fields, &self.filter);
        }
        let cells = self
            .rendered
            .get(&item.id())
            .map(|row| {
                self.columns
                    .iter()
                    .filter_map(|column| row.get(column.key).cloned())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        fuzzy::score_fields(item.id(), &cells, &self.filter)
    }

    fn refresh(&mut self) {
        let by_relevance = self.relevance_order && !self.filter.is_empty();
        let mut scored = self
            .items
            .values()
            .filter_map(|item| {
                let score = self.score(item);
                fuzzy::is_match(score).then_some((item, score))
            })
            .collect::<Vec<_>>();
        scored.sort_by(|(left, left_score), (right, right_score)| {
            let relevance = if by_relevance {
                right_score.cmp(left_score)
            } else {
                std::cmp::Ordering::Equal
            };
            relevance.then_with(|| self.sort.compare(*left, *right))
        });
        let rows = scored
            .into_iter()
            .map(|(item, _)| item.id())
            .collect::<Vec<_>>();
        self.rows = rows;

        let visible: HashSet<i64> = self.rows.iter().copied().collect();
        self.selection.retain(|id| visible.contains(id));

        self.current = if self.rows.is_empty() {
            None
        } else {
            self.current_id
                .and_then(|id| self.rows.iter().position(|row| *row == id))
                .or(Some(0))
        };
        self.current_id = self.current.and_then(|index| self.rows.get(index).copied());
        self.clamp_viewport();
    }

    fn move_by(&mut self, delta: isize) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        let last = self.rows.len().saturating_sub(1);
        let target = current.saturating_add_signed(delta).min(last);
        self.set_current(target)
    }

    fn set_current(&mut self, index: usize) -> bool {
        let previous = self.current_id;
        self.current = Some(index);
        self.current_id = self.rows.get(index).copied();
        self.clamp_viewport();
        previous != self.current_id
    }

    fn half_page(&self) -> usize {
        self.height.div_ceil(2).max(1)
    }

    fn clamp_viewport(&mut self) {
        self.start = viewport::clamp_start(self.current, self.start, self.height, self.rows.len());
    }

    fn header_line(&self, width: usize) -> String {
        let cells = self
            .columns
            .iter()
            .map(|column| {
                let title = match self.sort.header_marker(column.key) {
                    Some(marker) => format!("{} {marker}", column.title),
                    None => column.title.to_owned(),
                };
                fit_cell(
                    &title,
                    usize::from(column.width),
                    Truncation::Ellipsis,
                    column.right_align,
                )
            })
            .collect::<Vec<_>>();
        clamp_line(&cells.join(" "), width)
    }

    fn row_line(&self, id: i64, width: usize) -> String {
        let cells = self
            .columns
            .iter()
            .map(|column| {
                let text = self
                    .rendered
                    .get(&id)
                    .and_then(|row| row.get(column.key))
                    .map_or("", String::as_str);
                fit_cell(
                    text,
                    usize::from(column.width),
                    column.truncation,
                    column.right_align,
                )
            })
            .collect::<Vec<_>>();
        clamp_line(&cells.join(" "), width)
    }

    fn row_style(&self, index: usize, id: i64) -> Style {
        let is_current = self.current == Some(index);
        let is_selected = self.selection.contains(&id);
        match (is_current, is_selected) {
            (true, _) if self.editing => Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            (true, true) => Style::default()
                .fg(Color::Yellow)
                .bg(if self.focused {
                    Color::Blue
                } else {
                    Color::DarkGray
                })
                .add_modifier(Modifier::BOLD),
            (true, false) if self.focused => Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            (true, false) => Style::default().bg(Color::DarkGray),
            (false, true) => Style::default().fg(Color::Yellow),
            (false, false) => Style::default(),
        }
    }
}

impl<V: TableItem> Widget for &Table<V> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let text_width = usize::from(area.width.saturating_sub(1));
        buf.set_stringn(
            area.x,
            area.y,
            self.header_line(text_width),
            text_width,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

        let body_height = usize::from(area.height - 1);
        if self.rows.is_empty() {
            if body_height > 0 {
                let message = if self.filter.is_empty() {
                    self.empty_message
                } else {
                    "no matches"
                };
                buf.set_stringn(
                    area.x,
                    area.y + 1,
                    message,
                    text_width,
                    Style::default().fg(Color::DarkGray),
                );
            }
            return;
        }

        for (offset, (index, id)) in self
            .rows
            .iter()
            .copied()
            .enumerate()
            .skip(self.start)
            .take(body_height)
            .enumerate()
        {
            let y = area.y + 1 + offset as u16;
            let style = self.row_style(index, id);
            let line = Rect::new(area.x, y, area.width.saturating_sub(1), 1);
            buf.set_style(line, style);
            buf.set_stringn(area.x, y, self.row_line(id, text_width), text_width, style);
        }

        if area.width > 1 {
            let x = area.x + area.width - 1;
            let visible = body_height.min(self.rows.len());
            for (offset, glyph) in
                viewport::scrollbar_glyphs(self.start, visible, self.rows.len(), body_height)
                    .into_iter()
                    .enumerate()
            {
                buf.set_string(
                    x,
                    area.y + 1 + offset as u16,
                    glyph,
                    Style::default().fg(Color::DarkGray),
                );
            }
        }
    }
}

fn clamp_line(line: &str, width: usize) -> String {
    line.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::{Column, Table, Truncation, fit_cell};
    use crate::item::TableItem;
    use crate::sort::{SortField, SortState};
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::style::Color;
    use ratatui::widgets::Widget;
    use shellbook_app::SortDirection;
    use std::cmp::Ordering;
    use std::collections::BTreeSet;

    #[derive(Debug, Clone)]
    struct Entry {
        id: i64,
        name: String,
    }

    impl TableItem for Entry {
        fn id(&self) -> i64 {
            self.id
        }

        fn cell(&self, column: &str) -> String {
            match column {
                "name" => self.name.clone(),
                _ => self.id.to_string(),
            }
        }

        fn compare_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "name" => self.name.cmp(&other.name),
                _ => self.id.cmp(&other.id),
            }
        }
    }

    fn entry(id: i64, name: &str) -> Entry {
        Entry {
            id,
            name: name.to_owned(),
        }
    }

    fn table() -> Table<Entry> {
        let sort = SortState::new(
            vec![SortField::new("id", "id"), SortField::new("name", "name")],
            "id",
        );
        Table::new(
            vec![
                Column::new("id", "id", 3).right_aligned(),
                Column::new("name", "name", 12),
            ],
            sort,
        )
    }

    fn six_rows() -> Table<Entry> {
        let mut table = table();
        table.set_height(11);
        table.set_items((0..6).map(|id| entry(id, &format!("row {id}"))).collect());
        table
    }

    fn selection(ids: &[i64]) -> BTreeSet<i64> {
        ids.iter().copied().collect()
    }

    fn select_range_case(selected: &[i64], current: i64) -> BTreeSet<i64> {
        let mut table = six_rows();
        for id in selected {
            table.toggle_selection_by_id(*id);
        }
        table.goto_id(current);
        table.select_range();
        table.selection().clone()
    }

    fn buffer_line(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
    }

    #[test]
    fn select_range_scenarios() {
        assert_eq!(select_range_case(&[0], 5), selection(&[0, 1, 2, 3, 4, 5]));
        assert_eq!(select_range_case(&[0], 2), selection(&[0, 1, 2]));
        assert_eq!(select_range_case(&[0, 5], 2), selection(&[0, 1, 2, 5]));
        assert_eq!(select_range_case(&[5], 2), selection(&[2, 3, 4, 5]));
        assert_eq!(select_range_case(&[0], 0), selection(&[0]));
    }

    #[test]
    fn select_range_without_selection_is_noop() {
        let mut table = six_rows();
        table.goto_id(3);
        table.select_range();
        assert!(table.selection().is_empty());
    }

    #[test]
    fn set_items_relocates_current_by_id() {
        let mut table = six_rows();
        table.goto_id(4);
        table.set_items(vec![entry(9, "new"), entry(4, "kept"), entry(1, "one")]);
        assert_eq!(table.current_id(), Some(4));
        assert_eq!(table.rows(), &[1, 4, 9]);

        table.set_items(vec![entry(7, "other")]);
        assert_eq!(table.current_index(), Some(0));
        assert_eq!(table.current_id(), Some(7));
    }

    #[test]
    fn add_items_upserts_and_rerenders() {
        let mut table = six_rows();
        table.add_items(vec![entry(2, "renamed"), entry(10, "ten")]);
        assert_eq!(table.len(), 7);
        assert_eq!(
            table.rendered_row(2).and_then(|row| row.get("name")).map(String::as_str),
            Some("renamed")
        );
    }

    #[test]
    fn removing_current_moves_cursor_up() {
        let mut table = six_rows();
        table.goto_id(3);
        table.remove_items(&[3]);
        assert_eq!(table.current_id(), Some(2));

        table.goto_top();
        table.remove_items(&[0]);
        assert_eq!(table.current_id(), Some(1));

        table.goto_id(4);
        table.remove_items(&[1]);
        assert_eq!(table.current_id(), Some(4));
        assert!(table.rendered_row(1).is_none());
    }

    #[test]
    fn removing_current_with_rows_above_it_lands_on_nearest_survivor() {
        let mut table = six_rows();
        table.goto_id(3);
        table.remove_items(&[1, 3]);
        assert_eq!(table.rows(), &[0, 2, 4, 5]);
        assert_eq!(table.current_id(), Some(2));

        table.remove_items(&[0, 2]);
        assert_eq!(table.current_id(), Some(4));
        assert_eq!(table.current_index(), Some(0));
    }

    #[test]
    fn removing_everything_clears_cursor() {
        let mut table = six_rows();
        table.remove_items(&[0, 1, 2, 3, 4, 5]);
        assert!(table.is_empty());
        assert_eq!(table.current_index(), None);
        assert_eq!(table.current_id(), None);
        assert!(!table.move_down(1));
    }

    #[test]
    fn moves_clamp_and_keep_viewport() {
        let mut table = table();
        table.set_height(5);
        table.set_items((0..50).map(|id| entry(id, "x")).collect());
        assert_eq!(table.height(), 4);

        table.move_down(100);
        assert_eq!(table.current_index(), Some(49));
        assert_eq!(table.start(), 46);

        table.page_up();
        assert_eq!(table.current_index(), Some(45));
        table.half_page_up();
        assert_eq!(table.current_index(), Some(43));
        assert_eq!(table.start(), 43);

        table.move_up(100);
        assert_eq!(table.current_index(), Some(0));
        assert_eq!(table.start(), 0);

        table.half_page_down();
        table.page_down();
        assert_eq!(table.current_index(), Some(6));
        let start = table.start();
        assert!(start <= 6 && 6 < start + table.height());
    }

    #[test]
    fn goto_unknown_id_is_noop() {
        let mut table = six_rows();
        table.goto_id(2);
        assert!(!table.goto_id(99));
        assert_eq!(table.current_id(), Some(2));
    }

    #[test]
    fn filter_drops_hidden_selection() {
        let mut table = table();
        table.set_height(10);
        table.set_items(vec![
            entry(1, "deploy api"),
            entry(2, "tail logs"),
            entry(3, "deploy web"),
        ]);
        table.select_all();
        table.set_filter("deploy");
        assert_eq!(table.rows(), &[1, 3]);
        assert_eq!(table.selection(), &selection(&[1, 3]));

        table.set_filter("");
        assert_eq!(table.len(), 3);
        assert_eq!(table.selection(), &selection(&[1, 3]));
    }

    fn assert_selection_visible(table: &Table<Entry>) {
        assert!(
            table
                .selection()
                .iter()
                .all(|id| table.rows().contains(id)),
            "selection {:?} escapes rows {:?}",
            table.selection(),
            table.rows()
        );
    }

    #[test]
    fn replacing_and_upserting_items_drop_hidden_selection() {
        let mut table = six_rows();
        table.select_all();
        table.set_items(vec![entry(0, "row 0"), entry(2, "row 2"), entry(4, "row 4")]);
        assert_eq!(table.selection(), &selection(&[0, 2, 4]));
        assert_selection_visible(&table);

        let mut filtered = self::table();
        filtered.set_height(10);
        filtered.set_items(vec![
            entry(1, "deploy api"),
            entry(2, "tail logs"),
            entry(3, "deploy web"),
        ]);
        filtered.set_filter("deploy");
        filtered.select_all();
        filtered.add_items(vec![entry(3, "tail web"), entry(4, "deploy db")]);
        assert_eq!(filtered.rows(), &[1, 4]);
        assert_eq!(filtered.selection(), &selection(&[1]));
        assert_selection_visible(&filtered);
    }

    #[test]
    fn relevance_ordering_puts_exact_hits_first() {
        let mut table = table();
        table.set_height(10);
        table.set_items(vec![entry(1, "a logs"), entry(2, "logs")]);
        table.set_filter("logs");
        assert_eq!(table.rows(), &[2, 1]);

        let mut plain = table.clone().relevance_order(false);
        plain.set_filter("log");
        assert_eq!(plain.rows(), &[1, 2]);
    }

    #[test]
    fn non_selectable_tables_ignore_selection() {
        let mut table = six_rows().selectable(false);
        table.toggle_selection();
        table.select_all();
        assert!(table.selection().is_empty());
    }

    #[test]
    fn sort_edits_reorder_rows() {
        let mut table = table();
        table.set_height(10);
        table.set_items(vec![entry(1, "b"), entry(2, "a"), entry(3, "c")]);
        table.edit_sort(|sort| {
            sort.set_primary_field("name");
            sort.set_primary_direction(SortDirection::Desc);
        });
        assert_eq!(table.rows(), &[3, 1, 2]);
    }

    #[test]
    fn targets_fall_back_to_current_row() {
        let mut table = six_rows();
        table.goto_id(2);
        assert_eq!(table.targets(), vec![2]);
        table.toggle_selection_by_id(4);
        table.toggle_selection_by_id(1);
        assert_eq!(table.targets(), vec![1, 4]);
    }

    #[test]
    fn fit_cell_truncation_strategies() {
        assert_eq!(fit_cell("abcdef", 4, Truncation::Ellipsis, false), "abc…");
        assert_eq!(fit_cell("abcdef", 4, Truncation::Leading, false), "…def");
        assert_eq!(fit_cell("abcdef", 4, Truncation::Clip, false), "abcd");
        assert_eq!(fit_cell("ab", 4, Truncation::Clip, true), "  ab");
        assert_eq!(fit_cell("ab", 0, Truncation::Ellipsis, false), "");
    }

    #[test]
    fn renders_header_rows_and_scrollbar() {
        let mut table = table();
        table.set_height(4);
        table.set_items((1..=10).map(|id| entry(id, &format!("cmd {id}"))).collect());
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        (&table).render(area, &mut buf);

        assert!(buffer_line(&buf, 0).starts_with("id… name"));
        assert!(buffer_line(&buf, 1).starts_with("  1 cmd 1"));
        assert!(buffer_line(&buf, 3).starts_with("  3 cmd 3"));
        assert_eq!(buf[(19, 1)].symbol(), "█");
        assert_eq!(buf[(19, 3)].symbol(), "│");
    }

    #[test]
    fn current_row_takes_edit_style_while_sorting() {
        let mut table = six_rows();
        table.set_focused(true);
        let area = Rect::new(0, 0, 20, 8);

        table.edit_sort(SortState::begin_edit);
        let mut buf = Buffer::empty(area);
        (&table).render(area, &mut buf);
        assert_eq!(buf[(0, 1)].bg, Color::Magenta);
        assert_eq!(buf[(0, 2)].bg, Color::Reset);

        table.edit_sort(SortState::end_edit);
        let mut buf = Buffer::empty(area);
        (&table).render(area, &mut buf);
        assert_eq!(buf[(0, 1)].bg, Color::Cyan);
    }

    #[test]
    fn scrollbar_is_all_track_when_rows_fit() {
        let mut table = table();
        table.set_height(6);
        table.set_items((1..=3).map(|id| entry(id, "fits")).collect());
        let area = Rect::new(0, 0, 10, 6);
        let mut buf = Buffer::empty(area);
        (&table).render(area, &mut buf);
        for y in 1..6 {
            assert_eq!(buf[(9, y)].symbol(), "│");
        }
    }

    #[test]
    fn renders_empty_state() {
        let mut table = table();
        table.set_height(3);
        table.set_items(vec![entry(1, "alpha")]);
        table.set_filter("zzz");
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        (&table).render(area, &mut buf);
        assert!(buffer_line(&buf, 1).starts_with("no matches"));
    }
}
