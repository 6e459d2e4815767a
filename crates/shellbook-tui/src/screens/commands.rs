// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use super::{apply_navigation, detail_page};
use crate::event::{Message, Request};
use crate::item::TableItem;
use crate::keys::{SortCommand, TableCommand, sort_command_for_key, table_command_for_key};
use crate::model::{BorderAnnotations, ContentModel, Effect, PreviewSource};
use crate::page::{Page, Position};
use crate::sort::{SortField, SortState};
use crate::table::{Column, Table, Truncation};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;
use shellbook_app::{Command, CommandId, CommandStatus, SortDirection};
use std::cmp::Ordering;
use time::OffsetDateTime;
use time::macros::format_description;

impl TableItem for Command {
    fn id(&self) -> i64 {
        self.id.get()
    }

    fn cell(&self, column: &str) -> String {
        match column {
            "id" => self.id.to_string(),
            "title" => self.title.clone(),
            "status" => self.status.as_str().to_owned(),
            "lint" => self.lint_status.as_str().to_owned(),
            "elapsed" => format_elapsed(self.elapsed_ms),
            "updated" => format_timestamp(self.updated_at),
            "created" => format_timestamp(self.created_at),
            "script" => self.script_preview().to_owned(),
            _ => String::new(),
        }
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.description.clone(),
            self.script.clone(),
        ]
    }

    fn compare_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "title" => self.title.to_lowercase().cmp(&other.title.to_lowercase()),
            "status" => self.status.code().cmp(&other.status.code()),
            "lint" => self.lint_status.cmp(&other.lint_status),
            "elapsed" => self.elapsed_ms.cmp(&other.elapsed_ms),
            "updated" => self.updated_at.cmp(&other.updated_at),
            "created" => self.created_at.cmp(&other.created_at),
            "script" => self.script.cmp(&other.script),
            _ => self.id.cmp(&other.id),
        }
    }
}

pub fn format_elapsed(elapsed_ms: Option<i64>) -> String {
    match elapsed_ms {
        None => String::new(),
        Some(ms) if ms < 1_000 => format!("{ms}ms"),
        Some(ms) if ms < 60_000 => format!("{:.1}s", ms as f64 / 1_000.0),
        Some(ms) => format!("{}m{:02}s", ms / 60_000, (ms % 60_000) / 1_000),
    }
}

pub fn format_timestamp(value: OffsetDateTime) -> String {
    value
        .format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .unwrap_or_default()
}

fn command_columns() -> Vec<Column> {
    vec![
        Column::new("id", "id", 4)
            .right_aligned()
            .truncation(Truncation::Clip),
        Column::new("title", "title", 24),
        Column::new("status", "status", 9),
        Column::new("lint", "lint", 9),
        Column::new("elapsed", "took", 7).right_aligned(),
        Column::new("updated", "updated", 16).truncation(Truncation::Clip),
        Column::new("script", "script", 48),
    ]
}

fn command_sort() -> SortState {
    let mut sort = SortState::new(
        vec![
            SortField::new("id", "id"),
            SortField::new("title", "title"),
            SortField::new("status", "status"),
            SortField::new("lint", "lint"),
            SortField::new("elapsed", "took"),
            SortField::new("updated", "updated"),
            SortField::new("created", "created"),
        ],
        "id",
    );
    sort.set_primary_field("updated");
    sort.set_primary_direction(SortDirection::Desc);
    sort
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Filter,
    Sort,
}

/// Commands, optionally limited to one status.
pub struct CommandListModel {
    status: Option<CommandStatus>,
    table: Table<Command>,
    mode: Mode,
    filter_input: String,
}

impl CommandListModel {
    pub fn new(status: Option<CommandStatus>, relevance_order: bool) -> Self {
        let table = Table::new(command_columns(), command_sort())
            .relevance_order(relevance_order)
            .empty_message("no commands; press i to import shell history");
        Self {
            status,
            table,
            mode: Mode::Normal,
            filter_input: String::new(),
        }
    }

    pub fn table(&self) -> &Table<Command> {
        &self.table
    }

    fn shows(&self, command: &Command) -> bool {
        self.status.is_none_or(|status| command.status == status)
    }

    fn upsert(&mut self, commands: &[Command]) {
        let (shown, hidden): (Vec<&Command>, Vec<&Command>) =
            commands.iter().partition(|command| self.shows(command));
        let hidden = hidden
            .into_iter()
            .map(|command| command.id.get())
            .collect::<Vec<_>>();
        if !hidden.is_empty() {
            self.table.remove_items(&hidden);
        }
        if !shown.is_empty() {
            self.table.add_items(shown.into_iter().cloned().collect());
        }
    }

    fn targets(&self) -> Vec<CommandId> {
        self.table.targets().into_iter().map(CommandId::new).collect()
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Filter => {
                self.handle_filter_key(key);
                Vec::new()
            }
            Mode::Sort => {
                self.handle_sort_key(key);
                Vec::new()
            }
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.code == KeyCode::Esc && !self.table.filter().is_empty() {
            self.filter_input.clear();
            self.table.set_filter("");
            return Vec::new();
        }
        let Some(command) = table_command_for_key(key) else {
            return Vec::new();
        };
        if apply_navigation(&mut self.table, command) {
            return Vec::new();
        }
        match command {
            TableCommand::Enter => self
                .table
                .current_id()
                .map(|id| {
                    vec![Effect::Navigate {
                        position: Position::BottomRight,
                        page: detail_page(CommandId::new(id)),
                        focus: true,
                    }]
                })
                .unwrap_or_default(),
            TableCommand::Delete => self.request_for_targets(Request::DeleteCommands),
            TableCommand::Archive => self.request_for_targets(|ids| Request::SetStatus {
                ids,
                status: CommandStatus::Archived,
            }),
            TableCommand::Save => self.request_for_targets(|ids| Request::SetStatus {
                ids,
                status: CommandStatus::Saved,
            }),
            TableCommand::Reload => vec![Effect::Request(Request::LoadCommands)],
            TableCommand::EditSort => {
                self.mode = Mode::Sort;
                self.table.edit_sort(SortState::begin_edit);
                Vec::new()
            }
            TableCommand::Filter => {
                self.mode = Mode::Filter;
                self.filter_input = self.table.filter().to_owned();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn request_for_targets(&self, request: impl FnOnce(Vec<CommandId>) -> Request) -> Vec<Effect> {
        let ids = self.targets();
        if ids.is_empty() {
            return Vec::new();
        }
        vec![Effect::Request(request(ids))]
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.filter_input.clear();
                self.mode = Mode::Normal;
            }
            KeyCode::Enter => self.mode = Mode::Normal,
            KeyCode::Backspace => {
                self.filter_input.pop();
            }
            KeyCode::Down => {
                self.table.move_down(1);
            }
            KeyCode::Up => {
                self.table.move_up(1);
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.filter_input.push(c);
            }
            _ => return,
        }
        let filter = self.filter_input.clone();
        self.table.set_filter(&filter);
    }

    fn handle_sort_key(&mut self, key: KeyEvent) {
        let Some(command) = sort_command_for_key(key) else {
            return;
        };
        match command {
            SortCommand::NextPosition => self.table.edit_sort(SortState::next_position),
            SortCommand::PrevPosition => self.table.edit_sort(SortState::prev_position),
            SortCommand::Increase => self.table.edit_sort(|sort| sort.cycle_value(1)),
            SortCommand::Decrease => self.table.edit_sort(|sort| sort.cycle_value(-1)),
            SortCommand::Done => {
                self.mode = Mode::Normal;
                self.table.edit_sort(SortState::end_edit);
            }
        }
    }

    fn header_line(&self) -> Line<'static> {
        match self.mode {
            Mode::Filter => Line::from(vec![
                Span::styled("/", Style::default().fg(Color::Cyan)),
                Span::raw(self.filter_input.clone()),
                Span::styled("▏", Style::default().fg(Color::Cyan)),
            ]),
            Mode::Normal | Mode::Sort => {
                let mut line = self.table.sort().indicator();
                if !self.table.filter().is_empty() {
                    line.spans.push(Span::styled(
                        format!("  /{}", self.table.filter()),
                        Style::default().fg(Color::Yellow),
                    ));
                }
                line
            }
        }
    }
}

impl ContentModel for CommandListModel {
    fn title(&self) -> String {
        match self.status {
            Some(status) => format!("{} commands", status.as_str()),
            None => "all commands".to_owned(),
        }
    }

    fn init(&mut self) -> Vec<Request> {
        vec![Request::LoadCommands]
    }

    fn update(&mut self, message: &Message) -> Vec<Effect> {
        match message {
            Message::Key(key) => return self.handle_key(*key),
            Message::CommandsLoaded(commands) => {
                let shown = commands
                    .iter()
                    .filter(|command| self.shows(command))
                    .cloned()
                    .collect();
                self.table.set_items(shown);
            }
            Message::CommandLoaded {
                command: Some(command),
                ..
            } => self.upsert(std::slice::from_ref(command)),
            Message::CommandsChanged { upserted, deleted } => {
                self.upsert(upserted);
                let deleted = deleted.iter().map(|id| id.get()).collect::<Vec<_>>();
                if !deleted.is_empty() {
                    self.table.remove_items(&deleted);
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn set_size(&mut self, _width: u16, height: u16) {
        self.table.set_height(height.saturating_sub(1));
    }

    fn set_focused(&mut self, focused: bool) {
        self.table.set_focused(focused);
    }

    fn captures_input(&self) -> bool {
        self.mode != Mode::Normal
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        buf.set_line(area.x, area.y, &self.header_line(), area.width);
        let body = Rect {
            y: area.y + 1,
            height: area.height - 1,
            ..area
        };
        (&self.table).render(body, buf);
    }

    fn preview(&self) -> Option<&dyn PreviewSource> {
        Some(self)
    }

    fn border(&self) -> Option<&dyn BorderAnnotations> {
        Some(self)
    }
}

impl PreviewSource for CommandListModel {
    fn preview_page(&self) -> Option<Page> {
        self.table
            .current_id()
            .map(|id| detail_page(CommandId::new(id)))
    }
}

impl BorderAnnotations for CommandListModel {
    fn border_labels(&self) -> Vec<String> {
        let mut labels = vec![format!("{}/{}", self.table.len(), self.table.total())];
        let selected = self.table.selection().len();
        if selected > 0 {
            labels.push(format!("{selected} selected"));
        }
        if self.mode == Mode::Sort {
            labels.push("editing sort".to_owned());
        }
        labels
    }
}
