// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use super::{ALL_COMMANDS, apply_navigation, commands_page};
use crate::event::{Message, Request};
use crate::item::TableItem;
use crate::keys::{TableCommand, table_command_for_key};
use crate::model::{ContentModel, Effect};
use crate::page::Position;
use crate::sort::{SortField, SortState};
use crate::table::{Column, Table};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use shellbook_app::{CommandId, CommandStatus};
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct StatusEntry {
    id: i64,
    label: &'static str,
    count: usize,
}

impl StatusEntry {
    fn status(&self) -> Option<CommandStatus> {
        CommandStatus::from_code(self.id)
    }
}

impl TableItem for StatusEntry {
    fn id(&self) -> i64 {
        self.id
    }

    fn cell(&self, column: &str) -> String {
        match column {
            "count" => self.count.to_string(),
            _ => self.label.to_owned(),
        }
    }

    fn compare_field(&self, other: &Self, _field: &str) -> Ordering {
        self.id.cmp(&other.id)
    }
}

/// Status groups with live counts; Enter opens the matching command list.
pub struct SidebarModel {
    table: Table<StatusEntry>,
    statuses: HashMap<CommandId, CommandStatus>,
}

impl SidebarModel {
    pub fn new() -> Self {
        let sort = SortState::new(vec![SortField::new("id", "order")], "id");
        let table = Table::new(
            vec![
                Column::new("label", "status", 12),
                Column::new("count", "#", 5).right_aligned(),
            ],
            sort,
        )
        .selectable(false);
        let mut model = Self {
            table,
            statuses: HashMap::new(),
        };
        model.refresh_counts();
        model
    }

    fn refresh_counts(&mut self) {
        let mut entries = vec![StatusEntry {
            id: ALL_COMMANDS,
            label: "all",
            count: self.statuses.len(),
        }];
        entries.extend(CommandStatus::ALL.iter().map(|status| StatusEntry {
            id: status.code(),
            label: status.as_str(),
            count: self
                .statuses
                .values()
                .filter(|candidate| *candidate == status)
                .count(),
        }));
        self.table.set_items(entries);
    }

    fn handle_key(&mut self, command: TableCommand) -> Vec<Effect> {
        if apply_navigation(&mut self.table, command) {
            return Vec::new();
        }
        match command {
            TableCommand::Enter => self
                .table
                .current_item()
                .map(|entry| {
                    vec![Effect::Navigate {
                        position: Position::TopRight,
                        page: commands_page(entry.status()),
                        focus: true,
                    }]
                })
                .unwrap_or_default(),
            TableCommand::Reload => vec![Effect::Request(Request::LoadCommands)],
            _ => Vec::new(),
        }
    }
}

impl Default for SidebarModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentModel for SidebarModel {
    fn title(&self) -> String {
        "shellbook".to_owned()
    }

    fn update(&mut self, message: &Message) -> Vec<Effect> {
        match message {
            Message::Key(key) => {
                return table_command_for_key(*key)
                    .map(|command| self.handle_key(command))
                    .unwrap_or_default();
            }
            Message::CommandsLoaded(commands) => {
                self.statuses = commands
                    .iter()
                    .map(|command| (command.id, command.status))
                    .collect();
            }
            Message::CommandLoaded {
                command: Some(command),
                ..
            } => {
                self.statuses.insert(command.id, command.status);
            }
            Message::CommandsChanged { upserted, deleted } => {
                for command in upserted {
                    self.statuses.insert(command.id, command.status);
                }
                for id in deleted {
                    self.statuses.remove(id);
                }
            }
            _ => return Vec::new(),
        }
        self.refresh_counts();
        Vec::new()
    }

    fn set_size(&mut self, _width: u16, height: u16) {
        self.table.set_height(height);
    }

    fn set_focused(&mut self, focused: bool) {
        self.table.set_focused(focused);
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        (&self.table).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::SidebarModel;
    use crate::event::Message;
    use crate::model::{ContentModel, Effect};
    use crate::page::Position;
    use crate::screens::commands_page;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use shellbook_app::CommandStatus;
    use shellbook_testkit::CommandFaker;

    fn key(code: KeyCode) -> Message {
        Message::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn counts_follow_task_results() {
        let mut faker = CommandFaker::new(3);
        let mut commands = faker.commands(4);
        commands[0].status = CommandStatus::Saved;
        commands[1].status = CommandStatus::Archived;
        commands[2].status = CommandStatus::Saved;
        commands[3].status = CommandStatus::Imported;

        let mut model = SidebarModel::new();
        model.set_size(20, 10);
        model.update(&Message::CommandsLoaded(commands.clone()));
        let count = |model: &SidebarModel, id: i64| model.table.item(id).map(|entry| entry.count);
        assert_eq!(count(&model, 0), Some(4));
        assert_eq!(count(&model, CommandStatus::Saved.code()), Some(2));

        model.update(&Message::CommandsChanged {
            upserted: Vec::new(),
            deleted: vec![commands[0].id],
        });
        assert_eq!(count(&model, 0), Some(3));
        assert_eq!(count(&model, CommandStatus::Saved.code()), Some(1));
    }

    #[test]
    fn enter_opens_the_status_list() {
        let mut model = SidebarModel::new();
        model.set_size(20, 10);
        model.update(&key(KeyCode::Char('j')));
        model.update(&key(KeyCode::Char('j')));
        let effects = model.update(&key(KeyCode::Enter));
        assert_eq!(
            effects,
            vec![Effect::Navigate {
                position: Position::TopRight,
                page: commands_page(Some(CommandStatus::Saved)),
                focus: true,
            }]
        );
    }
}
