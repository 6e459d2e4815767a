// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod commands;
pub mod detail;
pub mod help;
pub mod sidebar;

use crate::item::TableItem;
use crate::keys::TableCommand;
use crate::model::ContentModel;
use crate::page::{Kind, Page};
use crate::pane::PaneManager;
use crate::table::Table;
use anyhow::anyhow;
use shellbook_app::{CommandId, CommandStatus};

/// Page id of the command list that shows every status.
pub const ALL_COMMANDS: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenOptions {
    pub relevance_order: bool,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            relevance_order: true,
        }
    }
}

pub fn commands_page(status: Option<CommandStatus>) -> Page {
    Page::with_id(Kind::Commands, status.map_or(ALL_COMMANDS, CommandStatus::code))
}

pub fn detail_page(id: CommandId) -> Page {
    Page::with_id(Kind::CommandDetail, id.get())
}

/// Installs a factory for every page kind.
pub fn register(panes: &mut PaneManager, options: ScreenOptions) {
    panes.register(Kind::Sidebar, |_, width, height| {
        let mut model = sidebar::SidebarModel::new();
        model.set_size(width, height);
        Ok(Some(Box::new(model) as Box<dyn ContentModel>))
    });
    panes.register(Kind::Commands, move |page, width, height| {
        let status = match page.id {
            None | Some(ALL_COMMANDS) => None,
            Some(code) => Some(
                CommandStatus::from_code(code)
                    .ok_or_else(|| anyhow!("unknown command status code {code}"))?,
            ),
        };
        let mut model = commands::CommandListModel::new(status, options.relevance_order);
        model.set_size(width, height);
        Ok(Some(Box::new(model) as Box<dyn ContentModel>))
    });
    panes.register(Kind::CommandDetail, |page, width, height| {
        let Some(id) = page.id else {
            return Ok(None);
        };
        let mut model = detail::CommandDetailModel::new(CommandId::new(id));
        model.set_size(width, height);
        Ok(Some(Box::new(model) as Box<dyn ContentModel>))
    });
    panes.register(Kind::Help, |_, width, height| {
        let mut model = help::HelpModel::new();
        model.set_size(width, height);
        Ok(Some(Box::new(model) as Box<dyn ContentModel>))
    });
}

/// Applies cursor and selection commands. Returns false for commands the
/// caller has to handle itself.
pub(crate) fn apply_navigation<V: TableItem>(table: &mut Table<V>, command: TableCommand) -> bool {
    match command {
        TableCommand::MoveRow(delta) if delta < 0 => {
            table.move_up(delta.unsigned_abs());
        }
        TableCommand::MoveRow(delta) => {
            table.move_down(delta.unsigned_abs());
        }
        TableCommand::PageDown => {
            table.page_down();
        }
        TableCommand::PageUp => {
            table.page_up();
        }
        TableCommand::HalfPageDown => {
            table.half_page_down();
        }
        TableCommand::HalfPageUp => {
            table.half_page_up();
        }
        TableCommand::Top => {
            table.goto_top();
        }
        TableCommand::Bottom => {
            table.goto_bottom();
        }
        TableCommand::ToggleSelection => table.toggle_selection(),
        TableCommand::SelectAll => table.select_all(),
        TableCommand::ClearSelection => table.deselect_all(),
        TableCommand::SelectRange => table.select_range(),
        _ => return false,
    }
    true
}

/// Scroll offset for text views after applying a movement command.
pub(crate) fn scroll_for(command: TableCommand, scroll: usize, height: usize, lines: usize) -> usize {
    let max = lines.saturating_sub(height.max(1));
    let half = height.div_ceil(2).max(1);
    let next = match command {
        TableCommand::MoveRow(delta) => scroll.saturating_add_signed(delta),
        TableCommand::PageDown => scroll.saturating_add(height.max(1)),
        TableCommand::PageUp => scroll.saturating_sub(height.max(1)),
        TableCommand::HalfPageDown => scroll.saturating_add(half),
        TableCommand::HalfPageUp => scroll.saturating_sub(half),
        TableCommand::Top => 0,
        TableCommand::Bottom => max,
        _ => scroll,
    };
    next.min(max)
}

#[cfg(test)]
mod tests {
    use super::{commands_page, scroll_for};
    use crate::keys::TableCommand;
    use crate::page::{Kind, Page};
    use shellbook_app::CommandStatus;

    #[test]
    fn command_pages_are_keyed_by_status_code() {
        assert_eq!(commands_page(None), Page::with_id(Kind::Commands, 0));
        assert_eq!(
            commands_page(Some(CommandStatus::Archived)),
            Page::with_id(Kind::Commands, CommandStatus::Archived.code())
        );
    }

    #[test]
    fn text_scroll_stays_in_range() {
        assert_eq!(scroll_for(TableCommand::MoveRow(-1), 0, 5, 20), 0);
        assert_eq!(scroll_for(TableCommand::Bottom, 0, 5, 20), 15);
        assert_eq!(scroll_for(TableCommand::PageDown, 12, 5, 20), 15);
        assert_eq!(scroll_for(TableCommand::HalfPageDown, 0, 5, 20), 3);
        assert_eq!(scroll_for(TableCommand::MoveRow(1), 0, 5, 3), 0);
    }
}
