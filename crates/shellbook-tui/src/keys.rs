// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneCommand {
    NextPane,
    PrevPane,
    GrowWidth,
    ShrinkWidth,
    GrowHeight,
    ShrinkHeight,
    Close,
    Back,
    Help,
    ImportHistory,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableCommand {
    MoveRow(isize),
    PageDown,
    PageUp,
    HalfPageDown,
    HalfPageUp,
    Top,
    Bottom,
    ToggleSelection,
    SelectAll,
    ClearSelection,
    SelectRange,
    Enter,
    Delete,
    Reload,
    EditSort,
    Filter,
    Archive,
    Save,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortCommand {
    NextPosition,
    PrevPosition,
    Increase,
    Decrease,
    Done,
}

pub fn pane_command_for_key(key: KeyEvent) -> Option<PaneCommand> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(PaneCommand::Quit)
        }
        (KeyCode::Char('q'), KeyModifiers::NONE) => Some(PaneCommand::Quit),
        (KeyCode::Tab, _) => Some(PaneCommand::NextPane),
        (KeyCode::BackTab, _) => Some(PaneCommand::PrevPane),
        (KeyCode::Char('>'), _) => Some(PaneCommand::GrowWidth),
        (KeyCode::Char('<'), _) => Some(PaneCommand::ShrinkWidth),
        (KeyCode::Char('+'), _) => Some(PaneCommand::GrowHeight),
        (KeyCode::Char('-'), _) => Some(PaneCommand::ShrinkHeight),
        (KeyCode::Char('x'), KeyModifiers::NONE) => Some(PaneCommand::Close),
        (KeyCode::Backspace, _) | (KeyCode::Char('b'), KeyModifiers::NONE) => {
            Some(PaneCommand::Back)
        }
        (KeyCode::Char('?'), _) => Some(PaneCommand::Help),
        (KeyCode::Char('i'), KeyModifiers::NONE) => Some(PaneCommand::ImportHistory),
        _ => None,
    }
}

pub fn table_command_for_key(key: KeyEvent) -> Option<TableCommand> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
            Some(TableCommand::MoveRow(1))
        }
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
            Some(TableCommand::MoveRow(-1))
        }
        (KeyCode::Char('d'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(TableCommand::HalfPageDown)
        }
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(TableCommand::HalfPageUp)
        }
        (KeyCode::Char('a'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(TableCommand::SelectAll)
        }
        (KeyCode::PageDown, _) => Some(TableCommand::PageDown),
        (KeyCode::PageUp, _) => Some(TableCommand::PageUp),
        (KeyCode::Char('g'), _) | (KeyCode::Home, _) => Some(TableCommand::Top),
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => Some(TableCommand::Bottom),
        (KeyCode::Char(' '), _) => Some(TableCommand::ToggleSelection),
        (KeyCode::Char('c'), KeyModifiers::NONE) => Some(TableCommand::ClearSelection),
        (KeyCode::Char('v'), KeyModifiers::NONE) => Some(TableCommand::SelectRange),
        (KeyCode::Enter, _) => Some(TableCommand::Enter),
        (KeyCode::Char('d'), KeyModifiers::NONE) | (KeyCode::Delete, _) => {
            Some(TableCommand::Delete)
        }
        (KeyCode::Char('r'), KeyModifiers::NONE) => Some(TableCommand::Reload),
        (KeyCode::Char('s'), KeyModifiers::NONE) => Some(TableCommand::EditSort),
        (KeyCode::Char('/'), _) => Some(TableCommand::Filter),
        (KeyCode::Char('A'), _) => Some(TableCommand::Archive),
        (KeyCode::Char('S'), _) => Some(TableCommand::Save),
        _ => None,
    }
}

pub fn sort_command_for_key(key: KeyEvent) -> Option<SortCommand> {
    match key.code {
        KeyCode::Tab => Some(SortCommand::NextPosition),
        KeyCode::BackTab => Some(SortCommand::PrevPosition),
        KeyCode::Down | KeyCode::Char('j') => Some(SortCommand::Increase),
        KeyCode::Up | KeyCode::Char('k') => Some(SortCommand::Decrease),
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('s') => Some(SortCommand::Done),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        PaneCommand, SortCommand, TableCommand, pane_command_for_key, sort_command_for_key,
        table_command_for_key,
    };
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn control_chords_differ_from_plain_keys() {
        assert_eq!(table_command_for_key(ctrl('d')), Some(TableCommand::HalfPageDown));
        assert_eq!(
            table_command_for_key(key(KeyCode::Char('d'))),
            Some(TableCommand::Delete)
        );
        assert_eq!(pane_command_for_key(ctrl('c')), Some(PaneCommand::Quit));
        assert_eq!(
            table_command_for_key(key(KeyCode::Char('c'))),
            Some(TableCommand::ClearSelection)
        );
    }

    #[test]
    fn pane_and_table_keys_do_not_overlap() {
        for c in ['j', 'k', 'g', 'G', ' ', 'c', 'v', 'd', 'r', 's', '/', 'A', 'S'] {
            let event = key(KeyCode::Char(c));
            assert!(table_command_for_key(event).is_some(), "{c}");
            assert_eq!(pane_command_for_key(event), None, "{c}");
        }
    }

    #[test]
    fn shifted_status_keys() {
        let shifted = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(table_command_for_key(shifted), Some(TableCommand::Archive));
    }

    #[test]
    fn sort_editing_keys() {
        assert_eq!(
            sort_command_for_key(key(KeyCode::Tab)),
            Some(SortCommand::NextPosition)
        );
        assert_eq!(
            sort_command_for_key(key(KeyCode::Esc)),
            Some(SortCommand::Done)
        );
        assert_eq!(sort_command_for_key(key(KeyCode::Char('x'))), None);
    }
}
