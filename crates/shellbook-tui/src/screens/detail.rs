// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use super::commands::{format_elapsed, format_timestamp};
use super::scroll_for;
use crate::event::{Message, Request};
use crate::keys::table_command_for_key;
use crate::model::{BorderAnnotations, ContentModel, Effect};
use crate::viewport;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use shellbook_app::{Command, CommandId, LintLevel};

/// One command in full: metadata, description, script and lint findings.
pub struct CommandDetailModel {
    id: CommandId,
    command: Option<Command>,
    missing: bool,
    scroll: usize,
    height: usize,
}

impl CommandDetailModel {
    pub fn new(id: CommandId) -> Self {
        Self {
            id,
            command: None,
            missing: false,
            scroll: 0,
            height: 1,
        }
    }

    pub fn command(&self) -> Option<&Command> {
        self.command.as_ref()
    }

    pub const fn scroll(&self) -> usize {
        self.scroll
    }

    fn replace(&mut self, command: Option<Command>) {
        self.missing = command.is_none();
        self.command = command;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn max_scroll(&self) -> usize {
        self.lines().len().saturating_sub(self.height)
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let label = Style::default().fg(Color::DarkGray);
        let Some(command) = &self.command else {
            let text = if self.missing {
                format!("command {} no longer exists", self.id)
            } else {
                "loading…".to_owned()
            };
            return vec![Line::styled(text, label)];
        };

        let field = |name: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("{name:<9}"), label),
                Span::raw(value),
            ])
        };
        let mut lines = vec![
            Line::styled(
                command.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            field("status", command.status.as_str().to_owned()),
            field("lint", command.lint_status.as_str().to_owned()),
        ];
        if command.elapsed_ms.is_some() {
            lines.push(field("took", format_elapsed(command.elapsed_ms)));
        }
        lines.push(field("created", format_timestamp(command.created_at)));
        lines.push(field("updated", format_timestamp(command.updated_at)));

        if !command.description.is_empty() {
            lines.push(Line::default());
            lines.extend(command.description.lines().map(|line| Line::raw(line.to_owned())));
        }

        lines.push(Line::default());
        lines.push(Line::styled("script", label));
        lines.extend(command.script.lines().map(|line| {
            Line::styled(format!("  {line}"), Style::default().fg(Color::Green))
        }));

        if !command.lint_issues.is_empty() {
            lines.push(Line::default());
            lines.push(Line::styled("lint issues", label));
            for issue in &command.lint_issues {
                let color = match issue.level {
                    LintLevel::Error => Color::Red,
                    LintLevel::Warning => Color::Yellow,
                    LintLevel::Info | LintLevel::Style => Color::Blue,
                };
                lines.push(Line::from(vec![
                    Span::raw(format!("  {}:{} ", issue.line, issue.column)),
                    Span::styled(issue.level.as_str().to_owned(), Style::default().fg(color)),
                    Span::raw(format!(" SC{} {}", issue.code, issue.message)),
                ]));
            }
        }
        lines
    }
}

impl ContentModel for CommandDetailModel {
    fn title(&self) -> String {
        match &self.command {
            Some(command) => format!("#{} {}", self.id, command.title),
            None => format!("command #{}", self.id),
        }
    }

    fn init(&mut self) -> Vec<Request> {
        vec![Request::LoadCommand(self.id)]
    }

    fn update(&mut self, message: &Message) -> Vec<Effect> {
        match message {
            Message::Key(key) => {
                if let Some(command) = table_command_for_key(*key) {
                    let lines = self.lines().len();
                    self.scroll = scroll_for(command, self.scroll, self.height, lines);
                }
            }
            Message::CommandLoaded { id, command } if *id == self.id => {
                self.replace(command.clone());
            }
            Message::CommandsLoaded(commands) => {
                if let Some(command) = commands.iter().find(|command| command.id == self.id) {
                    self.replace(Some(command.clone()));
                }
            }
            Message::CommandsChanged { upserted, deleted } => {
                if let Some(command) = upserted.iter().find(|command| command.id == self.id) {
                    self.replace(Some(command.clone()));
                }
                if deleted.contains(&self.id) {
                    self.replace(None);
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn set_size(&mut self, _width: u16, height: u16) {
        self.height = usize::from(height).max(1);
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let lines = self.lines();
        let total = lines.len();
        let text_area = Rect {
            width: area.width.saturating_sub(1),
            ..area
        };
        Paragraph::new(lines)
            .scroll((u16::try_from(self.scroll).unwrap_or(u16::MAX), 0))
            .render(text_area, buf);

        let track = usize::from(area.height);
        if total > track {
            let x = area.x + area.width - 1;
            for (offset, glyph) in viewport::scrollbar_glyphs(self.scroll, track, total, track)
                .into_iter()
                .enumerate()
            {
                buf.set_string(
                    x,
                    area.y + offset as u16,
                    glyph,
                    Style::default().fg(Color::DarkGray),
                );
            }
        }
    }

    fn border(&self) -> Option<&dyn BorderAnnotations> {
        Some(self)
    }
}

impl BorderAnnotations for CommandDetailModel {
    fn border_labels(&self) -> Vec<String> {
        self.command
            .as_ref()
            .map(|command| {
                let mut labels = vec![format!("lint {}", command.lint_status.as_str())];
                if !command.lint_issues.is_empty() {
                    labels.push(format!("{} issues", command.lint_issues.len()));
                }
                labels
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::CommandDetailModel;
    use crate::event::{Message, Request};
    use crate::model::ContentModel;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use shellbook_testkit::CommandFaker;

    #[test]
    fn loads_its_command_and_ignores_others() {
        let mut faker = CommandFaker::new(5);
        let command = faker.command();
        let other = faker.command();
        let mut model = CommandDetailModel::new(command.id);
        assert_eq!(model.init(), vec![Request::LoadCommand(command.id)]);

        model.update(&Message::CommandLoaded {
            id: other.id,
            command: Some(other.clone()),
        });
        assert!(model.command().is_none());

        model.update(&Message::CommandLoaded {
            id: command.id,
            command: Some(command.clone()),
        });
        assert_eq!(model.command(), Some(&command));
        assert!(model.title().contains(&command.title));
    }

    #[test]
    fn deletion_clears_the_view() {
        let mut faker = CommandFaker::new(5);
        let command = faker.command();
        let mut model = CommandDetailModel::new(command.id);
        model.update(&Message::CommandsLoaded(vec![command.clone()]));
        model.update(&Message::CommandsChanged {
            upserted: Vec::new(),
            deleted: vec![command.id],
        });
        assert!(model.command().is_none());
    }

    #[test]
    fn scrolling_is_bounded_by_content() {
        let mut faker = CommandFaker::new(9);
        let mut command = faker.command();
        command.script = (0..40).map(|n| format!("echo {n}")).collect::<Vec<_>>().join("\n");
        let mut model = CommandDetailModel::new(command.id);
        model.set_size(40, 10);
        model.update(&Message::CommandsLoaded(vec![command]));

        let key = |code| Message::Key(KeyEvent::new(code, KeyModifiers::NONE));
        model.update(&key(KeyCode::Char('G')));
        let bottom = model.scroll();
        assert!(bottom > 0);
        model.update(&key(KeyCode::Char('j')));
        assert_eq!(model.scroll(), bottom);
        model.update(&key(KeyCode::Char('g')));
        assert_eq!(model.scroll(), 0);
    }
}
