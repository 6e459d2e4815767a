// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::event::{Message, Request, plural};
use crate::keys::{PaneCommand, pane_command_for_key};
use crate::model::Effect;
use crate::page::{Kind, Page, Position};
use crate::pane::{LayoutConfig, PaneManager};
use crate::screens::{self, ScreenOptions, commands_page};
use crate::tasks::TaskRunner;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use log::{info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use std::io;
use std::sync::mpsc::Receiver;
use std::time::Duration;

const STATUS_HINT: &str = "? help · tab panes · / filter · q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub layout: LayoutConfig,
    pub screens: ScreenOptions,
}

/// Top-level state: the panes plus a transient status line.
pub struct App {
    panes: PaneManager,
    status: Option<String>,
    status_token: u64,
    quit: bool,
}

impl App {
    pub fn new(options: AppOptions) -> Self {
        let mut panes = PaneManager::new(options.layout);
        screens::register(&mut panes, options.screens);
        Self {
            panes,
            status: None,
            status_token: 0,
            quit: false,
        }
    }

    pub fn panes(&self) -> &PaneManager {
        &self.panes
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub const fn should_quit(&self) -> bool {
        self.quit
    }

    /// Opens the sidebar and the full command list for a terminal of the
    /// given size.
    pub fn start(&mut self, width: u16, height: u16) -> Vec<Request> {
        self.panes.set_area(pane_area(width, height));
        let mut requests = Vec::new();
        let opened = self
            .panes
            .navigate(Position::Left, Page::new(Kind::Sidebar), true)
            .and_then(|mut sidebar| {
                let list = self
                    .panes
                    .navigate(Position::TopRight, commands_page(None), false)?;
                sidebar.extend(list);
                Ok(sidebar)
            });
        match opened {
            Ok(opened) => requests.extend(opened),
            Err(error) => self.report(&error, &mut requests),
        }
        requests
    }

    pub fn update(&mut self, message: Message) -> Vec<Request> {
        let mut requests = Vec::new();
        match &message {
            Message::Key(key) => self.handle_key(*key, &mut requests),
            Message::Resize { width, height } => {
                self.panes.set_area(pane_area(*width, *height));
            }
            Message::ClearStatus { token } => {
                if *token == self.status_token {
                    self.status = None;
                }
            }
            Message::Failed { context, error } => {
                self.set_status(format!("{context} failed: {error}"), &mut requests);
            }
            data => {
                let effects = self.panes.broadcast(data);
                self.apply_effects(effects, &mut requests);
                if let Some(summary) = change_summary(data) {
                    self.set_status(summary, &mut requests);
                }
            }
        }

        match self.panes.sync_preview() {
            Ok(preview) => requests.extend(preview),
            Err(error) => self.report(&error, &mut requests),
        }
        requests
    }

    pub fn render(&self, frame: &mut ratatui::Frame<'_>) {
        self.panes.render(frame.buffer_mut());

        let area = frame.area();
        if area.height == 0 {
            return;
        }
        let line = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
        let status = match &self.status {
            Some(status) => Paragraph::new(status.as_str()).style(Style::default().fg(Color::Yellow)),
            None => Paragraph::new(STATUS_HINT).style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(status, line);
    }

    fn handle_key(&mut self, key: KeyEvent, requests: &mut Vec<Request>) {
        if !self.panes.focused_captures_input()
            && let Some(command) = pane_command_for_key(key)
        {
            self.apply_pane_command(command, requests);
            return;
        }
        let effects = self.panes.route_to_focused(&Message::Key(key));
        self.apply_effects(effects, requests);
    }

    fn apply_pane_command(&mut self, command: PaneCommand, requests: &mut Vec<Request>) {
        let step = self.panes.resize_step();
        let outcome = match command {
            PaneCommand::Quit => {
                self.quit = true;
                Ok(Vec::new())
            }
            PaneCommand::NextPane => {
                self.panes.focus_next();
                Ok(Vec::new())
            }
            PaneCommand::PrevPane => {
                self.panes.focus_prev();
                Ok(Vec::new())
            }
            PaneCommand::GrowWidth => {
                self.panes.resize_width(step);
                Ok(Vec::new())
            }
            PaneCommand::ShrinkWidth => {
                self.panes.resize_width(-step);
                Ok(Vec::new())
            }
            PaneCommand::GrowHeight => {
                self.panes.resize_height(step);
                Ok(Vec::new())
            }
            PaneCommand::ShrinkHeight => {
                self.panes.resize_height(-step);
                Ok(Vec::new())
            }
            PaneCommand::Close => self.panes.close_focused().map(|()| Vec::new()),
            PaneCommand::Back => self.panes.back(),
            PaneCommand::Help => {
                self.panes
                    .navigate(Position::TopRight, Page::new(Kind::Help), false)
            }
            PaneCommand::ImportHistory => {
                self.set_status("importing shell history…", requests);
                Ok(vec![Request::ImportHistory])
            }
        };
        match outcome {
            Ok(more) => requests.extend(more),
            Err(error) => self.report(&error, requests),
        }
    }

    fn apply_effects(&mut self, effects: Vec<Effect>, requests: &mut Vec<Request>) {
        for effect in effects {
            match effect {
                Effect::Request(request) => requests.push(request),
                Effect::Navigate {
                    position,
                    page,
                    focus,
                } => match self.panes.navigate(position, page, !focus) {
                    Ok(more) => requests.extend(more),
                    Err(error) => self.report(&error, requests),
                },
                Effect::Status(status) => self.set_status(status, requests),
            }
        }
    }

    fn report(&mut self, error: &anyhow::Error, requests: &mut Vec<Request>) {
        warn!("{error:#}");
        self.set_status(format!("{error:#}"), requests);
    }

    fn set_status(&mut self, status: impl Into<String>, requests: &mut Vec<Request>) {
        self.status = Some(status.into());
        self.status_token = self.status_token.saturating_add(1);
        requests.push(Request::ClearStatus {
            token: self.status_token,
        });
    }
}

fn pane_area(width: u16, height: u16) -> Rect {
    Rect::new(0, 0, width, height.saturating_sub(1))
}

fn change_summary(message: &Message) -> Option<String> {
    let Message::CommandsChanged { upserted, deleted } = message else {
        return None;
    };
    let summary = match (upserted.len(), deleted.len()) {
        (0, 0) => "nothing changed".to_owned(),
        (0, removed) => format!("deleted {}", plural(removed, "command")),
        (changed, 0) => format!("updated {}", plural(changed, "command")),
        (changed, removed) => format!(
            "updated {}, deleted {removed}",
            plural(changed, "command")
        ),
    };
    Some(summary)
}

/// Runs the terminal UI until the user quits. Requests go to `runner`;
/// their results come back on `results`.
pub fn run_app(app: &mut App, runner: &TaskRunner, results: &Receiver<Message>) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let size = terminal.size().context("read terminal size")?;
    for request in app.start(size.width, size.height) {
        runner.dispatch(request);
    }
    info!("ui started at {}x{}", size.width, size.height);

    let result = event_loop(app, runner, results, &mut terminal);

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn event_loop(
    app: &mut App,
    runner: &TaskRunner,
    results: &Receiver<Message>,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        while let Ok(message) = results.try_recv() {
            for request in app.update(message) {
                runner.dispatch(request);
            }
        }
        if app.should_quit() {
            return Ok(());
        }

        terminal
            .draw(|frame| app.render(frame))
            .context("draw frame")?;

        if !event::poll(Duration::from_millis(120)).context("poll event")? {
            continue;
        }
        let message = match event::read().context("read event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Message::Key(key),
            Event::Resize(width, height) => Message::Resize { width, height },
            _ => continue,
        };
        for request in app.update(message) {
            runner.dispatch(request);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::change_summary;
    use crate::event::Message;
    use shellbook_app::CommandId;

    #[test]
    fn summaries_describe_changes() {
        let deleted = Message::CommandsChanged {
            upserted: Vec::new(),
            deleted: vec![CommandId::new(1), CommandId::new(2)],
        };
        assert_eq!(change_summary(&deleted).as_deref(), Some("deleted 2 commands"));
        assert_eq!(change_summary(&Message::CommandsLoaded(Vec::new())), None);
    }
}
