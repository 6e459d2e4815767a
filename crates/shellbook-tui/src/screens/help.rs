// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use super::scroll_for;
use crate::event::Message;
use crate::keys::table_command_for_key;
use crate::model::{ContentModel, Effect};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::{Paragraph, Widget};

const HELP_TEXT: &str = "\
panes
  tab / shift-tab    next / previous pane
  < >                narrower / wider sidebar
  - +                shorter / taller top pane
  x                  close pane
  b / backspace      back
  ?                  this help
  q / ctrl-c         quit

tables
  j k / up down      move
  pgup pgdn          page
  ctrl-u ctrl-d      half page
  g G / home end     top / bottom
  space              toggle selection
  ctrl-a             select all
  c                  clear selection
  v                  select range
  enter              open
  /                  filter (esc clears)
  s                  edit sort (tab moves, j k change)
  r                  reload

commands
  S                  save
  A                  archive
  d / delete         delete
  i                  import shell history";

pub struct HelpModel {
    scroll: usize,
    height: usize,
}

impl HelpModel {
    pub fn new() -> Self {
        Self {
            scroll: 0,
            height: 1,
        }
    }
}

impl Default for HelpModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentModel for HelpModel {
    fn title(&self) -> String {
        "help".to_owned()
    }

    fn update(&mut self, message: &Message) -> Vec<Effect> {
        if let Message::Key(key) = message
            && let Some(command) = table_command_for_key(*key)
        {
            let lines = HELP_TEXT.lines().count();
            self.scroll = scroll_for(command, self.scroll, self.height, lines);
        }
        Vec::new()
    }

    fn set_size(&mut self, _width: u16, height: u16) {
        self.height = usize::from(height).max(1);
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(HELP_TEXT)
            .scroll((u16::try_from(self.scroll).unwrap_or(u16::MAX), 0))
            .render(area, buf);
    }
}
