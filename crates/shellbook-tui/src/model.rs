// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::event::{Message, Request};
use crate::page::{Page, Position};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

/// What a model asks the app to do after handling a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Request(Request),
    Navigate {
        position: Position,
        page: Page,
        focus: bool,
    },
    Status(String),
}

/// Content shown inside one pane.
pub trait ContentModel {
    fn title(&self) -> String;

    /// Requests to run once, right after the model is built.
    fn init(&mut self) -> Vec<Request> {
        Vec::new()
    }

    fn update(&mut self, message: &Message) -> Vec<Effect>;

    /// Inner size of the pane, borders excluded.
    fn set_size(&mut self, width: u16, height: u16);

    fn set_focused(&mut self, _focused: bool) {}

    /// True while the model wants every key, e.g. during text entry.
    fn captures_input(&self) -> bool {
        false
    }

    fn render(&self, area: Rect, buf: &mut Buffer);

    fn preview(&self) -> Option<&dyn PreviewSource> {
        None
    }

    fn border(&self) -> Option<&dyn BorderAnnotations> {
        None
    }
}

/// A master view whose current row has a detail page.
pub trait PreviewSource {
    fn preview_page(&self) -> Option<Page>;
}

pub trait BorderAnnotations {
    fn border_labels(&self) -> Vec<String>;
}
