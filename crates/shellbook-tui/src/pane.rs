// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Up to three panes (left, top-right, bottom-right) backed by the model
//! cache.
//!
//! Navigation resolves a [`Page`] against the cache and builds the model on a
//! miss with the factory registered for its [`Kind`]. The top-right pane keeps
//! a back history, and while auto-preview is on the bottom-right pane follows
//! the top-right model's current row.

use crate::cache::ModelCache;
use crate::event::{Message, Request};
use crate::model::{ContentModel, Effect};
use crate::page::{Kind, Page, Position};
use anyhow::{Context, Result, anyhow, bail};
use log::debug;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Widget};
use std::collections::{BTreeMap, HashMap};

pub type Factory = Box<dyn Fn(Page, u16, u16) -> Result<Option<Box<dyn ContentModel>>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    pub left_width: u16,
    pub top_right_height_percent: u16,
    pub min_pane_size: u16,
    pub resize_step: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            left_width: 28,
            top_right_height_percent: 60,
            min_pane_size: 6,
            resize_step: 2,
        }
    }
}

pub struct PaneManager {
    factories: HashMap<Kind, Factory>,
    cache: ModelCache,
    panes: BTreeMap<Position, Page>,
    focus: Position,
    history: Vec<Page>,
    preview_enabled: bool,
    config: LayoutConfig,
    area: Rect,
    left_width: u16,
    top_right_height: Option<u16>,
}

impl PaneManager {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            factories: HashMap::new(),
            cache: ModelCache::new(),
            panes: BTreeMap::new(),
            focus: Position::TopRight,
            history: Vec::new(),
            preview_enabled: true,
            config,
            area: Rect::default(),
            left_width: config.left_width,
            top_right_height: None,
        }
    }

    pub fn register(
        &mut self,
        kind: Kind,
        factory: impl Fn(Page, u16, u16) -> Result<Option<Box<dyn ContentModel>>> + 'static,
    ) {
        self.factories.insert(kind, Box::new(factory));
    }

    pub const fn focus(&self) -> Position {
        self.focus
    }

    pub fn page_at(&self, position: Position) -> Option<Page> {
        self.panes.get(&position).copied()
    }

    pub fn visible(&self) -> Vec<Position> {
        self.panes.keys().copied().collect()
    }

    pub fn history(&self) -> &[Page] {
        &self.history
    }

    pub const fn preview_enabled(&self) -> bool {
        self.preview_enabled
    }

    pub fn cache(&self) -> &ModelCache {
        &self.cache
    }

    pub fn model(&self, page: &Page) -> Option<&dyn ContentModel> {
        self.cache.get(page)
    }

    pub fn focused_model(&self) -> Option<&dyn ContentModel> {
        self.page_at(self.focus)
            .and_then(|page| self.cache.get(&page))
    }

    pub fn focused_captures_input(&self) -> bool {
        self.focused_model()
            .is_some_and(|model| model.captures_input())
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
        self.propagate_sizes();
    }

    /// Shows `page` at `position`, building and caching its model on first
    /// use. Returns the requests the new model wants run.
    pub fn navigate(
        &mut self,
        position: Position,
        page: Page,
        disable_focus: bool,
    ) -> Result<Vec<Request>> {
        if self.page_at(position) == Some(page) {
            if !disable_focus {
                self.focus_on(position);
            }
            return Ok(Vec::new());
        }

        let requests = self.ensure_model(position, page)?;
        debug!("show {page} in {} pane", position.as_str());
        if position == Position::TopRight {
            self.panes.remove(&Position::BottomRight);
            self.history.push(page);
            self.preview_enabled = true;
        }
        self.panes.insert(position, page);
        if disable_focus {
            self.repair_focus();
        } else {
            self.focus_on(position);
        }
        self.propagate_sizes();
        Ok(requests)
    }

    /// Returns the top-right pane to the previous page in its history.
    pub fn back(&mut self) -> Result<Vec<Request>> {
        if self.history.len() <= 1 {
            bail!("nothing to go back to");
        }
        let previous = self.history[self.history.len() - 2];
        let requests = self.ensure_model(Position::TopRight, previous)?;
        self.history.pop();
        debug!("back to {previous}");
        self.panes.remove(&Position::BottomRight);
        self.panes.insert(Position::TopRight, previous);
        self.preview_enabled = true;
        self.focus_on(Position::TopRight);
        self.propagate_sizes();
        Ok(requests)
    }

    pub fn resize_width(&mut self, delta: i32) {
        let (min, max) = bounds(self.area.width, self.config.min_pane_size);
        self.left_width = clamp_step(self.effective_left_width(), delta, min, max);
        self.propagate_sizes();
    }

    pub fn resize_height(&mut self, delta: i32) {
        let (min, max) = bounds(self.area.height, self.config.min_pane_size);
        self.top_right_height = Some(clamp_step(
            self.effective_top_right_height(),
            delta,
            min,
            max,
        ));
        self.propagate_sizes();
    }

    pub const fn resize_step(&self) -> i32 {
        self.config.resize_step as i32
    }

    pub fn focus_next(&mut self) {
        self.cycle_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.cycle_focus(-1);
    }

    pub fn close_focused(&mut self) -> Result<()> {
        if self.panes.len() <= 1 {
            bail!("can't close the last pane");
        }
        let closing = self.focus;
        self.panes.remove(&closing);
        if closing == Position::BottomRight {
            self.preview_enabled = false;
        }
        debug!("closed {} pane", closing.as_str());
        let start = position_index(closing);
        let next = (1..=Position::ALL.len())
            .map(|offset| Position::ALL[(start + offset) % Position::ALL.len()])
            .find(|position| self.panes.contains_key(position))
            .unwrap_or(Position::TopRight);
        self.focus_on(next);
        self.propagate_sizes();
        Ok(())
    }

    /// Points the bottom-right pane at the top-right model's current row.
    pub fn sync_preview(&mut self) -> Result<Vec<Request>> {
        if !self.preview_enabled {
            return Ok(Vec::new());
        }
        let target = self
            .page_at(Position::TopRight)
            .and_then(|page| self.cache.get(&page))
            .and_then(|model| model.preview())
            .and_then(|preview| preview.preview_page());
        match target {
            Some(page) => self.navigate(Position::BottomRight, page, true),
            None => Ok(Vec::new()),
        }
    }

    /// Delivers a task result to every cached model, shown or not.
    pub fn broadcast(&mut self, message: &Message) -> Vec<Effect> {
        let mut effects = Vec::new();
        for (_, model) in self.cache.iter_mut() {
            effects.extend(model.update(message));
        }
        effects
    }

    pub fn route_to_focused(&mut self, message: &Message) -> Vec<Effect> {
        let Some(page) = self.page_at(self.focus) else {
            return Vec::new();
        };
        self.cache
            .get_mut(&page)
            .map(|model| model.update(message))
            .unwrap_or_default()
    }

    pub fn layout(&self) -> Vec<(Position, Rect)> {
        let visible = self.visible();
        self.layout_for(&visible)
    }

    pub fn render(&self, buf: &mut Buffer) {
        for (position, rect) in self.layout() {
            let Some(model) = self
                .page_at(position)
                .and_then(|page| self.cache.get(&page))
            else {
                continue;
            };
            let border_style = if position == self.focus {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let mut block = Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" {} ", model.title()));
            if let Some(annotations) = model.border() {
                let labels = annotations.border_labels();
                if !labels.is_empty() {
                    block = block
                        .title_bottom(Line::from(format!(" {} ", labels.join(" · "))).right_aligned());
                }
            }
            let inner = block.inner(rect);
            block.render(rect, buf);
            model.render(inner, buf);
        }
    }

    fn ensure_model(&mut self, position: Position, page: Page) -> Result<Vec<Request>> {
        if self.cache.contains(&page) {
            debug!("cache hit for {page}");
            return Ok(Vec::new());
        }
        debug!("cache miss for {page}");
        let factory = self
            .factories
            .get(&page.kind)
            .ok_or_else(|| anyhow!("no view registered for {}", page.kind))?;
        let (width, height) = self.prospective_size(position);
        let mut model = factory(page, width, height)
            .with_context(|| format!("open {page}"))?
            .ok_or_else(|| anyhow!("{page} has nothing to show"))?;
        let requests = model.init();
        self.cache.insert(page, model);
        Ok(requests)
    }

    fn prospective_size(&self, position: Position) -> (u16, u16) {
        let mut visible = self.visible();
        if position == Position::TopRight {
            visible.retain(|candidate| *candidate != Position::BottomRight);
        }
        if !visible.contains(&position) {
            visible.push(position);
        }
        self.layout_for(&visible)
            .into_iter()
            .find(|(candidate, _)| *candidate == position)
            .map_or((0, 0), |(_, rect)| inner_size(rect))
    }

    fn layout_for(&self, visible: &[Position]) -> Vec<(Position, Rect)> {
        let left = visible.contains(&Position::Left);
        let top = visible.contains(&Position::TopRight);
        let bottom = visible.contains(&Position::BottomRight);
        let mut out = Vec::new();

        let right_area = match (left, top || bottom) {
            (true, true) => {
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([
                        Constraint::Length(self.effective_left_width()),
                        Constraint::Min(0),
                    ])
                    .split(self.area);
                out.push((Position::Left, columns[0]));
                columns[1]
            }
            (true, false) => {
                out.push((Position::Left, self.area));
                return out;
            }
            (false, _) => self.area,
        };

        match (top, bottom) {
            (true, true) => {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(self.effective_top_right_height()),
                        Constraint::Min(0),
                    ])
                    .split(right_area);
                out.push((Position::TopRight, rows[0]));
                out.push((Position::BottomRight, rows[1]));
            }
            (true, false) => out.push((Position::TopRight, right_area)),
            (false, true) => out.push((Position::BottomRight, right_area)),
            (false, false) => {}
        }
        out
    }

    fn effective_left_width(&self) -> u16 {
        let (min, max) = bounds(self.area.width, self.config.min_pane_size);
        self.left_width.clamp(min, max)
    }

    fn effective_top_right_height(&self) -> u16 {
        let (min, max) = bounds(self.area.height, self.config.min_pane_size);
        let height = self.top_right_height.unwrap_or_else(|| {
            let percent = u32::from(self.config.top_right_height_percent.min(100));
            u16::try_from(u32::from(self.area.height) * percent / 100).unwrap_or(u16::MAX)
        });
        height.clamp(min, max)
    }

    fn propagate_sizes(&mut self) {
        for (position, rect) in self.layout() {
            let Some(page) = self.page_at(position) else {
                continue;
            };
            if let Some(model) = self.cache.get_mut(&page) {
                let (width, height) = inner_size(rect);
                model.set_size(width, height);
            }
        }
    }

    fn cycle_focus(&mut self, delta: isize) {
        let visible = self.visible();
        if visible.is_empty() {
            return;
        }
        let current = visible
            .iter()
            .position(|position| *position == self.focus)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(visible.len() as isize) as usize;
        self.focus_on(visible[next]);
    }

    fn repair_focus(&mut self) {
        if self.panes.contains_key(&self.focus) {
            self.focus_on(self.focus);
            return;
        }
        let fallback = if self.panes.contains_key(&Position::TopRight) {
            Position::TopRight
        } else {
            self.panes.keys().next().copied().unwrap_or(Position::TopRight)
        };
        self.focus_on(fallback);
    }

    fn focus_on(&mut self, position: Position) {
        self.focus = position;
        let shown = self
            .panes
            .iter()
            .map(|(position, page)| (*position, *page))
            .collect::<Vec<_>>();
        for (position, page) in shown {
            if let Some(model) = self.cache.get_mut(&page) {
                model.set_focused(position == self.focus);
            }
        }
    }
}

fn bounds(total: u16, min_pane: u16) -> (u16, u16) {
    let max = total.saturating_sub(min_pane).max(min_pane);
    (min_pane, max)
}

fn clamp_step(value: u16, delta: i32, min: u16, max: u16) -> u16 {
    let next = (i32::from(value) + delta).clamp(i32::from(min), i32::from(max));
    u16::try_from(next).unwrap_or(min)
}

fn inner_size(rect: Rect) -> (u16, u16) {
    (rect.width.saturating_sub(2), rect.height.saturating_sub(2))
}

fn position_index(position: Position) -> usize {
    Position::ALL
        .iter()
        .position(|candidate| *candidate == position)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{bounds, clamp_step};

    #[test]
    fn resize_bounds_reserve_the_other_pane() {
        assert_eq!(bounds(100, 6), (6, 94));
        assert_eq!(bounds(8, 6), (6, 6));
        assert_eq!(clamp_step(28, 2, 6, 94), 30);
        assert_eq!(clamp_step(93, 2, 6, 94), 94);
        assert_eq!(clamp_step(7, -4, 6, 94), 6);
    }
}
