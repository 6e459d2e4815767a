// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod app;
pub mod cache;
pub mod event;
pub mod fuzzy;
pub mod item;
pub mod keys;
pub mod model;
pub mod page;
pub mod pane;
pub mod screens;
pub mod sort;
pub mod table;
pub mod tasks;
pub mod viewport;

pub use app::{App, AppOptions, run_app};
pub use cache::ModelCache;
pub use event::{Message, Request};
pub use item::TableItem;
pub use model::{BorderAnnotations, ContentModel, Effect, PreviewSource};
pub use page::{Kind, Page, Position};
pub use pane::{Factory, LayoutConfig, PaneManager};
pub use screens::ScreenOptions;
pub use sort::{SortCursor, SortField, SortOption, SortState};
pub use table::{Column, RenderedRow, Table, Truncation};
pub use tasks::{TaskRunner, execute};
