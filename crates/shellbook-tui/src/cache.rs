// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::ContentModel;
use crate::page::Page;
use std::collections::HashMap;

/// Built pane contents by page. Entries live for the whole session so a
/// page keeps its cursor, scroll and selection across navigation.
#[derive(Default)]
pub struct ModelCache {
    models: HashMap<Page, Box<dyn ContentModel>>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, page: &Page) -> bool {
        self.models.contains_key(page)
    }

    pub fn get(&self, page: &Page) -> Option<&dyn ContentModel> {
        self.models.get(page).map(|model| &**model)
    }

    pub fn get_mut(&mut self, page: &Page) -> Option<&mut (dyn ContentModel + 'static)> {
        self.models.get_mut(page).map(|model| &mut **model)
    }

    pub fn insert(&mut self, page: Page, model: Box<dyn ContentModel>) {
        self.models.insert(page, model);
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Page, &mut Box<dyn ContentModel>)> {
        self.models.iter_mut()
    }
}
