// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod history;
pub mod ids;
pub mod model;
pub mod source;

pub use history::*;
pub use ids::*;
pub use model::*;
pub use source::*;
