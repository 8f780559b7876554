// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod cell;
pub mod ids;
pub mod loading;
pub mod model;
pub mod selection;
pub mod state;
pub mod store;
pub mod table;

pub use cell::*;
pub use ids::*;
pub use loading::*;
pub use model::*;
pub use selection::*;
pub use state::*;
pub use store::*;
pub use table::*;
