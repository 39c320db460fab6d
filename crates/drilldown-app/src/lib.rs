// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod chain;
pub mod model;
pub mod options;

pub use chain::*;
pub use model::*;
pub use options::*;
