// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod callbacks;
pub mod events;
pub mod readline;

// Re-export.
pub use callbacks::*;
pub use events::*;
pub use readline::*;
