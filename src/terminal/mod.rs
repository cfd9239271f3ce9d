// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod device;
pub mod raw_mode;
pub mod terminal_size;
pub mod tty;

// Re-export.
pub use device::*;
pub use raw_mode::*;
pub use terminal_size::*;
pub use tty::*;
