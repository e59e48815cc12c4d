//! Platform services used by the shell.
//!
//! Commands reach the host only through these traits so they can be driven
//! by fixed clocks and in-memory directories in tests.

mod services;

pub use services::{DesktopPlatform, DirectoryService, IdentityService, TimeService};
