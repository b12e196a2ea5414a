//! Small helpers shared by the workspace crates and their tests.

pub mod logging;
