//! Scan-and-reclaim engine behind the Zenith cleanup tool, plus the egui
//! shell that drives it. The engine is synchronous; the shell runs each call
//! on a background thread and polls a channel for the result.

pub mod app;
pub mod cleaner;
pub mod disk_info;
pub mod privilege;
pub mod roots;
pub mod scanner;
pub mod snapshot;
pub mod startup;
pub mod utils;
