//! Bridge between the UI thread and the backend worker that owns the search
//! coordinator.

pub mod commands;
pub mod runtime;
