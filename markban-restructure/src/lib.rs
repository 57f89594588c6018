//! markban-restructure library - bookmark migration engine
//!
//! Migrates a taxonomy-based bookmark tree (folders per content source)
//! into a status-based Kanban layout with a WIP limit on the active
//! folder. The binary in `main.rs` is a thin CLI wrapper; integration
//! tests drive the engine through this library directly.

pub mod collect;
pub mod mutate;
pub mod orchestrator;
pub mod paths;
pub mod provision;
pub mod rank;
pub mod report;
pub mod validate;

pub use orchestrator::{Confirm, ConsoleConfirm, Mode, Restructure, RunOutcome, RunSummary};
