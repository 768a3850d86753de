//! Core types for the incident drill
//!
//! - Role / RoleTable: player archetypes and strict per-role content tables
//! - Meter, Position: bounded gauges and map coordinates
//! - Catalog: resolved, read-only scenario content
//! - SessionState: the mutable session, owned by the caller
//! - Event / Output: what goes into and comes out of a runtime step

pub mod catalog;
pub mod event;
pub mod meter;
pub mod output;
pub mod position;
pub mod role;
pub mod state;

pub use catalog::{
    Ally, Catalog, Choice, DialogueEvent, Impact, Item, RoleInfo, ScenarioStage, StageView,
};
pub use event::Event;
pub use meter::Meter;
pub use output::{IgnoreReason, Notice, Output, Status, StepError};
pub use position::{Direction, Position};
pub use role::{Role, RoleTable, UnknownRole};
pub use state::{Ending, Mode, Outcome, SessionState, TerminalCause};
