//! # incident_drill
//!
//! A state machine for an incident-response training RPG. The player commits
//! to a role, walks a small map to meet allies, answers their dialogue with a
//! choice, and watches two meters (chaos and risk) move until the scenario
//! ends in success or failure.
//!
//! The core is a pure reducer, [`runtime::step`], over a read-only
//! [`types::Catalog`]. [`facade::Drill`] wraps it for callers that just want
//! to push events.
//!
//! ## Quick Start
//!
//! ```rust
//! use incident_drill::{Drill, Direction, Role};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut drill = Drill::builtin()?;
//! drill.select_role(Role::Communicator)?;
//!
//! // Walk toward the first ally at (30, 40)
//! for _ in 0..8 {
//!     drill.walk(Direction::Left)?;
//! }
//! for _ in 0..4 {
//!     drill.walk(Direction::Up)?;
//! }
//!
//! if let Some(event) = drill.state().interacting_with() {
//!     println!("{}: {}", event.ally.name, event.dialogue);
//!     drill.choose(0)?;
//!     println!("{}", drill.state().feedback().unwrap_or_default());
//!     drill.advance()?;
//! }
//!
//! assert_eq!(drill.state().stage, 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Driving the reducer directly
//!
//! ```rust
//! use incident_drill::{Event, RulesConfig, SessionState, catalog, step};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = catalog::builtin()?;
//! let rules = RulesConfig::default();
//! let state = SessionState::new(&rules, catalog.prologue.clone());
//!
//! let (state, output) = step(state, &catalog, &rules, Event::AdvanceStage);
//! assert!(!output.is_applied()); // no role yet
//! assert_eq!(state.stage, 0);
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod catalog;
pub mod cli;
pub mod facade;
pub mod lint;
pub mod rules;
pub mod runtime;
pub mod types;

pub use catalog::CatalogError;
pub use facade::Drill;
pub use rules::{RulesConfig, RulesError};
pub use runtime::step;
pub use types::{
    Catalog, Direction, Ending, Event, IgnoreReason, Mode, Notice, Outcome, Output, Position,
    Role, SessionState, Status, StepError, TerminalCause,
};
