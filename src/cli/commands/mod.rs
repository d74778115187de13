//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Global flags reach every command
//! through a shared [`CommandContext`].

pub mod dispatcher;
pub mod doctor;
pub mod list;
pub mod validate;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};
pub use doctor::DoctorCommand;
pub use list::ListCommand;
pub use validate::ValidateCommand;
