//! bfsdl-util - Foundation types for the BFSDL parser pipeline.
//!
//! This crate provides the building blocks shared by every stage of the
//! parser:
//!
//! - [`ByteWindow`]: a fixed-capacity ring over the most recent bytes of a
//!   stream, used for diagnostic context.
//! - [`HashedString`]: a string carrying a precomputed 32-bit hash with a
//!   strict-weak total order, used as a dictionary key.
//! - [`diagnostic`]: the three-channel diagnostic handler and the reporting
//!   macros used at every call site.
//! - [`state_machine`]: a small table-driven state machine with queued
//!   transitions, driving both the tokenizer and the interpreter.
//! - [`unicode`]: code points, byte-stream converters (ASCII, UTF-8) and the
//!   codec registry.
//!
//! Nothing in this crate performs I/O and nothing panics on bad input; all
//! failures are reported through [`diagnostic::Handler`] or typed errors.

pub mod byte_window;
pub mod diagnostic;
pub mod hashed_string;
pub mod state_machine;
pub mod unicode;

pub use byte_window::ByteWindow;
pub use diagnostic::{Channel, Diagnostic, Handler};
pub use hashed_string::{fast_hash, HashedString};
pub use state_machine::{Action, ActionTrigger, Engine, StateMachineError, TransitionQueue};
