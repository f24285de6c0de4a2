//! Core domain types for building reducers.
//!
//! This module contains the plain data the rest of the crate works on:
//! - Actions and state slices
//! - Lifecycle phases and their suffix labels
//! - Nested transition trees

pub mod action;
pub mod suffix;
pub mod tree;

pub use action::{Action, State};
pub use suffix::{Phase, TypeSuffixes};
pub use tree::{TransitionFn, TransitionNode, TransitionTree};
