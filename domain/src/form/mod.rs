//! Form aggregate.
//!
//! - [`entities`]: [`Form`], [`Submission`], [`FormId`]
//! - [`edit`]: [`FormEdit`] editor actions applied as a pure reducer

pub mod edit;
pub mod entities;

pub use edit::FormEdit;
pub use entities::{Form, FormId, Submission};
