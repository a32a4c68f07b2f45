//! Use cases
//!
//! Each use case is one read-modify-write against a single form.

pub mod create_form;
pub mod edit_form;
pub mod list_submissions;
pub mod load_form;
pub mod question_access;
pub mod shared;
pub mod submit_form;
pub mod upload_image;

#[cfg(test)]
pub(crate) mod test_support;
