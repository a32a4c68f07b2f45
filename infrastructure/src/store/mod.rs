//! Form document stores

mod json_store;

pub use json_store::JsonFileFormRepository;
