//! vinylcards CLI library.
//!
//! This crate provides the command implementations behind the `vinylcards`
//! binary together with the loaders that turn entry lists (JSON or CSV) and
//! layout configuration files (JSON or YAML) into the core model types.

pub mod commands;
pub mod input;
