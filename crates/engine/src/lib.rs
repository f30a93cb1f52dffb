//! Tavernkeep engine library.
//!
//! Persistence and command handling for characters, the item catalog and the
//! enemy catalog of a group roleplay session.
//!
//! ## Structure
//!
//! - `repositories/` - Typed records over the entity store
//! - `use_cases/` - User story orchestration across repositories
//! - `infrastructure/` - Store adapters, configuration, clock and randomness
//! - `api/` - Command dispatch and render payloads
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod repositories;
pub mod use_cases;

pub use app::App;
