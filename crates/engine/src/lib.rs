//! QuestWeaver Engine library.
//!
//! All server-side code for the QuestWeaver generation service.
//!
//! ## Structure
//!
//! - `use_cases/` - The generation pipeline (validate, prompt, invoke,
//!   extract, coerce) and the demo template catalog
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
