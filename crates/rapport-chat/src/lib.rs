//! Conversational core for Rapport.
//!
//! Provides the dialogue router, session state, preference store, and
//! the external lookups (weather, tasks, generative fallback) it
//! dispatches to.

pub mod error;
pub mod llm;
pub mod prefs;
pub mod router;
pub mod session;
pub mod tasks;
pub mod weather;

pub use error::LookupError;
pub use llm::GeminiClient;
pub use prefs::{PendingPreference, Preferences};
pub use router::{DialogueRouter, Generator, QuickAction, TaskLookup, WeatherLookup};
pub use session::{ChatMessage, Role, Session};
pub use tasks::TodoistClient;
pub use weather::WeatherClient;
