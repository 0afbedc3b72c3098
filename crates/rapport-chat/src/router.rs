//! Dialogue router: ordered keyword dispatch over session state.
//!
//! Given one user utterance, exactly one branch runs: the pending
//! guided question, a manual preference phrase, the incomplete-
//! preferences guard, a keyword trigger (weather / tasks / identity /
//! help), or the generative fallback. Matching is case-insensitive
//! substring matching in a fixed priority order; the first match
//! short-circuits the rest.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::prefs::PendingPreference;
use crate::session::Session;

/// Static capability summary for the "help" trigger.
const HELP_TEXT: &str = "I can help with:\n\
    - Weather information (try 'weather [location]')\n\
    - Todoist tasks (try 'show my tasks')\n\
    - Set preferences (try 'my name is...', 'set location to...')\n\
    - Or ask me anything else!";

// Strips the trigger word case-insensitively while keeping the rest of
// the utterance in the user's own casing.
static WEATHER_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(?i)weather").expect("Invalid weather regex"));

// =============================================================================
// Lookup seams
// =============================================================================

/// Current-conditions lookup for a location.
///
/// Implementations never fail: provider and transport errors are
/// rendered into the returned text.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn fetch(&self, location: &str) -> String;
}

/// Remote task-list lookup.
#[async_trait]
pub trait TaskLookup: Send + Sync {
    async fn fetch(&self) -> String;
}

/// Single-turn generative completion used as the fallback path.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn complete(&self, prompt: &str) -> String;
}

// =============================================================================
// DialogueRouter
// =============================================================================

/// Host-triggered shortcut that synthesizes a canned utterance and
/// invokes the corresponding lookup directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    Weather,
    Tasks,
}

/// Routes one utterance at a time to a fixed set of response paths.
///
/// Stateless across turns except through the [`Session`] passed into
/// every call; never returns an error to the host.
pub struct DialogueRouter {
    weather: Box<dyn WeatherLookup>,
    tasks: Box<dyn TaskLookup>,
    generator: Box<dyn Generator>,
    /// Location for the weather quick action before one is stored.
    default_location: String,
}

impl DialogueRouter {
    pub fn new(
        weather: Box<dyn WeatherLookup>,
        tasks: Box<dyn TaskLookup>,
        generator: Box<dyn Generator>,
        default_location: String,
    ) -> Self {
        Self {
            weather,
            tasks,
            generator,
            default_location,
        }
    }

    /// Open a fresh conversation with the first guided question.
    ///
    /// Only fires when the transcript is empty and no preference has
    /// been set yet; the question is recorded in the transcript.
    pub fn greet(&self, session: &mut Session) -> Option<String> {
        if !session.messages.is_empty() || !session.prefs.is_empty() {
            return None;
        }
        let pending = session.prefs.next_pending()?;
        session.awaiting = Some(pending);
        let question = session.prefs.question_for(pending);
        session.push_assistant(&question);
        Some(question)
    }

    /// Handle one user turn: record the utterance, dispatch, record and
    /// return the reply.
    pub async fn respond(&self, session: &mut Session, utterance: &str) -> String {
        session.push_user(utterance);
        let reply = self.dispatch(session, utterance).await;
        session.push_assistant(&reply);
        reply
    }

    /// Run a host quick action against the session.
    pub async fn quick_action(&self, session: &mut Session, action: QuickAction) -> String {
        let reply = match action {
            QuickAction::Weather => {
                session.push_user("weather");
                let location = session
                    .prefs
                    .location
                    .clone()
                    .unwrap_or_else(|| self.default_location.clone());
                self.weather.fetch(&location).await
            }
            QuickAction::Tasks => {
                session.push_user("show my tasks");
                self.tasks.fetch().await
            }
        };
        session.push_assistant(&reply);
        reply
    }

    // -- Dispatch --

    async fn dispatch(&self, session: &mut Session, utterance: &str) -> String {
        // 1. A guided question is outstanding: the whole utterance is
        //    the answer, stored verbatim. Advancing the cursor here is
        //    the only place the guided flow moves it.
        if let Some(pending) = session.awaiting.take() {
            tracing::debug!(field = ?pending, "Guided preference answer");
            let ack = session.prefs.set(pending, utterance);
            if let Some(next) = session.prefs.next_pending() {
                session.awaiting = Some(next);
                let question = session.prefs.question_for(next);
                return format!("{}\n\n{}", ack, question);
            }
            return ack.to_string();
        }

        let lowered = utterance.to_lowercase();

        // 2. Manual preference phrases. These write the field but do
        //    not move the awaiting cursor (unlike branch 1).
        if let Some((_, rest)) = lowered.split_once("my name is") {
            tracing::debug!("Manual name assertion");
            return session
                .prefs
                .set(PendingPreference::Name, rest.trim())
                .to_string();
        }
        if let Some((_, rest)) = lowered.split_once("set location to") {
            tracing::debug!("Manual location assertion");
            return session
                .prefs
                .set(PendingPreference::Location, rest.trim())
                .to_string();
        }

        // 3. Preferences still incomplete: re-ask instead of routing.
        if let Some(pending) = session.prefs.next_pending() {
            session.awaiting = Some(pending);
            return session.prefs.question_for(pending);
        }

        // 4. Keyword triggers, fixed priority, first match wins.
        if lowered.contains("weather") {
            let stripped = WEATHER_WORD_RE.replace_all(utterance, "");
            let override_location = stripped.trim();
            let location = if override_location.is_empty() {
                session.prefs.location.clone().unwrap_or_default()
            } else {
                override_location.to_string()
            };
            tracing::debug!(location = %location, "Routing to weather lookup");
            return self.weather.fetch(&location).await;
        }
        if lowered.contains("tasks") || lowered.contains("todo") {
            tracing::debug!("Routing to task lookup");
            return self.tasks.fetch().await;
        }
        if lowered.contains("who am i") {
            return format!(
                "You are {}, located in {}.",
                session.prefs.name.as_deref().unwrap_or_default(),
                session.prefs.location.as_deref().unwrap_or_default()
            );
        }
        if lowered.contains("help") {
            return HELP_TEXT.to_string();
        }

        // 5. Fallback to the generative model, raw utterance as prompt.
        tracing::debug!("Routing to generative fallback");
        self.generator.complete(utterance).await
    }
}

// =============================================================================
// Tests
// =============================================================================
