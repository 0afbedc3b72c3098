//! Rapport binary — composition root.
//!
//! Ties the pieces together:
//! 1. Parse CLI args and load configuration from TOML
//! 2. Overlay provider credentials from the environment
//! 3. Build the lookup clients and the dialogue router
//! 4. Run the terminal chat loop, one fully-processed turn at a time

mod cli;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use rapport_chat::{
    DialogueRouter, GeminiClient, QuickAction, Session, TodoistClient, WeatherClient,
};
use rapport_core::RapportConfig;

use cli::CliArgs;

const CAPTION: &str = "Rapport 🤖 — I can help with tasks, weather and more!";

const COMMANDS: &str = "Commands: /weather  /tasks  /prefs  /clear  /quit";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config first: the log level may come from it.
    let config_file = args.resolve_config_path();
    let mut config = RapportConfig::load_or_default(&config_file);
    config.apply_env_overrides();
    if let Some(location) = args.location.clone() {
        config.general.default_location = location;
    }

    // Tracing.
    let level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();

    tracing::info!("Starting Rapport v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration resolved");

    let router = DialogueRouter::new(
        Box::new(WeatherClient::new(
            config.weather.api_key.clone(),
            config.weather.base_url.clone(),
        )),
        Box::new(TodoistClient::new(
            config.tasks.api_key.clone(),
            config.tasks.base_url.clone(),
        )),
        Box::new(GeminiClient::new(
            config.llm.api_key.clone(),
            config.llm.model.clone(),
            config.llm.base_url.clone(),
        )),
        config.general.default_location.clone(),
    );

    let mut session = Session::new();

    println!("{}", CAPTION);
    println!("{}", COMMANDS);
    println!();

    // Open with the first guided question on a fresh session.
    if let Some(greeting) = router.greet(&mut session) {
        println!("{}\n", greeting);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let reply = match input {
            "/quit" => break,
            "/clear" => {
                session.clear_messages();
                "Conversation cleared.".to_string()
            }
            "/prefs" => format_prefs(&session),
            "/weather" => router.quick_action(&mut session, QuickAction::Weather).await,
            "/tasks" => router.quick_action(&mut session, QuickAction::Tasks).await,
            utterance => router.respond(&mut session, utterance).await,
        };

        println!("{}\n", reply);
    }

    tracing::info!("Session ended");
    Ok(())
}

/// Render the preference sidebar: each field, or "Not set".
fn format_prefs(session: &Session) -> String {
    format!(
        "Name: {}\nLocation: {}",
        session.prefs.name.as_deref().unwrap_or("Not set"),
        session.prefs.location.as_deref().unwrap_or("Not set")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapport_chat::PendingPreference;

    #[test]
    fn test_format_prefs_unset() {
        let session = Session::new();
        assert_eq!(format_prefs(&session), "Name: Not set\nLocation: Not set");
    }

    #[test]
    fn test_format_prefs_set() {
        let mut session = Session::new();
        session.prefs.set(PendingPreference::Name, "Alex");
        session.prefs.set(PendingPreference::Location, "Colombo");
        assert_eq!(format_prefs(&session), "Name: Alex\nLocation: Colombo");
    }
}
