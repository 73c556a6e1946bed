use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Text};

use lookup_core::{
    BackendClient, Config, ConfiguredLocation, FileStore, HistoryStore, MemoryStore, Session,
    WeatherLookup,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-lookup", version, about = "City weather lookup")]
pub struct Cli {
    /// Override the backend base URL for this invocation.
    #[arg(long)]
    pub backend_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current conditions and the 5-day forecast for a city.
    Show {
        /// City name.
        city: String,
    },

    /// Show weather for the location configured in the config file.
    Locate,

    /// Print the recent-search list.
    History,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut config = Config::load()?;
        if let Some(url) = self.backend_url {
            config.backend_base_url = url;
        }
        tracing::debug!(backend = %config.backend_base_url, "resolved backend base URL");

        // Without a platform data dir, history just won't survive the process.
        let store: Box<dyn HistoryStore> = match FileStore::new() {
            Some(store) => Box::new(store),
            None => Box::new(MemoryStore::new()),
        };

        let mut lookup = WeatherLookup::new(
            BackendClient::new(config.backend_base_url.clone()),
            Session::new(store),
            Box::new(ConfiguredLocation::new(config.location)),
        );

        match self.command {
            Some(Command::Show { city }) => {
                lookup.query_by_city(&city).await;
                render::outcome(lookup.session().outcome());
            }
            Some(Command::Locate) => {
                lookup.query_by_location().await;
                render::outcome(lookup.session().outcome());
            }
            Some(Command::History) => {
                render::history(lookup.session().recent_searches());
            }
            None => interactive(&mut lookup).await?,
        }

        Ok(())
    }
}

/// Prompt loop standing in for the original single-page UI: a text input plus
/// a location shortcut. Blank input or Esc exits.
async fn interactive(lookup: &mut WeatherLookup) -> Result<()> {
    loop {
        let help = if lookup.session().recent_searches().is_empty() {
            "Enter a city, @ for your location, blank to quit".to_string()
        } else {
            format!(
                "Recent: {}  (@ for your location, blank to quit)",
                lookup.session().recent_searches().join(", ")
            )
        };

        let input = match Text::new("City:").with_help_message(&help).prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        let input = input.trim();
        if input.is_empty() {
            return Ok(());
        }

        if input == "@" {
            lookup.query_by_location().await;
        } else {
            lookup.query_by_city(input).await;
        }

        render::outcome(lookup.session().outcome());
    }
}
