use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use skyview_core::{Config, FileStore, HttpWeatherClient, WeatherView};

use crate::{render, session};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyview", version, about = "Current weather, lookup history and favorite cities")]
pub struct Cli {
    /// Override the configured backend base URL for this run.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive session (the default).
    Interactive,

    /// Show current weather for a city.
    Show {
        /// City name.
        city: String,

        /// Also add the city to favorites.
        #[arg(long)]
        favorite: bool,
    },

    /// Show the lookup history recorded by the backend.
    History,

    /// Manage favorite cities.
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },

    /// Configure the backend URL and request timeout.
    Configure,
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// List favorite cities.
    List,

    /// Remove a city from favorites.
    Remove {
        /// City name, exactly as listed.
        city: String,
    },
}

type View = WeatherView<HttpWeatherClient, FileStore>;

async fn open_view(config: &Config) -> anyhow::Result<View> {
    let client = HttpWeatherClient::from_config(config).context("Failed to set up HTTP client")?;
    let store = FileStore::new(config.store_dir()?);

    Ok(WeatherView::init(client, store).await)
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        if let Some(url) = &self.base_url {
            config.set_base_url(url)?;
        }

        match self.command.unwrap_or(Command::Interactive) {
            Command::Interactive => {
                let mut view = open_view(&config).await?;
                session::run(&mut view).await?;
            }
            Command::Show { city, favorite } => {
                let mut view = open_view(&config).await?;

                if let Err(e) = view.submit_lookup(&city).await {
                    tracing::debug!(error = %e, "lookup failed");
                    bail!("{}", e.user_message());
                }
                if let Some(card) = view.display() {
                    println!("{}", render::reading_card(&card));
                }

                if favorite {
                    match view.add_favorite() {
                        Ok(true) => println!("Added to favorites."),
                        Ok(false) => println!("Already a favorite."),
                        Err(e) => bail!("{}", e.user_message()),
                    }
                }
            }
            Command::History => {
                let view = open_view(&config).await?;
                println!("{}", render::history_table(view.history()));
            }
            Command::Favorites { action } => {
                let mut view = open_view(&config).await?;

                match action {
                    FavoritesCommand::List => {}
                    FavoritesCommand::Remove { city } => match view.remove_favorite(&city) {
                        Ok(true) => println!("Removed {city}."),
                        Ok(false) => println!("{city} is not a favorite."),
                        Err(e) => bail!("{}", e.user_message()),
                    },
                }
                println!("{}", render::favorites_list(view.favorites()));
            }
            Command::Configure => configure(config)?,
        }

        Ok(())
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let url = Text::new("Backend base URL:")
        .with_default(&config.base_url)
        .prompt()?;
    config.set_base_url(&url)?;

    config.timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.timeout_secs)
        .with_error_message("Please enter a whole number of seconds")
        .prompt()?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
