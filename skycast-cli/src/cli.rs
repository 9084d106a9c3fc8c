use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, InquireError, Password, PasswordDisplayMode, Text};
use skycast_core::{
    Config, Coordinates, Pipeline, StaticLocator, ViewController, provider::provider_from_config,
};

use crate::render::{Output, print_view};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Current weather and the next four days")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and an optional home location.
    Configure,

    /// Show the forecast for a city.
    Search {
        city: String,

        #[arg(long, value_enum, default_value_t = Output::Text)]
        output: Output,
    },

    /// Show the forecast for the device location.
    ///
    /// Without --lat/--lon the configured home location is used.
    Locate {
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        #[arg(long, value_enum, default_value_t = Output::Text)]
        output: Output,
    },

    /// Keep a widget open: type a city and press Enter.
    ///
    /// `:here` uses the home location, `:close` (or an empty line) clears,
    /// `:quit` exits.
    Interactive {
        #[arg(long, value_enum, default_value_t = Output::Text)]
        output: Output,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Search { city, output } => {
                let (_, mut vc) = controller()?;
                vc.submit(&city).await;
                print_view(&vc, output)
            }
            Command::Locate { lat, lon, output } => {
                let (config, mut vc) = controller()?;
                let position = match (lat, lon) {
                    (Some(lat), Some(lon)) => Some(Coordinates { lat, lon }),
                    _ => config.home,
                };
                vc.geolocate(&StaticLocator::new(position)).await;
                print_view(&vc, output)
            }
            Command::Interactive { output } => {
                let (config, vc) = controller()?;
                interactive(vc, StaticLocator::new(config.home), output).await
            }
        }
    }
}

fn controller() -> anyhow::Result<(Config, ViewController)> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    tracing::debug!(
        base_url = config.base_url(),
        timeout_secs = ?config.request_timeout_secs,
        home = config.home.is_some(),
        "configuration loaded"
    );
    Ok((config, ViewController::new(Pipeline::from_provider(provider))))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());

    let set_home = Confirm::new("Set a home location for `skycast locate`?")
        .with_default(config.home.is_some())
        .prompt()
        .context("Failed to read answer")?;

    if set_home {
        let lat = CustomType::<f64>::new("Latitude:")
            .with_error_message("Please type a number, e.g. 38.72")
            .prompt()
            .context("Failed to read latitude")?;
        let lon = CustomType::<f64>::new("Longitude:")
            .with_error_message("Please type a number, e.g. -9.14")
            .prompt()
            .context("Failed to read longitude")?;
        config.home = Some(Coordinates { lat, lon });
    } else {
        config.home = None;
    }

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

enum Line {
    Search(String),
    Here,
    Close,
    Quit,
}

fn parse_line(line: &str) -> Line {
    match line.trim() {
        "" | ":close" => Line::Close,
        ":here" => Line::Here,
        ":quit" | ":q" => Line::Quit,
        city => Line::Search(city.to_string()),
    }
}

async fn interactive(
    mut vc: ViewController,
    locator: StaticLocator,
    output: Output,
) -> anyhow::Result<()> {
    loop {
        let line = match Text::new("City:").with_help_message(":here, :close, :quit").prompt() {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read input"),
        };

        match parse_line(&line) {
            Line::Search(city) => {
                vc.set_input(city);
                vc.submit_input().await;
            }
            Line::Here => {
                vc.geolocate(&locator).await;
            }
            Line::Close => vc.close(),
            Line::Quit => break,
        }

        print_view(&vc, output)?;
    }

    Ok(())
}
