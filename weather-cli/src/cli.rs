use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use weather_core::{
    Config, WeatherQuery, WeatherView, calculator, config::DEFAULT_PORT, file_demo, lookup,
    provider_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather lookup, calculator and file demo")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply add, sub, mul or div to two numbers.
    Calc {
        #[arg(allow_hyphen_values = true)]
        num1: Option<String>,

        #[arg(allow_hyphen_values = true)]
        num2: Option<String>,

        /// One of add, sub, mul, div.
        operation: Option<String>,
    },

    /// Write example.txt in the current directory and read it back.
    Files,

    /// Show the current weather for a city.
    Show {
        city: String,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Store the OpenWeather API key (and optional port) in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Calc { num1, num2, operation } => {
                let outcome =
                    calculator::calculate(num1.as_deref(), num2.as_deref(), operation.as_deref());
                println!("Result: {outcome}");
            }
            Command::Files => {
                let dir = std::env::current_dir().context("Failed to resolve current directory")?;
                file_demo::run(&dir)?;
            }
            Command::Show { city, json } => {
                let config = Config::load()?;
                let provider = provider_from_config(&config);
                let view = lookup(provider.as_ref(), &WeatherQuery::new(city)).await;
                print_view(&view, json)?;
            }
            Command::Configure => configure()?,
        }

        Ok(())
    }
}

fn print_view(view: &WeatherView, json: bool) -> anyhow::Result<()> {
    if json {
        let out = serde_json::to_string_pretty(view).context("Failed to serialize weather")?;
        println!("{out}");
    } else if let Some(w) = &view.weather {
        println!("{}, {}: {}", w.city, w.country, w.description);
        println!("  Temperature: {}°C (feels like {}°C)", w.temperature, w.feels_like);
        println!("  Humidity:    {}%", w.humidity);
        println!("  Wind:        {} m/s", w.wind);
        println!("  Pressure:    {} hPa", w.pressure);
        println!("  Sunrise:     {}", w.sunrise);
        println!("  Sunset:      {}", w.sunset);
        println!("  Coordinates: {}, {}", w.coordinates.lat, w.coordinates.lon);
    }

    if let Some(error) = &view.error {
        bail!("{}", error.message);
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let port = Text::new("Web server port:")
        .with_default(&config.port().to_string())
        .prompt()
        .context("Failed to read port")?;
    let port: u16 = port
        .trim()
        .parse()
        .with_context(|| format!("'{port}' is not a valid port"))?;

    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }
    config.port = (port != DEFAULT_PORT).then_some(port);

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}
