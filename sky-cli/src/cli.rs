use std::{
    io::{self, BufRead, IsTerminal},
    path::PathBuf,
    time::Duration,
};

use anyhow::{Context, bail};
use clap::{ArgAction, Parser};
use sky_core::{
    Config, OpenMeteo, SkyError, lookup, parse_city_name, render_error, render_weather_report,
};
use tracing::debug;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "sky", version, about = "Current weather for a city")]
pub struct Cli {
    /// City name, e.g. `sky New York`. Prompts for one when omitted.
    pub city: Vec<String>,

    /// Seconds allowed for the geocoding and weather requests together.
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Read configuration from this file instead of the platform default.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = self.load_config()?;

        let raw = if self.city.is_empty() { prompt_city_name()? } else { self.city.join(" ") };
        let city = parse_city_name(&raw)?;

        let timeout = self.timeout.map(Duration::from_secs).unwrap_or_else(|| config.timeout());
        debug!(?timeout, "looking up '{city}'");

        let client = OpenMeteo::from_config(&config)?;
        let report = lookup(&client, &client, &city, timeout).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", render_weather_report(&report.location, &report.weather));
        }

        Ok(())
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => {
                if !path.exists() {
                    bail!("config file not found: {}", path.display());
                }
                Config::load_from(path)
            }
            None => Config::load(),
        }
    }
}

/// Read a city name from the terminal, or one line from piped stdin.
fn prompt_city_name() -> anyhow::Result<String> {
    if io::stdin().is_terminal() {
        return inquire::Text::new("Enter city name:").prompt().context("failed to read input");
    }

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line).context("failed to read input")?;
    if read == 0 {
        bail!("failed to read input");
    }
    Ok(line)
}

/// Render a failed run for stderr.
///
/// Lookup errors already carry their cause in the message; anything else gets its full context chain.
pub fn render_failure(err: &anyhow::Error) -> String {
    match err.downcast_ref::<SkyError>() {
        Some(sky) => render_error(sky),
        None => render_error(&format!("{err:#}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_words_are_collected() {
        let cli = Cli::try_parse_from(["sky", "New", "York"]).unwrap();

        assert_eq!(cli.city.join(" "), "New York");
        assert!(!cli.json);
        assert_eq!(cli.timeout, None);
    }

    #[test]
    fn options_are_parsed() {
        let cli = Cli::try_parse_from(["sky", "-vv", "--json", "--timeout", "3", "Tokyo"]).unwrap();

        assert_eq!(cli.verbose, 2);
        assert!(cli.json);
        assert_eq!(cli.timeout, Some(3));
        assert_eq!(cli.city, vec!["Tokyo".to_string()]);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["sky", "--timeout", "0", "Tokyo"]).is_err());
    }

    #[test]
    fn no_city_means_prompt() {
        let cli = Cli::try_parse_from(["sky"]).unwrap();
        assert!(cli.city.is_empty());
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let cli = Cli::try_parse_from(["sky", "--config", "/nonexistent/sky/config.toml", "Tokyo"])
            .unwrap();

        let err = cli.load_config().unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn lookup_errors_render_their_own_message() {
        let err = anyhow::Error::from(SkyError::NotFound);
        assert_eq!(render_failure(&err), "Error: location not found\n");
    }

    #[test]
    fn other_errors_render_with_context() {
        let err = anyhow::anyhow!("unexpected EOF").context("failed to read input");
        assert_eq!(render_failure(&err), "Error: failed to read input: unexpected EOF\n");
    }
}
