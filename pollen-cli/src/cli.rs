use clap::{ArgAction, Parser, Subcommand};
use inquire::Text;
use inquire::validator::Validation;
use tracing::error;

use pollen_core::{
    Config, ForecastFetcher, PollenComClient, RenderedMessage, SurfaceCapability, render,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "pollen", version, about = "Pollen forecast bot")]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up the pollen forecast for a ZIP code.
    Forecast {
        /// 5-digit ZIP code; falls back to the configured default.
        #[arg(value_parser = parse_zip)]
        zip: Option<String>,

        /// Reply with the structured card instead of the plain line.
        #[arg(long)]
        cards: bool,
    },

    /// Store the default ZIP code.
    Configure {
        /// 5-digit ZIP code; prompts interactively when omitted.
        #[arg(value_parser = parse_zip)]
        zip: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Forecast { zip, cards } => run_forecast(zip, cards).await,
            Command::Configure { zip } => run_configure(zip),
        }
    }
}

async fn run_forecast(zip: Option<String>, cards: bool) -> anyhow::Result<()> {
    let zip = match zip {
        Some(zip) => zip,
        None => Config::load()?.resolve_default_zip(),
    };
    let capability = if cards {
        SurfaceCapability::Cards
    } else {
        SurfaceCapability::PlainText
    };

    let client = PollenComClient::new();
    let outcome = client.fetch_forecast(&zip).await;
    if let Err(err) = &outcome {
        error!(%zip, %err, "pollen forecast fetch failed");
    }

    // A failed fetch still gets a reply; the command never goes unanswered.
    send_reply(&render(&outcome, capability))
}

fn send_reply(message: &RenderedMessage) -> anyhow::Result<()> {
    match message {
        RenderedMessage::PlainText(text) => println!("{text}"),
        RenderedMessage::Card(card) => {
            let payload = serde_json::json!({ "attachments": [card] });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    Ok(())
}

fn run_configure(zip: Option<String>) -> anyhow::Result<()> {
    let zip = match zip {
        Some(zip) => zip,
        None => prompt_for_zip()?,
    };

    let mut cfg = Config::load()?;
    cfg.set_default_zip(zip.clone());
    cfg.save()?;

    println!("Default ZIP code set to {zip}.");

    Ok(())
}

fn prompt_for_zip() -> anyhow::Result<String> {
    let zip = Text::new("Default ZIP code:")
        .with_validator(|input: &str| {
            if is_zip(input) {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid("Enter a 5-digit ZIP code.".into()))
            }
        })
        .prompt()?;

    Ok(zip)
}

fn is_zip(value: &str) -> bool {
    value.len() == 5 && value.bytes().all(|b| b.is_ascii_digit())
}

fn parse_zip(value: &str) -> Result<String, String> {
    if is_zip(value) {
        Ok(value.to_string())
    } else {
        Err("expected a 5-digit ZIP code".to_string())
    }
}
