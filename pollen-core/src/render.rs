use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;

use crate::client::{FetchError, web_link};
use crate::model::PollenForecast;
use crate::severity::classify;

const ATTRIBUTION_NAME: &str = "Pollen.com";
const ATTRIBUTION_LINK: &str = "https://www.pollen.com/";
const ATTRIBUTION_ICON: &str = "https://www.pollen.com/Content/favicon/apple-touch-icon-72x72.png";

/// Stands in for the allergen list when no trigger carries a name.
const SEASON_COMPLETE: &str = "The pollen season in the area has completed.";

const TODAY_UNAVAILABLE: &str = "Pollen forecast is unavailable for today.";

/// Whether the requesting chat surface can display structured cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceCapability {
    PlainText,
    Cards,
}

/// One reply, ready for the dispatcher's sink.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedMessage {
    PlainText(String),
    Card(Card),
}

/// Structured attachment for card-capable surfaces. Serializes to the
/// wire shape the reply sink expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub fallback: String,
    pub title: String,
    pub title_link: String,
    pub author_name: String,
    pub author_link: String,
    pub author_icon: String,
    pub footer: String,
    pub color: String,
    pub fields: Vec<CardField>,
    pub ts: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardField {
    pub title: String,
    pub value: String,
    pub short: bool,
}

/// Turns a fetch outcome into exactly one reply.
///
/// Fetch errors and unusable payloads always render as plain text; the
/// capability flag only chooses between the line and the card once a
/// usable forecast exists.
pub fn render(
    outcome: &Result<PollenForecast, FetchError>,
    capability: SurfaceCapability,
) -> RenderedMessage {
    let forecast = match outcome {
        Ok(forecast) => forecast,
        Err(err) => {
            return RenderedMessage::PlainText(format!("Error retrieving forecast: {err}"));
        }
    };

    let Some(location) = forecast.location.as_ref() else {
        return RenderedMessage::PlainText(no_forecast_reply(None));
    };
    let usable = location
        .display_location
        .as_deref()
        .filter(|name| !name.is_empty() && !location.periods.is_empty());
    let Some(display_location) = usable else {
        return RenderedMessage::PlainText(no_forecast_reply(location.zip.as_deref()));
    };

    let Some(today) = location.today() else {
        return RenderedMessage::PlainText(TODAY_UNAVAILABLE.to_string());
    };
    let Some(index) = today.index.filter(|index| *index != 0.0 && !index.is_nan()) else {
        return RenderedMessage::PlainText(TODAY_UNAVAILABLE.to_string());
    };

    let tier = classify(index);
    let mut allergens = today.trigger_names();
    if allergens.is_empty() {
        allergens.push(SEASON_COMPLETE.to_string());
    }
    let types = allergens.join(", ");
    let line = format!("{display_location} Pollen: {index} ({tier}) - {types}");

    match capability {
        SurfaceCapability::Cards => RenderedMessage::Card(Card {
            fallback: line,
            title: format!("{display_location} Pollen"),
            title_link: web_link(location.zip.as_deref().unwrap_or_default()),
            author_name: ATTRIBUTION_NAME.to_string(),
            author_link: ATTRIBUTION_LINK.to_string(),
            author_icon: ATTRIBUTION_ICON.to_string(),
            footer: ATTRIBUTION_NAME.to_string(),
            color: tier.color().to_string(),
            fields: vec![
                CardField {
                    title: "Level".to_string(),
                    value: tier.label().to_string(),
                    short: true,
                },
                CardField {
                    title: "Count".to_string(),
                    value: index.to_string(),
                    short: true,
                },
                CardField {
                    title: "Types".to_string(),
                    value: types,
                    short: false,
                },
            ],
            ts: forecast_timestamp(forecast.forecast_date.as_deref()),
        }),
        SurfaceCapability::PlainText => RenderedMessage::PlainText(line),
    }
}

fn no_forecast_reply(zip: Option<&str>) -> String {
    format!("{} Pollen: No forecast available.", zip.unwrap_or("Unknown"))
}

/// Forecast dates arrive with an offset, but have also been seen bare.
/// Unparseable or absent dates pin the card to the epoch so rendering
/// stays deterministic.
fn forecast_timestamp(forecast_date: Option<&str>) -> i64 {
    let Some(raw) = forecast_date else { return 0 };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.timestamp();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Utc.from_utc_datetime(&naive).timestamp();
    }
    0
}
