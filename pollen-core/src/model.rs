use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parsed Pollen.com forecast response.
///
/// Every field the upstream API is known to omit, null out, or reshape is
/// optional here; the renderer decides what each gap means.
#[derive(Debug, Clone, Deserialize)]
pub struct PollenForecast {
    #[serde(rename = "ForecastDate")]
    pub forecast_date: Option<String>,

    #[serde(rename = "Location")]
    pub location: Option<ForecastLocation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastLocation {
    #[serde(rename = "DisplayLocation")]
    pub display_location: Option<String>,

    #[serde(rename = "ZIP")]
    pub zip: Option<String>,

    /// Daily records: index 0 is yesterday, index 1 is today.
    #[serde(default, deserialize_with = "periods_or_empty")]
    pub periods: Vec<ForecastPeriod>,
}

impl ForecastLocation {
    /// Today's record, per the upstream convention that `periods[1]` is today.
    pub fn today(&self) -> Option<&ForecastPeriod> {
        self.periods.get(1)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPeriod {
    #[serde(rename = "Index")]
    pub index: Option<f64>,

    #[serde(default, rename = "Triggers", deserialize_with = "lenient_triggers")]
    pub triggers: Vec<Trigger>,
}

impl ForecastPeriod {
    /// Allergen names carried by this period's triggers, in wire order.
    /// Triggers without a usable name are skipped.
    pub fn trigger_names(&self) -> Vec<String> {
        self.triggers
            .iter()
            .filter_map(|trigger| trigger.name.clone())
            .collect()
    }
}

/// One allergen entry of a period. `name` is `None` for malformed entries.
#[derive(Debug, Clone)]
pub struct Trigger {
    pub name: Option<String>,
}

fn periods_or_empty<'de, D>(deserializer: D) -> Result<Vec<ForecastPeriod>, D::Error>
where
    D: Deserializer<'de>,
{
    let periods = Option::<Vec<ForecastPeriod>>::deserialize(deserializer)?;
    Ok(periods.unwrap_or_default())
}

/// The API serves `Triggers` as an array of records, but older payloads used
/// an object keyed by allergen. Accept a sequence, a map, null, or anything
/// else; entries that do not carry a string `Name` become name-less triggers.
fn lenient_triggers<'de, D>(deserializer: D) -> Result<Vec<Trigger>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(value) = value else {
        return Ok(Vec::new());
    };

    let entries: Vec<&Value> = match &value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => Vec::new(),
    };

    Ok(entries
        .into_iter()
        .map(|entry| Trigger {
            name: entry.get("Name").and_then(Value::as_str).map(str::to_owned),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> PollenForecast {
        serde_json::from_value(value).expect("payload should deserialize")
    }

    #[test]
    fn parses_full_payload() {
        let forecast = parse(json!({
            "Type": "pollen",
            "ForecastDate": "2018-03-12T00:00:00-04:00",
            "Location": {
                "ZIP": "37206",
                "City": "NASHVILLE",
                "State": "TN",
                "periods": [
                    { "Type": "Yesterday", "Index": 7.9 },
                    {
                        "Type": "Today",
                        "Index": 8.2,
                        "Triggers": [
                            { "LGID": 272, "Name": "Alder", "PlantType": "Tree" },
                            { "LGID": 346, "Name": "Juniper", "PlantType": "Tree" }
                        ]
                    },
                    { "Type": "Tomorrow", "Index": 8.5 }
                ],
                "DisplayLocation": "Nashville, TN"
            }
        }));

        let location = forecast.location.expect("location should be present");
        assert_eq!(location.display_location.as_deref(), Some("Nashville, TN"));
        assert_eq!(location.zip.as_deref(), Some("37206"));
        assert_eq!(location.periods.len(), 3);

        let today = location.today().expect("today should be present");
        assert_eq!(today.index, Some(8.2));
        assert_eq!(today.trigger_names(), vec!["Alder", "Juniper"]);
    }

    #[test]
    fn missing_location_parses_to_none() {
        let forecast = parse(json!({ "Type": "pollen" }));
        assert!(forecast.location.is_none());
        assert!(forecast.forecast_date.is_none());
    }

    #[test]
    fn null_periods_parse_to_empty() {
        let forecast = parse(json!({ "Location": { "ZIP": "99501", "periods": null } }));
        let location = forecast.location.expect("location should be present");
        assert!(location.periods.is_empty());
        assert!(location.today().is_none());
    }

    #[test]
    fn absent_periods_parse_to_empty() {
        let forecast = parse(json!({ "Location": { "ZIP": "99501" } }));
        assert!(forecast.location.expect("location").periods.is_empty());
    }

    #[test]
    fn triggers_as_object_map_are_accepted() {
        let forecast = parse(json!({
            "Location": {
                "DisplayLocation": "Nashville, TN",
                "periods": [
                    {},
                    { "Index": 8.2, "Triggers": {
                        "alder": { "Name": "Alder" },
                        "juniper": { "Name": "Juniper" }
                    } }
                ]
            }
        }));

        let location = forecast.location.expect("location");
        let today = location.today().expect("today");
        assert_eq!(today.trigger_names(), vec!["Alder", "Juniper"]);
    }

    #[test]
    fn null_and_scalar_triggers_collapse_to_empty() {
        for triggers in [json!(null), json!(5), json!("grass")] {
            let forecast = parse(json!({
                "Location": {
                    "DisplayLocation": "Nashville, TN",
                    "periods": [{}, { "Index": 1.0, "Triggers": triggers }]
                }
            }));
            let location = forecast.location.expect("location");
            assert!(location.today().expect("today").triggers.is_empty());
        }
    }

    #[test]
    fn malformed_trigger_entries_keep_their_slot_but_lose_the_name() {
        let forecast = parse(json!({
            "Location": {
                "DisplayLocation": "Nashville, TN",
                "periods": [
                    {},
                    { "Index": 8.2, "Triggers": [
                        { "Name": "Alder" },
                        { "LGID": 1 },
                        { "Name": 42 },
                        "grass",
                        { "Name": "Maple" }
                    ] }
                ]
            }
        }));

        let location = forecast.location.expect("location");
        let today = location.today().expect("today");
        assert_eq!(today.triggers.len(), 5);
        assert_eq!(today.trigger_names(), vec!["Alder", "Maple"]);
    }
}
