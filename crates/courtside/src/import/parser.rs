use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug, PartialEq)]
pub(crate) struct AssessmentRow {
    pub(crate) label: String,
    pub(crate) value: f64,
    pub(crate) potential: Option<f64>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<AssessmentRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<RawRow>() {
        let row = record?;
        let Some(label) = row.attribute.filter(|label| !label.is_empty()) else {
            continue;
        };
        let Some(value) = row.value else {
            continue;
        };

        rows.push(AssessmentRow {
            label,
            value,
            potential: row.potential,
        });
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(
        rename = "Attribute",
        alias = "attribute",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    attribute: Option<String>,
    #[serde(
        rename = "Value",
        alias = "value",
        default,
        deserialize_with = "empty_number_as_none"
    )]
    value: Option<f64>,
    #[serde(
        rename = "Potential",
        alias = "potential",
        default,
        deserialize_with = "empty_number_as_none"
    )]
    potential: Option<f64>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

fn empty_number_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<f64>()
            .map(Some)
            .map_err(|err| serde::de::Error::custom(format!("invalid score '{raw}': {err}"))),
    }
}
