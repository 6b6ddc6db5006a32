use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) const MIN_RATING: u8 = 1;
pub(crate) const MAX_RATING: u8 = 5;

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<RegisterRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for row in csv_reader.deserialize::<RegisterRow>() {
        rows.push(row?);
    }

    Ok(rows)
}

/// One raw register line; every column is optional.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RegisterRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) risk_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) risk_title: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) category: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) risk_owner: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) likelihood: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) impact: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) existing_controls: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) remediation_action: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) review_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) framework_ref: Option<String>,
}

/// Ratings outside 1-5 or that fail to parse fall back to 1.
pub(crate) fn coerce_rating(raw: Option<&str>) -> u8 {
    raw.and_then(|value| value.trim().parse::<u8>().ok())
        .filter(|rating| (MIN_RATING..=MAX_RATING).contains(rating))
        .unwrap_or(MIN_RATING)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
