use serde::{Deserialize, Deserializer, Serialize};

/// One carrier offer from the catalog.
///
/// Constraint fields are kept as the raw catalog text; they are interpreted by
/// [`crate::domain::constraints`] when an option is checked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShippingOption {
    /// Stable identifier, also the key for product-specific rules.
    #[serde(alias = "internalName")]
    pub internal_name: String,
    #[serde(default, deserialize_with = "string_from_json")]
    pub company: String,
    #[serde(default, deserialize_with = "string_from_json")]
    pub title: String,
    /// Decimal string, comma or dot separated.
    #[serde(default, deserialize_with = "string_from_json")]
    pub price: String,
    #[serde(default, deserialize_with = "optional_string_from_json")]
    pub weblink: Option<String>,
    #[serde(default, deserialize_with = "optional_string_from_json")]
    pub insurance: Option<String>,
    #[serde(default, deserialize_with = "optional_string_from_json")]
    pub conditions: Option<String>,
    #[serde(default, deserialize_with = "optional_string_from_json")]
    pub options: Option<String>,
    /// Weight with unit suffix, e.g. `"31,5kg"` or `"500"` (grams).
    #[serde(default, deserialize_with = "optional_string_from_json")]
    pub maximalweight: Option<String>,
    #[serde(default, deserialize_with = "optional_string_from_json")]
    pub minimalsizes: Option<String>,
    #[serde(default, deserialize_with = "optional_string_from_json")]
    pub maximalsizes: Option<String>,
    #[serde(
        default,
        rename = "_longestandshortestside",
        skip_serializing_if = "Option::is_none"
    )]
    pub longest_and_shortest_side: Option<SideSumLimit>,
}

impl ShippingOption {
    /// Minimal option used as a base in tests and fixtures.
    pub fn new(
        internal_name: impl Into<String>,
        company: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            internal_name: internal_name.into(),
            company: company.into(),
            title: String::new(),
            price: price.into(),
            weblink: None,
            insurance: None,
            conditions: None,
            options: None,
            maximalweight: None,
            minimalsizes: None,
            maximalsizes: None,
            longest_and_shortest_side: None,
        }
    }

    /// Text searched by the free-text filter: title, company, conditions and options.
    pub fn search_text(&self) -> String {
        [
            Some(self.title.as_str()),
            Some(self.company.as_str()),
            self.conditions.as_deref(),
            self.options.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|field| !field.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Raw value of the `_longestandshortestside` catalog field.
///
/// The catalog uses `false` for "not applicable" and a number or numeric string otherwise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SideSumLimit {
    Flag(bool),
    Number(f64),
    Text(String),
}

/// Top-level shape of the catalog document.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}

fn string_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_string_from_json(deserializer)?.unwrap_or_default())
}

/// Accepts strings and numbers; `null`, `false` and other shapes become `None`.
fn optional_string_from_json<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(text)) => Some(text),
        Some(serde_json::Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}
