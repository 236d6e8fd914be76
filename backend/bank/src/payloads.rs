//! Request bodies for creating dishes and bills.
//!
//! Text fields accept a JSON string or number. Empty strings, zero, `false`
//! and `null` all count as absent, which is how the browser client has always
//! treated them. Objects and arrays count as absent too, so an amount sent as
//! one falls back to `"0.00"` instead of failing the whole body.
use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DishPayload {
    #[serde(rename = "Dish Name", default, deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(rename = "Ingredients", default, deserialize_with = "text")]
    pub ingredients: Option<String>,
    #[serde(
        rename = "Total Carbon Footprint (kg CO2e)",
        default,
        deserialize_with = "text",
        skip_serializing_if = "Option::is_none"
    )]
    pub carbon: Option<String>,
    #[serde(
        rename = "Total Water Usage (L)",
        default,
        deserialize_with = "text",
        skip_serializing_if = "Option::is_none"
    )]
    pub water: Option<String>,
    #[serde(
        rename = "Price (INR)",
        default,
        deserialize_with = "text",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillPayload {
    #[serde(rename = "Bill Name", default, deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(rename = "Dishes", default, deserialize_with = "text")]
    pub dishes: Option<String>,
    #[serde(
        rename = "Total Carbon Footprint (kg CO2e)",
        default,
        deserialize_with = "text",
        skip_serializing_if = "Option::is_none"
    )]
    pub carbon: Option<String>,
    #[serde(
        rename = "Total Water Usage (L)",
        default,
        deserialize_with = "text",
        skip_serializing_if = "Option::is_none"
    )]
    pub water: Option<String>,
    #[serde(
        rename = "Total Price (INR)",
        default,
        deserialize_with = "text",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Text {
    String(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Bool(bool),
    Other(IgnoredAny),
}

impl Text {
    fn into_present(self) -> Option<String> {
        match self {
            Text::String(s) if s.is_empty() => None,
            Text::String(s) => Some(s),
            Text::Unsigned(0) | Text::Signed(0) | Text::Bool(false) => None,
            Text::Unsigned(n) => Some(n.to_string()),
            Text::Signed(n) => Some(n.to_string()),
            Text::Float(n) if n == 0.0 || n.is_nan() => None,
            Text::Float(n) => Some(n.to_string()),
            Text::Bool(true) => Some(true.to_string()),
            Text::Other(_) => None,
        }
    }
}

fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Text>::deserialize(deserializer)?.and_then(Text::into_present))
}
