//! # Records
//!
//! Flat rows persisted by the store. Every value is text on disk, numeric
//! fields are decimal strings formatted to two places.
//!
//! The serde names double as the CSV header and the JSON key, so the browser
//! client and the files agree on spelling. Column order on disk comes from
//! [`Record::HEADERS`], not from whichever keys happen to be present.
use serde::{Deserialize, Serialize, de::DeserializeOwned};

pub const DISHES_FILE: &str = "dishes.csv";
pub const BILLS_FILE: &str = "bills.csv";

pub const DISH_NAME: &str = "Dish Name";
pub const INGREDIENTS: &str = "Ingredients";
pub const BILL_NAME: &str = "Bill Name";
pub const DISHES: &str = "Dishes";
pub const TOTAL_CARBON: &str = "Total Carbon Footprint (kg CO2e)";
pub const TOTAL_WATER: &str = "Total Water Usage (L)";
pub const PRICE: &str = "Price (INR)";
pub const TOTAL_PRICE: &str = "Total Price (INR)";
pub const DATE_CREATED: &str = "Date Created";
pub const CHECKED_OUT: &str = "CheckedOut";

pub const ZERO_AMOUNT: &str = "0.00";
pub const TRUE: &str = "true";
pub const FALSE: &str = "false";

/// A collection row with a fixed column layout.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + 'static {
    const FILE_NAME: &'static str;
    const HEADERS: &'static [&'static str];

    /// Lookup key, compared by exact match.
    fn key(&self) -> &str;

    /// Applied to every row on read and again before a rewrite.
    fn normalize(&mut self) {}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dish {
    #[serde(rename = "Dish Name")]
    pub name: String,
    #[serde(rename = "Ingredients")]
    pub ingredients: String,
    #[serde(rename = "Total Carbon Footprint (kg CO2e)")]
    pub carbon: String,
    #[serde(rename = "Total Water Usage (L)")]
    pub water: String,
    #[serde(rename = "Price (INR)")]
    pub price: String,
    #[serde(rename = "Date Created")]
    pub created: String,
}

impl Record for Dish {
    const FILE_NAME: &'static str = DISHES_FILE;
    const HEADERS: &'static [&'static str] = &[
        DISH_NAME,
        INGREDIENTS,
        TOTAL_CARBON,
        TOTAL_WATER,
        PRICE,
        DATE_CREATED,
    ];

    fn key(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bill {
    #[serde(rename = "Bill Name")]
    pub name: String,
    #[serde(rename = "Dishes")]
    pub dishes: String,
    #[serde(rename = "Total Carbon Footprint (kg CO2e)")]
    pub carbon: String,
    #[serde(rename = "Total Water Usage (L)")]
    pub water: String,
    #[serde(rename = "Total Price (INR)")]
    pub price: String,
    #[serde(rename = "Date Created")]
    pub created: String,
    #[serde(rename = "CheckedOut")]
    pub checked_out: String,
}

impl Bill {
    pub fn is_checked_out(&self) -> bool {
        self.checked_out == TRUE
    }
}

impl Record for Bill {
    const FILE_NAME: &'static str = BILLS_FILE;
    const HEADERS: &'static [&'static str] = &[
        BILL_NAME,
        DISHES,
        TOTAL_CARBON,
        TOTAL_WATER,
        TOTAL_PRICE,
        DATE_CREATED,
        CHECKED_OUT,
    ];

    fn key(&self) -> &str {
        &self.name
    }

    // Older bill files predate the CheckedOut column.
    fn normalize(&mut self) {
        if self.checked_out.is_empty() {
            self.checked_out = FALSE.to_string();
        }
    }
}

/// Numeric field as sent by a client, `"0.00"` when absent or empty.
pub fn amount_or_zero(value: Option<String>) -> String {
    value
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| ZERO_AMOUNT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_of<R: Record + Default>() -> Vec<String> {
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(R::default()).unwrap();
        let bytes = writer.into_inner().unwrap();

        let text = String::from_utf8(bytes).unwrap();
        let first = text.lines().next().unwrap().to_string();

        first.split(',').map(str::to_string).collect()
    }

    #[test]
    fn test_dish_headers_match_field_order() {
        assert_eq!(header_of::<Dish>(), Dish::HEADERS);
    }

    #[test]
    fn test_bill_headers_match_field_order() {
        assert_eq!(header_of::<Bill>(), Bill::HEADERS);
    }

    #[test]
    fn test_bill_normalize_backfills_checked_out() {
        let mut bill = Bill::default();
        bill.normalize();
        assert_eq!(bill.checked_out, FALSE);

        let mut bill = Bill {
            checked_out: TRUE.to_string(),
            ..Bill::default()
        };
        bill.normalize();
        assert_eq!(bill.checked_out, TRUE);
        assert!(bill.is_checked_out());
    }

    #[test]
    fn test_amount_or_zero() {
        assert_eq!(amount_or_zero(None), "0.00");
        assert_eq!(amount_or_zero(Some(String::new())), "0.00");
        assert_eq!(amount_or_zero(Some("12.50".to_string())), "12.50");
    }
}
