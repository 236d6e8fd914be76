use bank::Bill;
use serde::Deserialize;

pub const DEFAULT_SERVER: &str = "http://localhost:3001";

pub const DISHES_PATH: &[&str] = &["api", "dishes"];
pub const BILLS_PATH: &[&str] = &["api", "bills"];
pub const INGREDIENTS_PATH: &[&str] = &["data", "ingredients.csv"];

#[derive(Deserialize)]
pub struct Saved {
    pub message: String,
}

#[derive(Deserialize)]
pub struct CheckedOut {
    pub message: String,
    pub bill: Bill,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ErrorBody {
    pub error: String,
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn describe(&self) -> String {
        match &self.details {
            Some(details) => format!("{}: {details}", self.error),
            None => self.error.clone(),
        }
    }
}
