use axum::body::Bytes;
use bank::{
    Bill, BillPayload, Dish, DishPayload,
    records::{FALSE, amount_or_zero},
};
use chrono::{DateTime, SecondsFormat, Utc};
use tokio::task::spawn_blocking;

use crate::error::AppError;

pub const READ_DISHES: &str = "Error reading dishes data";
pub const SAVE_DISHES: &str = "Error saving dishes data";
pub const READ_BILLS: &str = "Error reading bills data";
pub const SAVE_BILLS: &str = "Error saving bill data";
pub const UPDATE_BILL: &str = "Failed to update bill";

const INVALID_DISH: &str = "Invalid dish data provided";
const INVALID_BILL: &str = "Invalid bill data provided";

/// Runs file I/O off the async workers.
pub async fn blocking<T, F>(context: &'static str, work: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    spawn_blocking(work).await.map_err(AppError::internal(context))
}

pub fn get_dish_from_body(body: &Bytes, now: DateTime<Utc>) -> Result<Dish, AppError> {
    let invalid = AppError::InvalidPayload {
        context: SAVE_DISHES,
        details: INVALID_DISH,
    };

    let Ok(payload) = serde_json::from_slice::<DishPayload>(body) else {
        return Err(invalid);
    };

    let (Some(name), Some(ingredients)) = (payload.name, payload.ingredients) else {
        return Err(invalid);
    };

    Ok(Dish {
        name,
        ingredients,
        carbon: amount_or_zero(payload.carbon),
        water: amount_or_zero(payload.water),
        price: amount_or_zero(payload.price),
        created: timestamp(now),
    })
}

pub fn get_bill_from_body(body: &Bytes, now: DateTime<Utc>) -> Result<Bill, AppError> {
    let invalid = AppError::InvalidPayload {
        context: SAVE_BILLS,
        details: INVALID_BILL,
    };

    let Ok(payload) = serde_json::from_slice::<BillPayload>(body) else {
        return Err(invalid);
    };

    let (Some(name), Some(dishes)) = (payload.name, payload.dishes) else {
        return Err(invalid);
    };

    Ok(Bill {
        name,
        dishes,
        carbon: amount_or_zero(payload.carbon),
        water: amount_or_zero(payload.water),
        price: amount_or_zero(payload.price),
        created: date(now),
        checked_out: FALSE.to_string(),
    })
}

/// `2026-10-19T08:15:30.123Z`
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `2026-10-19`
pub fn date(now: DateTime<Utc>) -> String {
    now.date_naive().format("%Y-%m-%d").to_string()
}
