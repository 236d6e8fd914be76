use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::IntoResponse,
};
use bank::{Bill, Dish};
use chrono::Utc;
use serde::Serialize;
use tracing::{error, info};

use crate::{
    error::AppError,
    state::State,
    utils::{
        READ_BILLS, READ_DISHES, SAVE_BILLS, SAVE_DISHES, UPDATE_BILL, blocking,
        get_bill_from_body, get_dish_from_body,
    },
};

#[derive(Serialize)]
pub struct Saved {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct CheckedOut {
    pub success: bool,
    pub message: &'static str,
    pub bill: Bill,
}

pub async fn dishes_handler(
    AxumState(state): AxumState<Arc<State>>,
) -> Result<Json<Vec<Dish>>, AppError> {
    let dishes = blocking(READ_DISHES, move || state.dishes.read_all())
        .await
        .inspect_err(|e| error!("Error reading dishes: {e}"))?;

    Ok(Json(dishes))
}

pub async fn save_dish_handler(
    AxumState(state): AxumState<Arc<State>>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let dish = get_dish_from_body(&body, Utc::now())
        .inspect_err(|e| error!("Error saving dish: {e}"))?;

    info!("Saving dish {}", dish.name);

    blocking(SAVE_DISHES, move || state.dishes.append(dish))
        .await?
        .map_err(AppError::store(SAVE_DISHES))
        .inspect_err(|e| error!("Error saving dish: {e}"))?;

    Ok((
        StatusCode::OK,
        Json(Saved {
            success: true,
            message: "Dish saved successfully",
        }),
    ))
}

pub async fn bills_handler(
    AxumState(state): AxumState<Arc<State>>,
) -> Result<Json<Vec<Bill>>, AppError> {
    let bills = blocking(READ_BILLS, move || state.bills.read_all())
        .await
        .inspect_err(|e| error!("Error reading bills: {e}"))?;

    Ok(Json(bills))
}

pub async fn save_bill_handler(
    AxumState(state): AxumState<Arc<State>>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let bill = get_bill_from_body(&body, Utc::now())
        .inspect_err(|e| error!("Error saving bill: {e}"))?;

    info!("Saving bill {}", bill.name);

    blocking(SAVE_BILLS, move || state.bills.append(bill))
        .await?
        .map_err(AppError::store(SAVE_BILLS))
        .inspect_err(|e| error!("Error saving bill: {e}"))?;

    Ok((
        StatusCode::OK,
        Json(Saved {
            success: true,
            message: "Bill saved successfully",
        }),
    ))
}

/// `bill_name` arrives percent-decoded by the path extractor.
pub async fn checkout_handler(
    AxumState(state): AxumState<Arc<State>>,
    Path(bill_name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    info!("Checking out bill {bill_name}");

    let bill = blocking(UPDATE_BILL, move || state.bills.checkout(&bill_name))
        .await?
        .map_err(AppError::store(UPDATE_BILL))
        .inspect_err(|e| error!("Error updating bill: {e}"))?;

    Ok((
        StatusCode::OK,
        Json(CheckedOut {
            success: true,
            message: "Bill checked out successfully",
            bill,
        }),
    ))
}
