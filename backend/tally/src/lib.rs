//! # Tally
//!
//! Command-line stand-in for the browser dashboard. Talks to the same HTTP API.
//!
//! ## Flow
//!
//! 1. Hydrate: ingredients from the static `data/ingredients.csv`, dishes and bills from the API.
//!
//! 2. Compose a dish from catalog ingredients or a bill from saved dishes. Totals are summed here,
//!    the server stores whatever it is sent.
//!
//! 3. POST the finished record. Nothing is re-fetched afterwards.
//!
//! 4. Checkout is a PUT keyed by bill name. The bill then drops out of the active list.
use anyhow::{Context, Error, bail};
use bank::{
    Bill, BillDraft, BillPayload, Catalog, Dish, DishDraft, DishPayload,
    footprint::active_bills,
};
use reqwest::{Client, Response, StatusCode, Url};
use serde::Serialize;
use tracing::{debug, info};

pub mod models;
pub mod utils;

use models::{BILLS_PATH, CheckedOut, DISHES_PATH, ErrorBody, INGREDIENTS_PATH, Saved};
use utils::endpoint;

/// A posted dish with the per-category carbon of its ingredients.
#[derive(Debug)]
pub struct SavedDish {
    pub payload: DishPayload,
    pub carbon_by_category: Vec<(String, f64)>,
}

pub struct Dashboard {
    server: Url,
    client: Client,
}

impl Dashboard {
    pub fn new(server: &str) -> Result<Self, Error> {
        let server = Url::parse(server).with_context(|| format!("invalid server URL {server}"))?;

        Ok(Self {
            server,
            client: Client::new(),
        })
    }

    pub async fn ingredients(&self) -> Result<Catalog, Error> {
        let url = endpoint(&self.server, INGREDIENTS_PATH)?;
        debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            bail!("Failed to load ingredients: {}", response.status());
        }

        Ok(Catalog::parse(&response.text().await?)?)
    }

    pub async fn dishes(&self) -> Result<Vec<Dish>, Error> {
        let url = endpoint(&self.server, DISHES_PATH)?;
        debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        let response = ok_or_error(response, "Failed to load dishes").await?;

        Ok(response.json().await?)
    }

    /// Bills not yet checked out.
    pub async fn active_bills(&self) -> Result<Vec<Bill>, Error> {
        let url = endpoint(&self.server, BILLS_PATH)?;
        debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        let response = ok_or_error(response, "Failed to load bills").await?;

        Ok(active_bills(response.json().await?))
    }

    pub async fn save_dish(
        &self,
        name: &str,
        price: &str,
        ingredients: &[String],
    ) -> Result<SavedDish, Error> {
        let catalog = self.ingredients().await?;

        let mut draft = DishDraft::new(name, price);
        for ingredient in ingredients {
            draft.select_by_name(&catalog, ingredient)?;
        }

        let carbon_by_category = draft.carbon_by_category();

        let payload = draft.into_payload()?;
        let message = self.post(DISHES_PATH, &payload, "Failed to save dish").await?;

        info!("{message}");
        Ok(SavedDish {
            payload,
            carbon_by_category,
        })
    }

    pub async fn save_bill(&self, name: &str, dishes: &[String]) -> Result<BillPayload, Error> {
        let saved = self.dishes().await?;

        let mut draft = BillDraft::new(name);
        for dish in dishes {
            draft.select_by_name(&saved, dish)?;
        }

        let payload = draft.into_payload()?;
        let message = self.post(BILLS_PATH, &payload, "Failed to save bill").await?;

        info!("{message}");
        Ok(payload)
    }

    pub async fn checkout(&self, bill_name: &str) -> Result<Bill, Error> {
        let mut segments: Vec<&str> = BILLS_PATH.to_vec();
        segments.push(bill_name);

        let url = endpoint(&self.server, &segments)?;
        debug!("PUT {url}");

        let response = self.client.put(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            bail!("Bill not found: {bill_name}");
        }

        let response = ok_or_error(response, "Failed to update bill").await?;
        let checked_out: CheckedOut = response.json().await?;

        info!("{}", checked_out.message);
        Ok(checked_out.bill)
    }

    async fn post<T: Serialize>(
        &self,
        segments: &[&str],
        payload: &T,
        context: &str,
    ) -> Result<String, Error> {
        let url = endpoint(&self.server, segments)?;
        debug!("POST {url}");

        let response = self.client.post(url).json(payload).send().await?;
        let saved: Saved = ok_or_error(response, context).await?.json().await?;

        Ok(saved.message)
    }
}

async fn ok_or_error(response: Response, context: &str) -> Result<Response, Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body: ErrorBody = response.json().await.unwrap_or_default();
    if body.error.is_empty() {
        bail!("{context}: {status}");
    }

    bail!("{context}: {}", body.describe())
}
