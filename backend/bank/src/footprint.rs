//! # Footprint
//!
//! Client-side aggregation. A dish sums the per-kg footprint of every
//! ingredient selected for it, a bill sums the totals of its dishes.
//! Totals leave here as two-decimal strings ready to post.
use serde::Deserialize;

use crate::{
    error::{DraftError, StoreError},
    payloads::{BillPayload, DishPayload},
    records::{Bill, Dish},
    store::parse,
};

pub const INGREDIENTS_FILE: &str = "ingredients.csv";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Ingredient {
    #[serde(rename = "Ingredient")]
    pub name: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Carbon Footprint (kg CO2e/kg)")]
    pub carbon: String,
    #[serde(rename = "Water Usage (L/kg)")]
    pub water: String,
}

impl Ingredient {
    pub fn carbon_per_kg(&self) -> f64 {
        amount(&self.carbon)
    }

    pub fn water_per_kg(&self) -> f64 {
        amount(&self.water)
    }
}

/// Read-only ingredient reference list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    ingredients: Vec<Ingredient>,
}

impl Catalog {
    pub fn parse(content: &str) -> Result<Self, StoreError> {
        let ingredients: Vec<Ingredient> = parse(content.as_bytes())?;

        Ok(Self {
            ingredients: ingredients
                .into_iter()
                .filter(|ingredient| !ingredient.name.is_empty())
                .collect(),
        })
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn get(&self, name: &str) -> Option<&Ingredient> {
        self.ingredients
            .iter()
            .find(|ingredient| ingredient.name == name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DishDraft {
    pub name: String,
    pub price: String,
    selected: Vec<Ingredient>,
}

impl DishDraft {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            selected: Vec::new(),
        }
    }

    /// Selecting the same ingredient twice counts it twice.
    pub fn select(&mut self, ingredient: &Ingredient) {
        self.selected.push(ingredient.clone());
    }

    pub fn select_by_name(&mut self, catalog: &Catalog, name: &str) -> Result<(), DraftError> {
        let ingredient = catalog
            .get(name)
            .ok_or_else(|| DraftError::UnknownIngredient(name.to_string()))?;

        self.select(ingredient);
        Ok(())
    }

    pub fn total_carbon(&self) -> f64 {
        self.selected.iter().map(Ingredient::carbon_per_kg).sum()
    }

    pub fn total_water(&self) -> f64 {
        self.selected.iter().map(Ingredient::water_per_kg).sum()
    }

    /// Carbon per ingredient category, categories in first-selected order.
    pub fn carbon_by_category(&self) -> Vec<(String, f64)> {
        let mut categories: Vec<(String, f64)> = Vec::new();

        for ingredient in &self.selected {
            match categories
                .iter_mut()
                .find(|(category, _)| *category == ingredient.category)
            {
                Some((_, carbon)) => *carbon += ingredient.carbon_per_kg(),
                None => {
                    categories.push((ingredient.category.clone(), ingredient.carbon_per_kg()));
                }
            }
        }

        categories
    }

    pub fn into_payload(self) -> Result<DishPayload, DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::MissingName);
        }

        if self.selected.is_empty() {
            return Err(DraftError::EmptySelection);
        }

        let price: f64 = self
            .price
            .trim()
            .parse()
            .map_err(|_| DraftError::InvalidPrice(self.price.clone()))?;

        if !price.is_finite() {
            return Err(DraftError::InvalidPrice(self.price));
        }

        Ok(DishPayload {
            carbon: Some(two_places(self.total_carbon())),
            water: Some(two_places(self.total_water())),
            price: Some(two_places(price)),
            ingredients: Some(join(self.selected.iter().map(|i| i.name.as_str()))),
            name: Some(self.name),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct BillDraft {
    pub name: String,
    selected: Vec<Dish>,
}

impl BillDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selected: Vec::new(),
        }
    }

    pub fn select(&mut self, dish: &Dish) {
        self.selected.push(dish.clone());
    }

    /// First dish with that exact name wins.
    pub fn select_by_name(&mut self, dishes: &[Dish], name: &str) -> Result<(), DraftError> {
        let dish = dishes
            .iter()
            .find(|dish| dish.name == name)
            .ok_or_else(|| DraftError::UnknownDish(name.to_string()))?;

        self.select(dish);
        Ok(())
    }

    pub fn total_carbon(&self) -> f64 {
        self.selected.iter().map(|dish| amount(&dish.carbon)).sum()
    }

    pub fn total_water(&self) -> f64 {
        self.selected.iter().map(|dish| amount(&dish.water)).sum()
    }

    pub fn total_price(&self) -> f64 {
        self.selected.iter().map(|dish| amount(&dish.price)).sum()
    }

    pub fn into_payload(self) -> Result<BillPayload, DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::MissingName);
        }

        if self.selected.is_empty() {
            return Err(DraftError::EmptySelection);
        }

        Ok(BillPayload {
            carbon: Some(two_places(self.total_carbon())),
            water: Some(two_places(self.total_water())),
            price: Some(two_places(self.total_price())),
            dishes: Some(join(self.selected.iter().map(|d| d.name.as_str()))),
            name: Some(self.name),
        })
    }
}

/// Bills still open, in their original order.
pub fn active_bills(bills: Vec<Bill>) -> Vec<Bill> {
    bills
        .into_iter()
        .filter(|bill| !bill.is_checked_out())
        .collect()
}

/// Unparsable amounts count as zero.
pub fn amount(value: &str) -> f64 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

pub fn two_places(value: f64) -> String {
    format!("{value:.2}")
}

fn join<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{FALSE, TRUE};

    const CATALOG: &str = "\
Ingredient,Category,Carbon Footprint (kg CO2e/kg),Water Usage (L/kg),Source
Lettuce,Vegetable,1.5,100,FAO
Tomato,Vegetable,0.25,50,FAO
Beef,Meat,60.0,15400,FAO
,,,,
";

    fn dish(name: &str, carbon: &str, water: &str, price: &str) -> Dish {
        Dish {
            name: name.to_string(),
            carbon: carbon.to_string(),
            water: water.to_string(),
            price: price.to_string(),
            ..Dish::default()
        }
    }

    #[test]
    fn test_catalog_parse() {
        let catalog = Catalog::parse(CATALOG).unwrap();

        assert_eq!(catalog.ingredients().len(), 3);
        assert_eq!(catalog.get("Beef").unwrap().category, "Meat");
        assert_eq!(catalog.get("Tomato").unwrap().water_per_kg(), 50.0);
        assert!(catalog.get("tomato").is_none());
    }

    #[test]
    fn test_dish_totals() {
        let catalog = Catalog::parse(CATALOG).unwrap();

        let mut draft = DishDraft::new("Salad", "120");
        draft.select_by_name(&catalog, "Lettuce").unwrap();
        draft.select_by_name(&catalog, "Tomato").unwrap();

        let payload = draft.into_payload().unwrap();
        assert_eq!(payload.name.as_deref(), Some("Salad"));
        assert_eq!(payload.ingredients.as_deref(), Some("Lettuce, Tomato"));
        assert_eq!(payload.carbon.as_deref(), Some("1.75"));
        assert_eq!(payload.water.as_deref(), Some("150.00"));
        assert_eq!(payload.price.as_deref(), Some("120.00"));
    }

    #[test]
    fn test_dish_repeated_ingredient() {
        let catalog = Catalog::parse(CATALOG).unwrap();

        let mut draft = DishDraft::new("Double Tomato", "10");
        draft.select_by_name(&catalog, "Tomato").unwrap();
        draft.select_by_name(&catalog, "Tomato").unwrap();

        assert_eq!(draft.total_carbon(), 0.5);
        assert_eq!(
            draft.into_payload().unwrap().ingredients.as_deref(),
            Some("Tomato, Tomato")
        );
    }

    #[test]
    fn test_carbon_by_category() {
        let catalog = Catalog::parse(CATALOG).unwrap();

        let mut draft = DishDraft::new("Burger", "250");
        for name in ["Tomato", "Beef", "Lettuce", "Tomato", "Beef"] {
            draft.select_by_name(&catalog, name).unwrap();
        }

        assert_eq!(
            draft.carbon_by_category(),
            vec![
                ("Vegetable".to_string(), 2.0),
                ("Meat".to_string(), 120.0),
            ]
        );
        assert!(DishDraft::new("Empty", "0").carbon_by_category().is_empty());
    }

    #[test]
    fn test_dish_draft_errors() {
        let catalog = Catalog::parse(CATALOG).unwrap();

        let mut draft = DishDraft::new("Salad", "120");
        assert_eq!(
            draft.select_by_name(&catalog, "Kale"),
            Err(DraftError::UnknownIngredient("Kale".to_string()))
        );
        assert_eq!(draft.clone().into_payload(), Err(DraftError::EmptySelection));

        draft.select_by_name(&catalog, "Lettuce").unwrap();
        draft.price = "cheap".to_string();
        assert_eq!(
            draft.clone().into_payload(),
            Err(DraftError::InvalidPrice("cheap".to_string()))
        );

        draft.name = "  ".to_string();
        assert_eq!(draft.into_payload(), Err(DraftError::MissingName));
    }

    #[test]
    fn test_bill_totals_skip_unparsable() {
        let dishes = vec![
            dish("Salad", "1.75", "150.00", "120.00"),
            dish("Soup", "0.50", "abc", "80.50"),
            dish("Salad", "9.99", "9.99", "9.99"),
        ];

        let mut draft = BillDraft::new("Table 4");
        draft.select_by_name(&dishes, "Salad").unwrap();
        draft.select_by_name(&dishes, "Soup").unwrap();

        let payload = draft.into_payload().unwrap();
        assert_eq!(payload.dishes.as_deref(), Some("Salad, Soup"));
        assert_eq!(payload.carbon.as_deref(), Some("2.25"));
        assert_eq!(payload.water.as_deref(), Some("150.00"));
        assert_eq!(payload.price.as_deref(), Some("200.50"));
    }

    #[test]
    fn test_bill_draft_errors() {
        let mut draft = BillDraft::new("Table 4");
        assert_eq!(
            draft.select_by_name(&[], "Salad"),
            Err(DraftError::UnknownDish("Salad".to_string()))
        );
        assert_eq!(draft.into_payload(), Err(DraftError::EmptySelection));
    }

    #[test]
    fn test_active_bills() {
        let bill = |name: &str, checked_out: &str| Bill {
            name: name.to_string(),
            checked_out: checked_out.to_string(),
            ..Bill::default()
        };

        let active = active_bills(vec![
            bill("a", FALSE),
            bill("b", TRUE),
            bill("c", "TRUE"),
            bill("d", FALSE),
        ]);

        let names: Vec<&str> = active.iter().map(|bill| bill.name.as_str()).collect();
        assert_eq!(names, ["a", "c", "d"]);
    }

    #[test]
    fn test_amount() {
        assert_eq!(amount("12.5"), 12.5);
        assert_eq!(amount(" 3 "), 3.0);
        assert_eq!(amount(""), 0.0);
        assert_eq!(amount("NaN"), 0.0);
        assert_eq!(two_places(1.0 / 3.0), "0.33");
    }
}
