use anyhow::{Error, anyhow};
use bank::{Bill, Dish, Ingredient, footprint::two_places};
use reqwest::Url;

/// Appends percent-encoded path segments to the server URL.
pub fn endpoint(server: &Url, segments: &[&str]) -> Result<Url, Error> {
    let mut url = server.clone();

    url.path_segments_mut()
        .map_err(|_| anyhow!("{server} cannot be used as a server URL"))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

pub fn ingredient_line(ingredient: &Ingredient) -> String {
    format!(
        "{:<24} {:<14} {:>8} kg CO2e/kg {:>8} L/kg",
        ingredient.name, ingredient.category, ingredient.carbon, ingredient.water
    )
}

pub fn dish_line(dish: &Dish) -> String {
    format!(
        "{:<24} {:>8} kg CO2e {:>10} L {:>10} INR  [{}]",
        dish.name, dish.carbon, dish.water, dish.price, dish.ingredients
    )
}

pub fn bill_line(bill: &Bill) -> String {
    format!(
        "{:<24} {:>8} kg CO2e {:>10} L {:>10} INR  {}  [{}]",
        bill.name, bill.carbon, bill.water, bill.price, bill.created, bill.dishes
    )
}

pub fn category_line(category: &str, carbon: f64) -> String {
    format!("  {:<22} {:>8} kg CO2e", category, two_places(carbon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_encodes_segments() {
        let server = Url::parse("http://localhost:3001").unwrap();

        let url = endpoint(&server, &["api", "bills", "Table 1/A"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/api/bills/Table%201%2FA");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let server = Url::parse("http://localhost:3001/dashboard/").unwrap();

        let url = endpoint(&server, &["api", "dishes"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/dashboard/api/dishes");
    }

    #[test]
    fn test_endpoint_rejects_opaque_url() {
        let server = Url::parse("mailto:chef@example.com").unwrap();

        assert!(endpoint(&server, &["api"]).is_err());
    }

    #[test]
    fn test_category_line() {
        assert_eq!(
            category_line("Vegetable", 1.75),
            "  Vegetable                  1.75 kg CO2e"
        );
    }

    #[test]
    fn test_bill_line() {
        let bill = Bill {
            name: "Table 1".to_string(),
            dishes: "Salad, Soup".to_string(),
            carbon: "2.25".to_string(),
            water: "170.00".to_string(),
            price: "200.50".to_string(),
            created: "2026-10-19".to_string(),
            checked_out: "false".to_string(),
        };

        let line = bill_line(&bill);
        assert!(line.starts_with("Table 1 "));
        assert!(line.ends_with("2026-10-19  [Salad, Soup]"));
    }
}
