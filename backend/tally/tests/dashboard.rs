use std::fs;

use server::{build_router, config::Config, state::State};
use tally::Dashboard;
use tempfile::{TempDir, tempdir};
use tokio::net::TcpListener;

const CATALOG: &str = "\
Ingredient,Category,Carbon Footprint (kg CO2e/kg),Water Usage (L/kg)
Lettuce,Vegetable,1.5,100
Tomato,Vegetable,0.25,50
Lentils,Legume,0.9,1250
";

async fn spawn_server() -> (Dashboard, TempDir) {
    let dir = tempdir().expect("tempdir");
    let config = Config {
        port: 0,
        public_dir: dir.path().to_path_buf(),
        cors_origin: "http://localhost:3000".to_string(),
    };

    let state = State::new(config).expect("state");
    fs::write(dir.path().join("data").join("ingredients.csv"), CATALOG).expect("catalog");

    let app = build_router(state).expect("router");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    let dashboard = Dashboard::new(&format!("http://{addr}")).expect("dashboard");
    (dashboard, dir)
}

#[tokio::test]
async fn dish_to_checkout() {
    let (dashboard, _dir) = spawn_server().await;

    let catalog = dashboard.ingredients().await.expect("ingredients");
    assert_eq!(catalog.ingredients().len(), 3);

    let salad = dashboard
        .save_dish(
            "Salad",
            "120",
            &["Lettuce".to_string(), "Tomato".to_string()],
        )
        .await
        .expect("save salad");
    assert_eq!(salad.payload.carbon.as_deref(), Some("1.75"));
    assert_eq!(
        salad.carbon_by_category,
        vec![("Vegetable".to_string(), 1.75)]
    );

    dashboard
        .save_dish("Dal", "80.5", &["Lentils".to_string()])
        .await
        .expect("save dal");

    let dishes = dashboard.dishes().await.expect("dishes");
    assert_eq!(dishes.len(), 2);
    assert_eq!(dishes[0].ingredients, "Lettuce, Tomato");
    assert_eq!(dishes[1].price, "80.50");

    let bill = dashboard
        .save_bill("Table 1", &["Salad".to_string(), "Dal".to_string()])
        .await
        .expect("save bill");
    assert_eq!(bill.carbon.as_deref(), Some("2.65"));
    assert_eq!(bill.water.as_deref(), Some("1400.00"));
    assert_eq!(bill.price.as_deref(), Some("200.50"));

    let active = dashboard.active_bills().await.expect("bills");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].dishes, "Salad, Dal");

    let checked_out = dashboard.checkout("Table 1").await.expect("checkout");
    assert_eq!(checked_out.checked_out, "true");

    assert!(dashboard.active_bills().await.expect("bills").is_empty());
}

#[tokio::test]
async fn unknown_names_are_reported() {
    let (dashboard, _dir) = spawn_server().await;

    let error = dashboard
        .save_dish("Salad", "10", &["Kale".to_string()])
        .await
        .expect_err("unknown ingredient");
    assert!(error.to_string().contains("Kale"));

    let error = dashboard
        .save_bill("Table 1", &["Salad".to_string()])
        .await
        .expect_err("unknown dish");
    assert!(error.to_string().contains("Salad"));

    let error = dashboard.checkout("Table 9").await.expect_err("unknown bill");
    assert!(error.to_string().contains("Bill not found"));
}
