use anyhow::Error;
use clap::{Parser, Subcommand};
use tally::{
    Dashboard,
    models::DEFAULT_SERVER,
    utils::{bill_line, category_line, dish_line, ingredient_line},
};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Dashboard server base URL
    #[arg(long, env = "TALLY_SERVER", default_value = DEFAULT_SERVER)]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the ingredient catalog
    Ingredients,

    /// List saved dishes
    Dishes,

    /// List bills that are still open
    Bills,

    /// Compose a dish from catalog ingredients and save it
    Dish {
        name: String,

        #[arg(long)]
        price: String,

        #[arg(required = true)]
        ingredients: Vec<String>,
    },

    /// Group saved dishes into a bill and save it
    Bill {
        name: String,

        #[arg(required = true)]
        dishes: Vec<String>,
    },

    /// Mark a bill as checked out
    Checkout { name: String },
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();
    let dashboard = Dashboard::new(&args.server)?;

    match args.command {
        Command::Ingredients => {
            let catalog = dashboard.ingredients().await?;
            catalog.ingredients().iter().for_each(|i| println!("{}", ingredient_line(i)));
        }
        Command::Dishes => {
            let dishes = dashboard.dishes().await?;
            dishes.iter().for_each(|dish| println!("{}", dish_line(dish)));
        }
        Command::Bills => {
            let bills = dashboard.active_bills().await?;
            bills.iter().for_each(|bill| println!("{}", bill_line(bill)));
        }
        Command::Dish {
            name,
            price,
            ingredients,
        } => {
            let saved = dashboard.save_dish(&name, &price, &ingredients).await?;
            println!(
                "Saved {name}: {} kg CO2e, {} L, {} INR",
                saved.payload.carbon.unwrap_or_default(),
                saved.payload.water.unwrap_or_default(),
                saved.payload.price.unwrap_or_default()
            );

            println!("Carbon footprint by category:");
            for (category, carbon) in &saved.carbon_by_category {
                println!("{}", category_line(category, *carbon));
            }
        }
        Command::Bill { name, dishes } => {
            let bill = dashboard.save_bill(&name, &dishes).await?;
            println!(
                "Saved {name}: {} kg CO2e, {} L, {} INR",
                bill.carbon.unwrap_or_default(),
                bill.water.unwrap_or_default(),
                bill.price.unwrap_or_default()
            );
        }
        Command::Checkout { name } => {
            let bill = dashboard.checkout(&name).await?;
            println!("Checked out {}", bill_line(&bill));
        }
    }

    Ok(())
}
