use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Result};
use catalog_client::{DashboardController, DashboardState, HttpCatalogApi};
use clap::{Parser, Subcommand};
use shared::domain::{CreateFoodInput, FoodId};
use tracing::info;

mod config;

#[derive(Parser, Debug)]
#[command(about = "Terminal front end for the food-catalog dashboard")]
struct Args {
    /// Overrides the configured catalog service URL.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the full collection.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Create a food; new foods start out available.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        image: String,
    },
    /// Edit an existing food; omitted fields keep their current value.
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a food.
    Remove { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let settings = config::load_settings();
    let base_url = args.server_url.unwrap_or(settings.api_base_url);
    info!(%base_url, "connecting to catalog service");

    let api = HttpCatalogApi::with_timeout(
        &base_url,
        Duration::from_secs(settings.request_timeout_secs),
    )?;
    let mut controller = DashboardController::new(Arc::new(api));
    controller.load().await?;

    match args.command {
        Command::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&controller.state.foods)?);
            } else {
                print_collection(&controller.state);
            }
        }
        Command::Add {
            name,
            description,
            price,
            image,
        } => {
            let created = controller
                .create(CreateFoodInput {
                    name,
                    description,
                    price,
                    image,
                })
                .await?;
            println!("created food #{}", created.id.0);
            print_collection(&controller.state);
        }
        Command::Edit {
            id,
            name,
            description,
            price,
            image,
        } => {
            let id = FoodId(id);
            let current = controller
                .state
                .food(id)
                .cloned()
                .ok_or_else(|| anyhow!("no food with id {} on the server", id.0))?;
            // The capture surface starts prefilled with the current record;
            // each flag overrides one field.
            controller.select_for_edit(current.clone());
            let input = CreateFoodInput {
                name: name.unwrap_or(current.name),
                description: description.unwrap_or(current.description),
                price: price.unwrap_or(current.price),
                image: image.unwrap_or(current.image),
            };
            let updated = controller.update(id, input).await?;
            println!("updated food #{}", updated.id.0);
            print_collection(&controller.state);
        }
        Command::Remove { id } => {
            controller.delete(FoodId(id)).await?;
            println!("deleted food #{id}");
            print_collection(&controller.state);
        }
    }

    Ok(())
}

fn print_collection(state: &DashboardState) {
    if state.foods.is_empty() {
        println!("(the catalog is empty)");
        return;
    }
    for food in &state.foods {
        let availability = if food.available {
            "available"
        } else {
            "unavailable"
        };
        println!(
            "#{} {} ({}, {}): {}",
            food.id.0, food.name, food.price, availability, food.description
        );
    }
}
