use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use little_lemon::config::{load_config, DatabaseConfig};
use little_lemon::restaurant::{Catalog, MenuItemUpdate, NewMenuItem};
use little_lemon::SqliteStore;

#[derive(Parser)]
#[command(name = "lemon-admin")]
#[command(about = "Management CLI for the Little Lemon menu and bookings", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `database.url`.
    #[arg(short, long)]
    database: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage menu items
    #[command(subcommand)]
    Menu(MenuCommand),
    /// Manage reservations
    #[command(subcommand)]
    Booking(BookingCommand),
}

#[derive(Subcommand)]
enum MenuCommand {
    /// List every menu item
    List,
    /// Show one menu item
    Show { id: i64 },
    /// Add a menu item
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: i64,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Change fields of a menu item
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<i64>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Remove a menu item
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum BookingCommand {
    /// List every reservation
    List,
    /// Remove a reservation
    Delete { id: i64 },
}

#[derive(Serialize)]
struct Deleted {
    deleted: i64,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Only the database section matters here; without a file the defaults apply.
    let mut database = match cli.config {
        Some(path) => load_config(&path)?.database,
        None => DatabaseConfig::default(),
    };
    if let Some(url) = cli.database {
        database.url = url;
    }

    let store = SqliteStore::connect(&database).await?;
    let result = execute(&store, cli.command).await;
    store.close().await;
    result
}

async fn execute(store: &SqliteStore, command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Menu(MenuCommand::List) => print_json(&store.list_all().await?),
        Commands::Menu(MenuCommand::Show { id }) => print_json(&store.get_by_id(id).await?),
        Commands::Menu(MenuCommand::Add {
            name,
            price,
            description,
        }) => {
            let item = NewMenuItem {
                name,
                price,
                description,
            };
            print_json(&store.create_menu_item(item).await?)
        }
        Commands::Menu(MenuCommand::Update {
            id,
            name,
            price,
            description,
        }) => {
            let update = MenuItemUpdate {
                name,
                price,
                description,
            };
            if update.is_empty() {
                return Err("nothing to update; pass --name, --price or --description".into());
            }
            print_json(&store.update_menu_item(id, update).await?)
        }
        Commands::Menu(MenuCommand::Delete { id }) => {
            store.delete_menu_item(id).await?;
            print_json(&Deleted { deleted: id })
        }
        Commands::Booking(BookingCommand::List) => print_json(&store.list_bookings().await?),
        Commands::Booking(BookingCommand::Delete { id }) => {
            store.delete_booking(id).await?;
            print_json(&Deleted { deleted: id })
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
