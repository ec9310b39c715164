//! # Seed Data Generator
//!
//! Populates a Prism database for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./prism_dev.db (default)
//! cargo run -p prism-store --bin seed
//!
//! # Specify database path
//! cargo run -p prism-store --bin seed -- --db ./data/prism.db
//!
//! # Start with premium gating switched on
//! cargo run -p prism-store --bin seed -- --monetization
//! ```
//!
//! ## Seeded Data
//! - The five built-in themes (skipped if a catalog already exists)
//! - `default_theme = default`
//! - One demo user per role, `demo-<role>`, each with a non-premium and a
//!   premium variant (`demo-<role>-premium`)

use std::env;

use prism_core::{Role, User};
use prism_store::{Database, DbConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,prism_store=debug,sqlx=warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./prism_dev.db");
    let mut monetization = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--monetization" | "-m" => monetization = true,
            "--help" | "-h" => {
                println!("Prism Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>      Database file path (default: ./prism_dev.db)");
                println!("  -m, --monetization   Enable premium gating");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {other}"),
        }
        i += 1;
    }

    println!("Prism Seed Data Generator");
    println!("=========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    let inserted = db.seed_builtin_catalog().await?;
    if inserted == 0 {
        println!("Theme catalog already present, left untouched");
    } else {
        println!("Inserted {} built-in themes", inserted);
    }

    let settings = db.settings();
    settings.set_default_theme(prism_core::DEFAULT_THEME_ID).await?;
    settings.set_monetization_enabled(monetization).await?;
    println!("Monetization: {}", if monetization { "on" } else { "off" });

    let users = db.users();
    for role in Role::ALL {
        for premium in [false, true] {
            let id = if premium {
                format!("demo-{}-premium", role.as_str())
            } else {
                format!("demo-{}", role.as_str())
            };
            let mut user = User::new(id, role, premium);
            user.name = Some(format!("Demo {}", role));
            users.upsert(&user).await?;
            info!(user_id = %user.id, role = %role, premium, "Seeded demo user");
        }
    }
    println!("Seeded {} demo users", Role::ALL.len() * 2);

    println!();
    println!("Themes:");
    for theme in db.themes().list().await? {
        println!(
            "  {:<24} premium={:<5} roles={:?}",
            theme.id,
            theme.is_premium,
            theme.allowed_roles.iter().map(|r| r.as_str()).collect::<Vec<_>>()
        );
    }

    db.close().await;
    Ok(())
}
