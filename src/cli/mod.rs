pub mod commands;

use crate::cli::commands::Commands;
use crate::config::AppConfig;
use crate::db::{self, service::DbService};

pub async fn run_cli(command: Commands, config_path: String) {
    let config = AppConfig::load(&config_path).expect("Failed to load config");

    match command {
        Commands::Serve => {
            panic!("Serve command should be intercepted by main.rs to boot actix-web");
        }
        Commands::InitDb => {
            let pool = db::get_pool(&config.database).await.expect("DB error");

            match db::init_schema(&pool).await {
                Ok(()) => println!("Messages table is ready."),
                Err(e) => eprintln!("Error: {}", e),
            }
        }
        Commands::Post { username, message } => {
            let pool = db::get_pool(&config.database).await.expect("DB error");

            match DbService::insert_message(&pool, Some(&username), Some(&message)).await {
                Ok(()) => println!("Posted as {}", username),
                Err(e) => eprintln!("Error: {}", e),
            }
        }
        Commands::List { limit } => {
            let pool = db::get_pool(&config.database).await.expect("DB error");

            match DbService::recent_messages(&pool, limit).await {
                Ok(messages) => {
                    if messages.is_empty() {
                        println!("No messages yet.");
                    } else {
                        println!("{:<6} | {:<19} | {:<20} | {}", "ID", "Posted At", "Username", "Message");
                        println!("{:-<6}-+-{:-<19}-+-{:-<20}-+-{:-<20}", "", "", "", "");
                        for m in messages {
                            println!(
                                "{:<6} | {:<19} | {:<20} | {}",
                                m.id,
                                m.created_at.format("%Y-%m-%d %H:%M:%S"),
                                m.username,
                                m.message
                            );
                        }
                    }
                }
                Err(e) => eprintln!("Error: {}", e),
            }
        }
    }
}
