use actix_web::{middleware as actix_middleware, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use msgboard::api::middleware::{Cors, IpRateLimiter, RateLimit};
use msgboard::api::routes;
use msgboard::cli::{
    commands::{Cli, Commands},
    run_cli,
};
use msgboard::config::AppConfig;
use msgboard::db;
use std::sync::Arc;
use tracing::{error, info};

async fn index() -> impl Responder {
    let html = include_str!("../static/index.html");
    HttpResponse::Ok().content_type("text/html").body(html)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if !matches!(cli.command, Commands::Serve) {
        run_cli(cli.command, cli.config).await;
        return Ok(());
    }

    info!("Starting message board server...");

    let config = match AppConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let db_pool = match db::get_pool(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    // One limiter for the whole process; workers share it through the Arc
    let rate_limiter = Arc::new(IpRateLimiter::new(&config.rate_limit));

    let host = config.server.host.clone();
    let port = config.server.port;

    info!("Server listening on {}:{}", host, port);

    HttpServer::new(move || {
        let api = config.api.clone();

        App::new()
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(db_pool.clone()))
            .route("/", web::get().to(index))
            .configure(|cfg| routes::configure(cfg, &api))
            .wrap(actix_middleware::Condition::new(
                api.compression,
                actix_middleware::Compress::default(),
            ))
            .wrap(actix_middleware::Condition::new(
                api.security_headers,
                actix_middleware::DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("X-Frame-Options", "DENY")),
            ))
            .wrap(actix_middleware::Condition::new(
                config.rate_limit.enabled,
                RateLimit::new(rate_limiter.clone()),
            ))
            .wrap(Cors::new(&config.cors.allowed_origins))
    })
    .bind((host, port))?
    .run()
    .await
}
