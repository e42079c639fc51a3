use actix_web::{App, HttpServer};
use color_eyre::eyre::Report;
use dotenv::dotenv;
use hahornah_server::{db, server};
use std::env;
use tracing::info;

fn install_tracing() -> Result<(), Report> {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};

    let fmt_layer = fmt::layer().with_target(false);
    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();
    Ok(())
}

#[actix_rt::main]
async fn main() -> Result<(), Report> {
    dotenv().ok();
    install_tracing()?;
    color_eyre::install()?;

    let database_url = env::var("DATABASE_URL")?;
    let pool = db::new_pool(&database_url).await?;

    server::register_db_actor(pool);
    server::register_system_actors();

    // Heroku-style port binding; only the liveness probe lives here.
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    info!(%port, "Starting hah-or-nah core service");

    HttpServer::new(|| App::new().configure(server::configure))
        .bind(format!("0.0.0.0:{}", port))?
        .run()
        .await?;

    Ok(())
}
