use actix_web::{middleware, web, App, HttpServer};

use barbearia::{config::Config, routes, seed, state::AppState, storage};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(err) = run().await {
        eprintln!("Startup error: {err}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    let storage = storage::open(&config).await?;

    if config.seed_sample_data {
        seed::seed_sample_data(storage.as_ref()).await?;
    }

    let state = AppState::new(storage);
    let address = config.bind_address();
    log::info!("Starting barbershop API on http://{address} ({} storage)", config.storage);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(routes::json_config())
            .wrap(middleware::Logger::default())
            .configure(routes::api::configure)
    })
    .bind(address)?
    .run()
    .await?;

    Ok(())
}
