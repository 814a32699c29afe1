use barbearia::{
    config::Config,
    seed::{self, SeedOutcome},
    storage,
};

#[actix_web::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run().await {
        Ok(()) => log::info!("Database initialized successfully"),
        Err(err) => {
            log::error!("Failed to initialize database: {err}");
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let storage = storage::open(&config).await?;

    if let SeedOutcome::Seeded { time_slots, .. } = seed::seed_sample_data(storage.as_ref()).await? {
        log::info!("Created {time_slots} time slots for today and tomorrow");
    }
    Ok(())
}
