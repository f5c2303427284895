use sample_service::{router, server::Server, AppState};
use standard_response::prelude::{init_tracing, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_for_service("sample-service")?;

    init_tracing(&config)?;

    let app = router(AppState::new(config.clone()));

    Server::new(config).serve(app).await?;

    Ok(())
}
