use exifstrip_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // A missing DEST_BUCKET fails here, before anything is served.
    let config = Config::from_env()?;

    let (_state, router) = exifstrip_api::setup::initialize_app(config.clone()).await?;

    exifstrip_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
