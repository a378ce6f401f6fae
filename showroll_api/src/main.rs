/**
 * This is the main entrypoint for the `showroll_api` service.
 *
 * Configuration is read from the environment, the database schema is
 * migrated, and the router is served until a shutdown signal arrives.
 */
use showroll_api::{AppContext, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize the application context
    let app_context =
        sr_app::create_app_context::<AppContext, Config>().await?;

    let addr = app_context.config().addr()?;

    sr_axum::run_app(showroll_api::app(app_context), addr).await
}
