use figment::{Figment, providers::Env};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Builds an application context out of an extracted configuration.
pub trait ContextProvider<Config>: Sized {
    type Error: std::error::Error + Send + Sync + 'static;

    fn new(config: Config) -> impl Future<Output = Result<Self, Self::Error>>;
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] figment::Error),
    #[error("failed to create application context: {0}")]
    Context(Box<dyn std::error::Error + Send + Sync>),
}

/// Install the global tracing subscriber.
///
/// The log level can be overridden with the `RUST_LOG` env var and falls back
/// to `info`.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Extract a typed configuration from the process environment.
///
/// Variable names are matched case-insensitively against the config fields,
/// so `DATABASE_URL` fills `database_url`.
///
/// # Errors
/// If a variable is present but cannot be parsed into its field type.
pub fn load_config<Config: DeserializeOwned>() -> Result<Config, figment::Error> {
    Figment::new().merge(Env::raw()).extract()
}

/// Initialize the application context with configuration from environment
/// variables.
///
/// # Errors
/// If the configuration cannot be extracted from the environment variables
/// or if the context provider fails to build the context.
pub async fn create_app_context<A, Config>() -> Result<A, AppError>
where
    A: ContextProvider<Config>,
    Config: DeserializeOwned,
{
    init_tracing();

    let config: Config = load_config()?;

    let context = A::new(config)
        .await
        .map_err(|e| AppError::Context(Box::new(e)))?;

    tracing::debug!("application context created");

    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::providers::Serialized;

    #[derive(Debug, serde::Deserialize)]
    struct Settings {
        name: String,
    }

    #[derive(Debug, Error)]
    #[error("rejected {0}")]
    struct Rejected(String);

    struct Named(String);

    impl ContextProvider<Settings> for Named {
        type Error = Rejected;

        async fn new(config: Settings) -> Result<Self, Self::Error> {
            if config.name.is_empty() {
                return Err(Rejected(config.name));
            }
            Ok(Self(config.name))
        }
    }

    #[tokio::test]
    async fn test_context_provider_builds_from_config() {
        let settings: Settings = Figment::new()
            .merge(Serialized::default("name", "showroll"))
            .extract()
            .unwrap();

        let context = Named::new(settings).await.unwrap();
        assert_eq!(context.0, "showroll");
    }

    #[tokio::test]
    async fn test_context_provider_error_is_wrapped() {
        let err = Named::new(Settings {
            name: String::new(),
        })
        .await
        .map_err(|e| AppError::Context(Box::new(e)))
        .err()
        .unwrap();

        assert!(err.to_string().starts_with("failed to create application context"));
    }
}
