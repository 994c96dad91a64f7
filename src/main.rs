use color_eyre::eyre::Result;
use postline::{
    ExposeSecret, HashMapCommentStore, HashMapLikeStore, HashMapPostStore, HashMapUserStore,
    JwtAuthConfig, PostgresCommentStore, PostgresLikeStore, PostgresPostStore, PostgresUserStore,
    PostlineService, PostlineSetting, SmtpEmailClient, configure_postgresql, shutdown_signal,
};
use tokio::net::TcpListener;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = PostlineSetting::load()?;

    let jwt = JwtAuthConfig::new(
        settings.auth.jwt_secret.clone(),
        settings.auth.token_ttl_in_seconds,
    );
    let email_client = SmtpEmailClient::new(&settings.email_client)?;
    if !email_client.is_enabled() {
        tracing::warn!("SMTP host is not configured, reset code emails will only be logged");
    }

    let listener = TcpListener::bind(settings.application.address()).await?;

    if settings.database.is_in_memory() {
        tracing::warn!("No database configured, using in-memory stores");

        let service = PostlineService::new(
            HashMapUserStore::new(),
            HashMapPostStore::new(),
            HashMapLikeStore::new(),
            HashMapCommentStore::new(),
            email_client,
            jwt,
        );
        serve(service, listener, &settings).await?;
    } else {
        let pg_pool = configure_postgresql(
            settings.database.url.expose_secret(),
            settings.database.max_connections,
        )
        .await?;

        let service = PostlineService::new(
            PostgresUserStore::new(pg_pool.clone()),
            PostgresPostStore::new(pg_pool.clone()),
            PostgresLikeStore::new(pg_pool.clone()),
            PostgresCommentStore::new(pg_pool.clone()),
            email_client,
            jwt,
        );
        serve(service, listener, &settings).await?;

        pg_pool.close().await;
        tracing::info!("Database connections closed");
    }

    Ok(())
}

async fn serve(
    service: PostlineService,
    listener: TcpListener,
    settings: &PostlineSetting,
) -> Result<()> {
    let service = if settings.environment.is_production() {
        service
    } else {
        service.with_error_stack()
    };

    service
        .run_standalone(
            listener,
            &settings.application.allowed_origins,
            shutdown_signal(),
        )
        .await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
