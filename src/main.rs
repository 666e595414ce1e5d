use cronograma::{client, ensure_tables, middleware, AppState, FaultSignal, PgRepository, Settings};
use tokio::net::TcpListener;

async fn shutdown_signal(fault: FaultSignal) {
    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            if let Err(err) = res {
                tracing::error!(error = %err, "could not listen for ctrl-c");
            }
            tracing::info!("shutdown requested");
        }
        _ = fault.tripped() => {
            tracing::warn!("stopping after a faulted request");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cronograma=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.db_max_connections)
        .connect(&settings.database_url)
        .await?;
    ensure_tables(&pool).await?;

    let state = AppState::new(PgRepository::new(pool));
    let fault = FaultSignal::new();
    let app = cronograma::router(state);
    let app = client::mount(app, &settings)?;
    let app = middleware::apply(app, settings.fail_fast.then(|| fault.clone()));

    let listener = TcpListener::bind(settings.bind_addr()).await?;
    tracing::info!("serving on port {}", listener.local_addr()?.port());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(fault.clone()))
        .await?;

    if fault.is_tripped() {
        return Err("server stopped after an unhandled request fault".into());
    }
    Ok(())
}
