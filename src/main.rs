//! Moves every tenant's media out of the shared storage root and into
//! `<root>/company<id>/`, driven by the platform database.
//!
//! One-shot: configure through a TOML file and/or environment variables
//! (see [`rehome_config`]), run, read the summary in the logs.

mod error;
mod logging;
mod shutdown;

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use rehome_catalog::Database;
use rehome_config::Config;
use rehome_relocate::{Context, GlobalStats, relocate_all};
use rehome_storage::StorageRoot;
use std::time::Duration;
use tokio::time::timeout;

/// Storage root entries named individually at startup.
const SURVEY_PREVIEW: usize = 5;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;

#[tokio::main]
async fn main() {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            // No subscriber yet; the log format is part of the configuration.
            eprintln!("Failed to load configuration: {e:?}");
            std::process::exit(EXIT_FAILURE);
        },
    };
    logging::init(&config.log);

    // Exiting from inside the runtime skips waiting on anything still
    // pending once the grace period is over.
    tokio::select! {
        code = run(&config) => std::process::exit(code),
        signal = shutdown::signal() => {
            // Whatever rename was in flight has either happened or it hasn't.
            tracing::warn!(%signal, "Received signal; exiting immediately");
            std::process::exit(signal.exit_code());
        },
    }
}

async fn run(config: &Config) -> i32 {
    tracing::info!(root = %config.storage_root.display(), dry_run = config.dry_run, "Starting media relocation");
    let (db, ctx) = match setup(config).await {
        Ok(prepared) => prepared,
        Err(e) => {
            tracing::error!(error = ?e, "Fatal error before relocation started");
            return EXIT_FAILURE;
        },
    };

    let result = execute(&db, &ctx).await;
    match &result {
        Ok(stats) => {
            report(stats);
            tracing::info!("Relocation complete");
        },
        Err(e) => tracing::error!(error = ?e, "Fatal error during relocation"),
    }
    close(&db, config.shutdown_grace()).await;
    exit_code(&result)
}

fn exit_code<T>(result: &Result<T>) -> i32 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(_) => EXIT_FAILURE,
    }
}

async fn setup(config: &Config) -> Result<(Database, Context)> {
    let root = StorageRoot::new(&config.storage_root).or_raise(|| ErrorKind::StorageRoot)?;
    survey(&root).await;
    let db = Database::connect(&config.database.url, config.database.acquire_timeout())
        .await
        .or_raise(|| ErrorKind::Database)?;
    let ctx = Context::new(root).with_dry_run(config.dry_run).with_tenant_error_policy(config.on_tenant_error);
    Ok((db, ctx))
}

async fn execute(db: &Database, ctx: &Context) -> Result<GlobalStats> {
    // Dropped on return, success or not, handing the connection back.
    let mut session = db.session().await.or_raise(|| ErrorKind::Database)?;
    relocate_all(&mut session, ctx).await.or_raise(|| ErrorKind::Relocation)
}

async fn survey(root: &StorageRoot) {
    match root.survey(SURVEY_PREVIEW).await {
        Ok(survey) => {
            tracing::info!(path = %root.path().display(), entries = survey.entries, "Surveyed storage root");
            for name in &survey.preview {
                tracing::info!("  -> {}", name.to_string_lossy());
            }
            if survey.entries > survey.preview.len() {
                tracing::info!("  -> ... and {} more", survey.entries - survey.preview.len());
            }
        },
        Err(e) => tracing::warn!(error = ?e, "Could not list storage root"),
    }
}

fn report(stats: &GlobalStats) {
    tracing::info!(
        tenants = stats.tenants,
        tenants_failed = stats.tenants_failed,
        moved = stats.files.moved(),
        failed = stats.files.failed(),
        skipped = stats.files.skipped(),
        total = stats.files.total(),
        "Relocation summary"
    );
}

async fn close(db: &Database, grace: Duration) {
    tracing::info!("Closing database connections");
    match timeout(grace, db.close()).await {
        Ok(()) => tracing::info!("Database connections closed"),
        Err(_) => tracing::warn!(grace_ms = grace.as_millis(), "Database close exceeded grace period; exiting anyway"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code() {
        assert_eq!(exit_code(&Ok(GlobalStats::default())), 0);
        let failed: Result<GlobalStats> = Err(exn::Exn::from(ErrorKind::Relocation));
        assert_eq!(exit_code(&failed), 1);
    }
}
