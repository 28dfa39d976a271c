use anyhow::{Context, Result};
use log::{error, info, warn};
use rusty_golf_audit::args;
use rusty_golf_audit::controller::golf_genius::Collector;
use rusty_golf_audit::view::report::{render_report, render_seasons};
use rusty_golf_audit::{AuditRequest, HttpFetcher, run_audit};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = args::args_checks();
    let config = args.audit_config().context("load audit config")?;
    let fetcher = HttpFetcher::new(&config).context("build golf genius client")?;
    let collector = Collector::new(&fetcher, &config);

    info!("Testing API connection...");
    let seasons = collector
        .fetch_seasons()
        .await
        .context("failed to connect to Golf Genius; check the api key")?;
    info!("Connected; {} seasons available", seasons.len());

    let season_id = match (&args.season, args.list_seasons) {
        (Some(season_id), false) => season_id.clone(),
        _ => {
            print!("{}", render_seasons(&seasons));
            return Ok(());
        }
    };
    match seasons.iter().find(|s| s.id == season_id) {
        Some(season) => info!("Selected season: {season}"),
        None => warn!("Season {season_id} is not in the seasons listing; trying it anyway"),
    }

    let (start, end) = args.date_range()?;
    let request = AuditRequest {
        season_id,
        start,
        end,
    };

    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Cancelling after the current round...");
            ctrl_c_token.cancel();
        }
    });

    let report = match run_audit(&fetcher, &config, &request, &cancel).await {
        Ok(report) => report,
        Err(err) => {
            error!("Audit failed: {err}");
            return Err(err.into());
        }
    };

    print!("{}", render_report(&report, args.include_ok));
    Ok(())
}
