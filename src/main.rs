use chrono::{Datelike, Local, NaiveDate};
use goldtrack::{
    archive::{ArchiveClient, ArchiveError},
    cli::{Cli, Commands},
    config::Config,
    dates, ingest, init_logging, series,
    series::SeriesStats,
    store::FileStore,
    upstream::GoldApiClient,
    view, AppResult,
};

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse_args();

    // Initialize logging
    init_logging(&cli.effective_log_level())?;

    tracing::info!("Goldtrack starting...");
    tracing::debug!("CLI arguments: {:?}", cli);

    // Load configuration
    let config = Config::load_or_default(&cli.config_file);

    match cli.command.clone() {
        Commands::Fetch { date } => run_fetch(&config, date).await,
        Commands::Day { date } => show_day(&config, &date).await,
        Commands::Year { year } => show_year(&config, year).await,
        Commands::Latest { date } => show_latest(&config, &date).await,
        Commands::Dates { around } => show_dates(&config, around).await,
        Commands::Config { action } => {
            Config::handle_command(&action, &cli.config_file)?;
            Ok(())
        }
    }
}

fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", raw, e).into())
}

fn archive_client(config: &Config) -> ArchiveClient {
    ArchiveClient::new(
        config.archive.base_url.clone(),
        config.archive.timeout_seconds,
    )
}

async fn run_fetch(config: &Config, date: Option<String>) -> AppResult<()> {
    let date = match date {
        Some(raw) => parse_date(&raw)?,
        None => Local::now().date_naive(),
    };

    let client = GoldApiClient::new(
        config.upstream.base_url.clone(),
        config.upstream.timeout_seconds,
    );
    let store = FileStore::new(config.data_dir.clone());

    ingest::run(&client, &store, date).await?;
    Ok(())
}

async fn show_day(config: &Config, raw_date: &str) -> AppResult<()> {
    let date = parse_date(raw_date)?;
    let archive = archive_client(config);

    let (daily, latest) = match archive.fetch_day(date).await {
        Ok(pair) => pair,
        Err(ArchiveError::NotFound(what)) => return view::display_no_data(&what),
        Err(e) => return Err(e.into()),
    };

    let series = series::normalize(&series::decode_intraday(&daily));
    let reference = series::decode_latest(&latest)
        .map(|quote| quote.reference())
        .unwrap_or_default();
    let stats = SeriesStats::compute(&series, &reference);

    // Navigation hints are best-effort; a missing index only hides them
    let nav = match archive.fetch_dates().await {
        Ok(dates) => dates::find_adjacent(&dates, raw_date),
        Err(e) => {
            tracing::warn!("Failed to fetch date index: {}", e);
            dates::Adjacent::default()
        }
    };

    view::display_day(raw_date, &stats, series.len(), &nav)
}

async fn show_year(config: &Config, year: Option<i32>) -> AppResult<()> {
    let year = year.unwrap_or_else(|| Local::now().year());
    let archive = archive_client(config);

    let payload = match archive.fetch_yearly(year).await {
        Ok(payload) => payload,
        Err(ArchiveError::NotFound(what)) => return view::display_no_data(&what),
        Err(e) => return Err(e.into()),
    };

    let series = series::normalize(&series::decode_yearly(&payload));
    let stats = SeriesStats::for_period(&series);

    view::display_year(year, &stats, &series)
}

async fn show_latest(config: &Config, raw_date: &str) -> AppResult<()> {
    let date = parse_date(raw_date)?;
    let archive = archive_client(config);

    let payload = match archive.fetch_latest(date).await {
        Ok(payload) => payload,
        Err(ArchiveError::NotFound(what)) => return view::display_no_data(&what),
        Err(e) => return Err(e.into()),
    };

    match series::decode_latest(&payload) {
        Some(quote) => view::display_latest(raw_date, &quote),
        None => view::display_no_data(raw_date),
    }
}

async fn show_dates(config: &Config, around: Option<String>) -> AppResult<()> {
    let archive = archive_client(config);

    let dates_available = match archive.fetch_dates().await {
        Ok(dates) => dates,
        Err(ArchiveError::NotFound(what)) => return view::display_no_data(&what),
        Err(e) => return Err(e.into()),
    };

    match around {
        Some(raw_date) => {
            parse_date(&raw_date)?;
            let nav = dates::find_adjacent(&dates_available, &raw_date);
            println!("Around {}:", raw_date);
            view::display_adjacent(&nav)
        }
        None => view::display_dates(&dates_available),
    }
}
