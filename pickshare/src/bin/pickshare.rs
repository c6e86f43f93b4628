//! Pick the highest-priced share under a ceiling and time both execution modes.
//!
//! Environment:
//! - `PICKSHARE_API_KEY`: Alpha Vantage key (required unless using the mock).
//! - `PICKSHARE_USE_MOCK`: answer from fixture prices instead of the network.
//! - `PICKSHARE_SYMBOLS`: comma separated symbols (defaults to a tech watch list).
//! - `PICKSHARE_CEILING`: price ceiling (default `500`).
//! - `PICKSHARE_BASE_URL`: alternative quote endpoint.
//! - `PICKSHARE_BACKOFF_SECS`, `PICKSHARE_MAX_RETRIES`, `PICKSHARE_JITTER_PERCENT`:
//!   rate-limit retry budget.
//! - `PICKSHARE_MAX_IN_FLIGHT`: concurrent request cap.
//! - `PICKSHARE_TIE_BREAK`: `arbitrary` (default) or `lowest-symbol`.
//! - `RUST_LOG`: log filter, e.g. `pickshare=debug`.

use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use pickshare::{
    CancellationToken, ExecutionMode, PickError, PickShare, Price, QuoteProvider, Selection,
    Symbol, TieBreak,
};
use pickshare_alphavantage::AlphaVantageClient;
use pickshare_mock::MockQuoteProvider;

const DEFAULT_SYMBOLS: &[&str] = &[
    "AMD", "HPQ", "IBM", "TXN", "VMW", "XRX", "AAPL", "ADBE", "AMZN", "CRAY", "CSCO", "SNE",
    "GOOG", "INTC", "INTU", "MSFT", "ORCL", "TIBX", "VRSN", "YHOO",
];

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pickshare=info,pickshare_alphavantage=info".into()),
        )
        .with_target(false)
        .init();
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T>(name: &str) -> Result<Option<T>, PickError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_var(name)
        .map(|v| {
            v.trim()
                .parse::<T>()
                .map_err(|e| PickError::InvalidArg(format!("{name}={v}: {e}")))
        })
        .transpose()
}

fn use_mock() -> bool {
    env_var("PICKSHARE_USE_MOCK").is_some_and(|v| !matches!(v.as_str(), "0" | "false"))
}

fn provider() -> Result<Arc<dyn QuoteProvider>, PickError> {
    if use_mock() {
        println!("--- (Using mock quote provider) ---");
        return Ok(Arc::new(MockQuoteProvider::new()));
    }
    let key = env_var("PICKSHARE_API_KEY").ok_or_else(|| {
        PickError::InvalidArg(
            "PICKSHARE_API_KEY is not set; set it or PICKSHARE_USE_MOCK=1".to_string(),
        )
    })?;
    let mut builder = AlphaVantageClient::builder(key);
    if let Some(url) = env_parse::<url::Url>("PICKSHARE_BASE_URL")? {
        builder = builder.base_url(url);
    }
    if let Some(secs) = env_parse::<u64>("PICKSHARE_BACKOFF_SECS")? {
        builder = builder.backoff(Duration::from_secs(secs));
    }
    if let Some(n) = env_parse::<u32>("PICKSHARE_MAX_RETRIES")? {
        builder = builder.max_retries(n);
    }
    if let Some(pct) = env_parse::<u8>("PICKSHARE_JITTER_PERCENT")? {
        builder = builder.jitter_percent(pct);
    }
    Ok(Arc::new(builder.build()?))
}

fn symbols() -> Result<Vec<Symbol>, PickError> {
    match env_var("PICKSHARE_SYMBOLS") {
        Some(list) => list.split(',').map(Symbol::new).collect(),
        None => DEFAULT_SYMBOLS.iter().map(Symbol::new).collect(),
    }
}

fn tie_break() -> Result<TieBreak, PickError> {
    match env_var("PICKSHARE_TIE_BREAK").as_deref() {
        None | Some("arbitrary") => Ok(TieBreak::Arbitrary),
        Some("lowest-symbol") => Ok(TieBreak::LowestSymbol),
        Some(other) => Err(PickError::InvalidArg(format!(
            "PICKSHARE_TIE_BREAK={other}: expected 'arbitrary' or 'lowest-symbol'"
        ))),
    }
}

fn report(label: &str, elapsed: Duration, selection: &Selection) {
    println!("{label}: {:.3}s", elapsed.as_secs_f64());
    match selection {
        Selection::Winner(q) => println!("  winner: {} at {}", q.symbol, q.price),
        Selection::NoEligibleQuotes => println!("  no symbol qualified"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let mut builder = PickShare::builder()
        .with_provider(provider()?)
        .tie_break(tie_break()?);
    if let Some(ceiling) = env_parse::<Price>("PICKSHARE_CEILING")? {
        builder = builder.ceiling(ceiling);
    }
    if let Some(n) = env_parse::<usize>("PICKSHARE_MAX_IN_FLIGHT")? {
        builder = builder.max_in_flight(n);
    }
    let picker = builder.build()?;
    let symbols = symbols()?;
    let ceiling = picker.config().ceiling;

    // Ctrl-C cancels whichever run is in progress.
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    for (label, mode) in [
        ("Sequential", ExecutionMode::Sequential),
        ("Concurrent", ExecutionMode::Concurrent),
    ] {
        let start = Instant::now();
        let selection = picker
            .select_best_with(&symbols, mode, ceiling, &cancel)
            .await?;
        report(label, start.elapsed(), &selection);
    }

    Ok(())
}
