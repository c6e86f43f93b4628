//! Classification of `GLOBAL_QUOTE` response bodies.

use pickshare_core::{PickError, Price, Symbol};
use serde_json::Value;

/// What a single response body told us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// A price field was found and parsed.
    Price(Price),
    /// The provider asked us to slow down; carries the notice text.
    RateLimited(String),
    /// The provider answered with an empty quote object.
    NotFound,
    /// The provider answered with an explicit error message.
    ProviderError(String),
}

const QUOTE_KEY: &str = "Global Quote";
const NOTICE_KEYS: [&str; 2] = ["Note", "Information"];
const ERROR_KEY: &str = "Error Message";

/// True if `text` is the provider's call-frequency notice.
#[must_use]
pub fn looks_like_rate_limit(text: &str) -> bool {
    let t = text.to_ascii_lowercase();
    t.contains("call frequency") || t.contains("rate limit")
}

/// Classify a response body for `symbol`.
///
/// JSON bodies are inspected structurally; anything else falls back to a
/// line scan for a `price` field.
///
/// # Errors
/// Returns `PickError::UnparseablePrice` when the body carries neither a
/// price nor a recognizable provider notice.
pub fn classify(symbol: &Symbol, body: &str) -> Result<Payload, PickError> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => {
            if let Some(quote) = map.get(QUOTE_KEY) {
                return classify_quote(symbol, quote);
            }
            for key in NOTICE_KEYS {
                if let Some(Value::String(notice)) = map.get(key)
                    && looks_like_rate_limit(notice)
                {
                    return Ok(Payload::RateLimited(notice.clone()));
                }
            }
            if let Some(Value::String(msg)) = map.get(ERROR_KEY) {
                return Ok(Payload::ProviderError(msg.clone()));
            }
            for key in NOTICE_KEYS {
                if let Some(Value::String(msg)) = map.get(key) {
                    return Ok(Payload::ProviderError(msg.clone()));
                }
            }
            Err(PickError::unparseable(symbol.as_str(), "no price field"))
        }
        _ => classify_lines(symbol, body),
    }
}

fn classify_quote(symbol: &Symbol, quote: &Value) -> Result<Payload, PickError> {
    let Value::Object(fields) = quote else {
        return Err(PickError::unparseable(
            symbol.as_str(),
            "quote payload is not an object",
        ));
    };
    if fields.is_empty() {
        return Ok(Payload::NotFound);
    }
    let raw = fields
        .iter()
        .find(|(k, _)| k.to_ascii_lowercase().contains("price"))
        .map(|(_, v)| v)
        .ok_or_else(|| PickError::unparseable(symbol.as_str(), "no price field"))?;
    match raw {
        Value::String(s) => parse_price(symbol, s),
        other => Err(PickError::unparseable(
            symbol.as_str(),
            format!("price field is not a string: {other}"),
        )),
    }
}

// `    "05. price": "140.1200",` -> fourth quote-delimited token.
fn classify_lines(symbol: &Symbol, body: &str) -> Result<Payload, PickError> {
    for line in body.lines() {
        if line.contains("price") {
            let token = line
                .split('"')
                .nth(3)
                .ok_or_else(|| PickError::unparseable(symbol.as_str(), "malformed price line"))?;
            return parse_price(symbol, token);
        }
        if looks_like_rate_limit(line) {
            return Ok(Payload::RateLimited(line.trim().to_string()));
        }
    }
    Err(PickError::unparseable(symbol.as_str(), "no price field"))
}

fn parse_price(symbol: &Symbol, raw: &str) -> Result<Payload, PickError> {
    raw.trim()
        .parse::<Price>()
        .map(Payload::Price)
        .map_err(|e| PickError::unparseable(symbol.as_str(), e.to_string()))
}
