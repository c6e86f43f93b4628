/// Fixture prices for the default technology watch list plus a few extras.
pub fn by_symbol(s: &str) -> Option<&'static str> {
    match s {
        "AMD" => Some("162.8900"),
        "HPQ" => Some("29.3100"),
        "IBM" => Some("140.1200"),
        "TXN" => Some("172.4500"),
        "VMW" => Some("142.4800"),
        "XRX" => Some("13.2700"),
        "AAPL" => Some("189.9800"),
        "ADBE" => Some("478.3400"),
        "AMZN" => Some("184.7000"),
        "CRAY" => Some("34.9900"),
        "CSCO" => Some("47.1800"),
        "SNE" => Some("84.6000"),
        "GOOG" => Some("167.2400"),
        "INTC" => Some("30.6600"),
        "INTU" => Some("623.1500"),
        "MSFT" => Some("406.6600"),
        "ORCL" => Some("117.1500"),
        "TIBX" => Some("24.0000"),
        "VRSN" => Some("171.6700"),
        "YHOO" => Some("52.5800"),
        "NVDA" => Some("887.8900"),
        "KO" => Some("60.0000"),
        "PEP" => Some("170.0000"),
        "BRK.A" => Some("612241.0000"),
        // Provider-reported zero: treated as "unknown" by the selector.
        "ZERO" => Some("0.0000"),
        _ => None,
    }
}
