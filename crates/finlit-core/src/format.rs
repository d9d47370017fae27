use chrono::NaiveDate;

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: f64, currency: &str) -> String;
}

/// Formats dates for presentation.
pub trait DateFormatter: Send + Sync {
    fn format_date(&self, date: NaiveDate) -> String;
}

/// Locale-driven formatter used by the CLI and the FFI string exports.
#[derive(Debug, Clone)]
pub struct LocaleFormatter {
    date_pattern: &'static str,
    decimals: usize,
}

impl LocaleFormatter {
    pub fn new(locale: &str) -> Self {
        Self {
            date_pattern: date_pattern_for(locale),
            decimals: 2,
        }
    }

    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn date_pattern(&self) -> &'static str {
        self.date_pattern
    }
}

impl Default for LocaleFormatter {
    fn default() -> Self {
        Self::new("en-GB")
    }
}

impl CurrencyFormatter for LocaleFormatter {
    fn format_amount(&self, amount: f64, currency: &str) -> String {
        let sign = if amount < 0.0 { "-" } else { "" };
        let digits = group_thousands(&format!("{:.*}", self.decimals, amount.abs()));
        match currency_symbol(currency) {
            Some(symbol) => format!("{sign}{symbol}{digits}"),
            None => format!("{sign}{digits} {}", currency.trim().to_ascii_uppercase()),
        }
    }
}

impl DateFormatter for LocaleFormatter {
    fn format_date(&self, date: NaiveDate) -> String {
        date.format(self.date_pattern).to_string()
    }
}

fn date_pattern_for(locale: &str) -> &'static str {
    let normalized = locale.trim().replace('_', "-").to_ascii_lowercase();
    let language = normalized.split('-').next().unwrap_or_default();
    match (language, normalized.as_str()) {
        (_, "en-us") => "%m/%d/%Y",
        ("en", _) | ("fr", _) | ("de", _) | ("es", _) | ("it", _) => "%d/%m/%Y",
        _ => "%Y-%m-%d",
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code.trim().to_ascii_uppercase().as_str() {
        "GBP" => Some("£"),
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "INR" => Some("₹"),
        _ => None,
    }
}

fn group_thousands(raw: &str) -> String {
    let (whole, fraction) = match raw.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (raw, None),
    };
    let mut grouped = String::with_capacity(raw.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
