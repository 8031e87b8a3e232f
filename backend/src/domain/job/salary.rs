//! Structured salary ranges and free-text normalisation.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::JobValidationError;

/// Largest accepted salary amount.
pub const SALARY_AMOUNT_MAX: u32 = 100_000_000;

const DEFAULT_CURRENCY: &str = "USD";

static AMOUNT_RE: OnceLock<Regex> = OnceLock::new();
static CURRENCY_RE: OnceLock<Regex> = OnceLock::new();

fn amount_regex() -> &'static Regex {
    AMOUNT_RE.get_or_init(|| {
        Regex::new(r"(?i)(\d[\d,]*)(?:\.(\d+))?\s*(k)?\b")
            .unwrap_or_else(|error| panic!("salary amount regex failed to compile: {error}"))
    })
}

fn currency_regex() -> &'static Regex {
    CURRENCY_RE.get_or_init(|| {
        Regex::new(r"\b([A-Za-z]{3})\b")
            .unwrap_or_else(|error| panic!("currency regex failed to compile: {error}"))
    })
}

fn invalid(reason: impl Into<String>) -> JobValidationError {
    JobValidationError::InvalidSalary {
        reason: reason.into(),
    }
}

/// Salary range attached to a job.
///
/// ## Invariants
/// - `min <= max` when both are present.
/// - `currency` is a three-letter upper-case code.
/// - A salary with no amounts is negotiable.
///
/// # Examples
/// ```
/// use trustyhire::domain::Salary;
///
/// let salary = Salary::parse("50,000-70,000 usd").expect("valid salary");
/// assert_eq!((salary.min, salary.max), (Some(50_000), Some(70_000)));
/// assert_eq!(salary.currency, "USD");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Salary {
    pub min: Option<u32>,
    pub max: Option<u32>,
    pub currency: String,
    pub negotiable: bool,
}

impl Salary {
    /// Validate a structured salary.
    pub fn new(
        min: Option<u32>,
        max: Option<u32>,
        currency: Option<&str>,
        negotiable: bool,
    ) -> Result<Self, JobValidationError> {
        for amount in [min, max].into_iter().flatten() {
            if amount > SALARY_AMOUNT_MAX {
                return Err(invalid(format!("amounts must not exceed {SALARY_AMOUNT_MAX}")));
            }
        }
        if let (Some(low), Some(high)) = (min, max) {
            if low > high {
                return Err(invalid("min must not exceed max"));
            }
        }
        if min.is_none() && max.is_none() && !negotiable {
            return Err(invalid("provide an amount or mark the salary negotiable"));
        }
        let currency = match currency.map(str::trim).filter(|code| !code.is_empty()) {
            Some(code) => normalise_currency(code)?,
            None => DEFAULT_CURRENCY.to_owned(),
        };
        Ok(Self {
            min,
            max,
            currency,
            negotiable,
        })
    }

    /// Normalise free text such as `"50000-70000 USD"`, `"$60k"` or
    /// `"Negotiable"`.
    ///
    /// A single amount becomes both bounds.
    pub fn parse(text: &str) -> Result<Self, JobValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(invalid("salary text is empty"));
        }
        let negotiable = text.to_lowercase().contains("negotiable");

        let amounts = amount_regex()
            .captures_iter(text)
            .map(|caps| {
                let whole = caps.get(1).map_or("", |m| m.as_str());
                let fraction = caps.get(2).map(|m| m.as_str());
                let thousands = caps.get(3).is_some();
                parse_amount(whole, fraction, thousands)
            })
            .collect::<Result<Vec<_>, _>>()?;
        if amounts.len() > 2 {
            return Err(invalid("expected at most two amounts"));
        }
        let (min, max) = match amounts.as_slice() {
            [] => (None, None),
            [single] => (Some(*single), Some(*single)),
            [low, high] => (Some(*low), Some(*high)),
            _ => return Err(invalid("expected at most two amounts")),
        };
        if min.is_none() && !negotiable {
            return Err(invalid("no amount found"));
        }

        let currency = detect_currency(text);
        Self::new(min, max, currency.as_deref(), negotiable)
    }
}

fn parse_amount(
    whole: &str,
    fraction: Option<&str>,
    thousands: bool,
) -> Result<u32, JobValidationError> {
    let digits: String = whole.chars().filter(char::is_ascii_digit).collect();
    let base: u64 = digits
        .parse()
        .map_err(|_| invalid(format!("`{whole}` is not a number")))?;
    let value = if thousands {
        // Keep up to three fractional digits: "1.5k" is 1500.
        let fraction_value = fraction.map_or(Ok(0), |frac| {
            let padded: String = frac.chars().chain("000".chars()).take(3).collect();
            padded
                .parse::<u64>()
                .map_err(|_| invalid(format!("`{frac}` is not a number")))
        })?;
        base.saturating_mul(1_000).saturating_add(fraction_value)
    } else {
        base
    };
    u32::try_from(value)
        .ok()
        .filter(|amount| *amount <= SALARY_AMOUNT_MAX)
        .ok_or_else(|| invalid(format!("amounts must not exceed {SALARY_AMOUNT_MAX}")))
}

fn detect_currency(text: &str) -> Option<String> {
    let from_symbol = text.chars().find_map(|ch| match ch {
        '$' => Some("USD"),
        '€' => Some("EUR"),
        '£' => Some("GBP"),
        '৳' => Some("BDT"),
        _ => None,
    });
    if let Some(code) = from_symbol {
        return Some(code.to_owned());
    }
    currency_regex()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_uppercase())
        .find(|code| code != "PER")
}

fn normalise_currency(code: &str) -> Result<String, JobValidationError> {
    let upper = code.to_uppercase();
    if upper.len() == 3 && upper.chars().all(|ch| ch.is_ascii_uppercase()) {
        Ok(upper)
    } else {
        Err(invalid("currency must be a three-letter code"))
    }
}
