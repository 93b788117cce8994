//! Currency-aware money amounts using decimal arithmetic.
//!
//! Every figure the calculator shows is a [`Money`], so the on-screen summary,
//! the printable document and the email body all format amounts the same way.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// An amount in a specific currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (shillings, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: CurrencyCode,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// Format for display, e.g. `USh 1,234.50` or `-$ 20.00`.
    #[must_use]
    pub fn display(&self) -> String {
        let sign = if self.amount.is_sign_negative() && !self.amount.is_zero() {
            "-"
        } else {
            ""
        };
        format!(
            "{sign}{} {}",
            self.currency.symbol(),
            group_thousands(self.amount.abs(), 2)
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Format a non-negative decimal with `,` thousand separators and a fixed
/// number of fraction digits.
#[must_use]
pub fn group_thousands(value: Decimal, fraction_digits: u32) -> String {
    let rounded = value
        .abs()
        .round_dp_with_strategy(fraction_digits, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{rounded:.prec$}", prec = fraction_digits as usize);
    let (whole, fraction) = plain
        .split_once('.')
        .map_or((plain.as_str(), None), |(w, f)| (w, Some(f)));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match fraction {
        Some(fraction) => format!("{grouped}.{fraction}"),
        None => grouped,
    }
}

/// Currencies offered by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    USD,
    EUR,
    KES,
    #[default]
    UGX,
    TZS,
    RWF,
    ETB,
    GHS,
    NGN,
    ZAR,
}

impl CurrencyCode {
    /// All supported currencies, in the order they are offered.
    pub const ALL: [Self; 10] = [
        Self::USD,
        Self::EUR,
        Self::KES,
        Self::UGX,
        Self::TZS,
        Self::RWF,
        Self::ETB,
        Self::GHS,
        Self::NGN,
        Self::ZAR,
    ];

    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::EUR => "€",
            Self::KES => "KSh",
            Self::UGX => "USh",
            Self::TZS => "TSh",
            Self::RWF => "RF",
            Self::ETB => "Br",
            Self::GHS => "₵",
            Self::NGN => "₦",
            Self::ZAR => "R",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::KES => "KES",
            Self::UGX => "UGX",
            Self::TZS => "TZS",
            Self::RWF => "RWF",
            Self::ETB => "ETB",
            Self::GHS => "GHS",
            Self::NGN => "NGN",
            Self::ZAR => "ZAR",
        }
    }

    /// Human-readable currency name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::USD => "US Dollar",
            Self::EUR => "Euro",
            Self::KES => "Kenyan Shilling",
            Self::UGX => "Ugandan Shilling",
            Self::TZS => "Tanzanian Shilling",
            Self::RWF => "Rwandan Franc",
            Self::ETB => "Ethiopian Birr",
            Self::GHS => "Ghanaian Cedi",
            Self::NGN => "Nigerian Naira",
            Self::ZAR => "South African Rand",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a currency code is not one of [`CurrencyCode::ALL`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported currency code: {0}")]
pub struct UnknownCurrency(pub String);

impl FromStr for CurrencyCode {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCurrency(wanted.to_owned()))
    }
}
