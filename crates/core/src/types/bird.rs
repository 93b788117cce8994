//! Bird types and the production-period units that depend on them.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Days in a budgeting month. Calendar lengths are deliberately ignored.
pub const DAYS_PER_MONTH: u32 = 30;

/// The kind of flock being budgeted.
///
/// Only [`BirdType::Layer`] earns continuous egg revenue; every other type is
/// sold once at the end of the production period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BirdType {
    /// Egg-laying hens.
    #[default]
    #[serde(alias = "layers")]
    Layer,
    /// Fast-growing meat birds, budgeted against the Cobb500 intake curve.
    #[serde(alias = "broilers")]
    Broiler,
    /// Improved dual-purpose breeds such as Sasso or Kuroiler.
    #[serde(alias = "sasso/kroilers", alias = "sasso")]
    DualPurposeFast,
    /// Indigenous free-range birds.
    #[serde(alias = "local")]
    DualPurposeSlow,
}

impl BirdType {
    pub const ALL: [Self; 4] = [
        Self::Layer,
        Self::Broiler,
        Self::DualPurposeFast,
        Self::DualPurposeSlow,
    ];

    /// Unit the production period is entered in.
    #[must_use]
    pub const fn age_unit(self) -> AgeUnit {
        match self {
            Self::Broiler => AgeUnit::Days,
            _ => AgeUnit::Weeks,
        }
    }

    /// Whether revenue comes from eggs rather than a terminal sale.
    #[must_use]
    pub const fn is_egg_layer(self) -> bool {
        matches!(self, Self::Layer)
    }

    /// Label shown in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Layer => "Layers",
            Self::Broiler => "Broilers",
            Self::DualPurposeFast => "Sasso/Kroilers",
            Self::DualPurposeSlow => "Local",
        }
    }

    /// Stable wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Layer => "layer",
            Self::Broiler => "broiler",
            Self::DualPurposeFast => "dual-purpose-fast",
            Self::DualPurposeSlow => "dual-purpose-slow",
        }
    }

    /// Hint shown next to the production period field.
    #[must_use]
    pub const fn period_hint(self) -> &'static str {
        match self {
            Self::Broiler => "Typically 35-42 days for broilers",
            _ => "Typically 18-20 weeks for layers",
        }
    }
}

impl fmt::Display for BirdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a bird type name is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown bird type: {0} (expected layer, broiler, dual-purpose-fast or dual-purpose-slow)")]
pub struct UnknownBirdType(pub String);

impl FromStr for BirdType {
    type Err = UnknownBirdType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "layer" | "layers" => Ok(Self::Layer),
            "broiler" | "broilers" => Ok(Self::Broiler),
            "dual-purpose-fast" | "sasso" | "sasso/kroilers" | "kroilers" | "kuroilers" => {
                Ok(Self::DualPurposeFast)
            }
            "dual-purpose-slow" | "local" => Ok(Self::DualPurposeSlow),
            other => Err(UnknownBirdType(other.to_owned())),
        }
    }
}

/// Unit of the production period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeUnit {
    Days,
    Weeks,
}

impl AgeUnit {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Weeks => "weeks",
        }
    }

    /// Number of days in one unit.
    #[must_use]
    pub const fn days(self) -> u32 {
        match self {
            Self::Days => 1,
            Self::Weeks => 7,
        }
    }

    /// Convert a period expressed in this unit to days.
    #[must_use]
    pub fn to_days(self, period: Decimal) -> Decimal {
        period.saturating_mul(Decimal::from(self.days()))
    }
}

impl fmt::Display for AgeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of budgeting months covering `production_days`, rounded up.
///
/// Zero or negative periods give zero months; periods beyond `u32::MAX`
/// months are counted as `u32::MAX`.
#[must_use]
pub fn months_for_days(production_days: Decimal) -> u32 {
    if production_days <= Decimal::ZERO {
        return 0;
    }
    let months = (production_days / Decimal::from(DAYS_PER_MONTH)).ceil();
    months.to_u32().unwrap_or(u32::MAX)
}
