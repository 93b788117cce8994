//! Revenue projection.
//!
//! Layers earn from eggs every month. Every other bird type earns once, at
//! the terminal sale, and reports zero monthly revenue.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::BirdType;

/// Share of layers that survive to lay.
pub const LAYER_SURVIVAL_RATE: Decimal = Decimal::from_parts(96, 0, 0, false, 2);
/// Eggs per bird per day.
pub const LAY_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 1);
/// Eggs per tray, also the days in a budgeting month.
pub const EGGS_PER_TRAY: u32 = 30;

/// Share of a meat flock sold at full price.
pub const FULL_PRICE_SHARE: Decimal = Decimal::from_parts(80, 0, 0, false, 2);
/// Share of a meat flock sold at a discount. The remaining 4% die unsold.
pub const DISCOUNTED_SHARE: Decimal = Decimal::from_parts(16, 0, 0, false, 2);
/// Price multiplier for discounted birds.
pub const DISCOUNT_FACTOR: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Projected revenue for one flock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Revenue {
    #[serde(rename_all = "camelCase")]
    Eggs {
        productive_birds: Decimal,
        trays_per_bird_per_month: Decimal,
        monthly: Decimal,
        total: Decimal,
    },
    #[serde(rename_all = "camelCase")]
    TerminalSale {
        full_price: Decimal,
        discounted: Decimal,
        total: Decimal,
    },
}

impl Revenue {
    /// Revenue for a flock.
    ///
    /// `sale_price` is the price per tray of eggs for layers and the price
    /// per bird otherwise.
    #[must_use]
    pub fn compute(bird: BirdType, bird_count: u64, sale_price: Decimal, months: u32) -> Self {
        let birds = Decimal::from(bird_count);
        if bird.is_egg_layer() {
            let productive_birds = birds.saturating_mul(LAYER_SURVIVAL_RATE);
            let days = Decimal::from(EGGS_PER_TRAY);
            let trays_per_bird_per_month = LAY_RATE * days / Decimal::from(EGGS_PER_TRAY);
            let monthly = if bird_count == 0 {
                Decimal::ZERO
            } else {
                productive_birds
                    .saturating_mul(trays_per_bird_per_month)
                    .saturating_mul(sale_price)
            };
            Self::Eggs {
                productive_birds,
                trays_per_bird_per_month,
                monthly,
                total: monthly.saturating_mul(Decimal::from(months)),
            }
        } else {
            let full_price = birds.saturating_mul(FULL_PRICE_SHARE).saturating_mul(sale_price);
            let discounted = birds
                .saturating_mul(DISCOUNTED_SHARE)
                .saturating_mul(sale_price)
                .saturating_mul(DISCOUNT_FACTOR);
            Self::TerminalSale {
                full_price,
                discounted,
                total: full_price.saturating_add(discounted),
            }
        }
    }

    /// Revenue per month; zero until the terminal sale for meat birds.
    #[must_use]
    pub const fn monthly(&self) -> Decimal {
        match self {
            Self::Eggs { monthly, .. } => *monthly,
            Self::TerminalSale { .. } => Decimal::ZERO,
        }
    }

    /// Revenue over the whole production period.
    #[must_use]
    pub const fn total(&self) -> Decimal {
        match self {
            Self::Eggs { total, .. } | Self::TerminalSale { total, .. } => *total,
        }
    }

    /// Final-sale revenue; zero for layers.
    #[must_use]
    pub const fn final_sale(&self) -> Decimal {
        match self {
            Self::Eggs { .. } => Decimal::ZERO,
            Self::TerminalSale { total, .. } => *total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_revenue() {
        let revenue = Revenue::compute(BirdType::Layer, 1000, Decimal::from(5), 1);
        match revenue {
            Revenue::Eggs {
                productive_birds,
                trays_per_bird_per_month,
                monthly,
                total,
            } => {
                assert_eq!(productive_birds, Decimal::from(960));
                assert_eq!(trays_per_bird_per_month, Decimal::new(8, 1));
                assert_eq!(monthly, Decimal::from(3840));
                assert_eq!(total, Decimal::from(3840));
            }
            Revenue::TerminalSale { .. } => panic!("layers earn from eggs"),
        }
    }

    #[test]
    fn test_layer_revenue_scales_with_months() {
        let revenue = Revenue::compute(BirdType::Layer, 1000, Decimal::from(5), 18);
        assert_eq!(revenue.total(), Decimal::from(3840 * 18));
        assert_eq!(revenue.final_sale(), Decimal::ZERO);
    }

    #[test]
    fn test_meat_revenue() {
        let revenue = Revenue::compute(BirdType::Broiler, 1000, Decimal::from(10), 2);
        assert_eq!(revenue.total(), Decimal::from(8800));
        assert_eq!(revenue.monthly(), Decimal::ZERO);
        assert_eq!(
            revenue,
            Revenue::TerminalSale {
                full_price: Decimal::from(8000),
                discounted: Decimal::from(800),
                total: Decimal::from(8800),
            }
        );
    }

    #[test]
    fn test_dual_purpose_birds_use_terminal_sale() {
        for bird in [BirdType::DualPurposeFast, BirdType::DualPurposeSlow] {
            let revenue = Revenue::compute(bird, 100, Decimal::from(20), 4);
            assert_eq!(revenue.total(), Decimal::from(1760));
        }
    }

    #[test]
    fn test_empty_flock_earns_nothing() {
        let revenue = Revenue::compute(BirdType::Layer, 0, Decimal::from(5), 12);
        assert_eq!(revenue.monthly(), Decimal::ZERO);
        assert_eq!(revenue.total(), Decimal::ZERO);
    }
}
