//! Cost aggregation across the production period.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::feed::FeedCost;
use crate::health::HealthCost;
use crate::input::saturating_sum;

/// Labour, water and biosecurity per calendar month, plus one-off brooding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecurringCosts {
    pub labour: Decimal,
    pub water: Decimal,
    pub biosecurity: Decimal,
    /// Charged once, in the first month.
    pub brooding: Decimal,
}

impl RecurringCosts {
    #[must_use]
    pub fn monthly_total(&self) -> Decimal {
        saturating_sum([self.labour, self.water, self.biosecurity])
    }
}

/// Everything [`CostBreakdown::compute`] needs.
#[derive(Debug, Clone, Copy)]
pub struct CostInputs<'a> {
    pub feed: &'a FeedCost,
    pub vaccinations: HealthCost,
    pub drugs: HealthCost,
    pub recurring: &'a RecurringCosts,
    pub chick_cost: Decimal,
    pub bird_count: u64,
    pub months: u32,
}

/// Per-category cost totals for one budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub feed_monthly: Decimal,
    pub feed_total: Decimal,
    pub vaccinations: HealthCost,
    pub drugs: HealthCost,
    pub other_monthly: Decimal,
    pub labour_total: Decimal,
    pub water_total: Decimal,
    pub biosecurity_total: Decimal,
    pub other_recurring_total: Decimal,
    pub brooding: Decimal,
    pub chicks_total: Decimal,
    /// Recurring costs of month one plus brooding and the chicks.
    pub first_month_other: Decimal,
    pub total: Decimal,
}

impl CostBreakdown {
    /// Sum every category.
    ///
    /// Health costs enter the total as-is; their monthly averages are for
    /// display only. Brooding and chicks are charged once whatever the
    /// month count. Totals saturate at `Decimal::MAX`.
    #[must_use]
    pub fn compute(inputs: &CostInputs<'_>) -> Self {
        let months = Decimal::from(inputs.months);
        let recurring = inputs.recurring;

        let feed_monthly = inputs.feed.monthly_cost;
        let feed_total = feed_monthly.saturating_mul(months);
        let other_monthly = recurring.monthly_total();
        let other_recurring_total = other_monthly.saturating_mul(months);
        let chicks_total = inputs.chick_cost.saturating_mul(Decimal::from(inputs.bird_count));

        let total = saturating_sum([
            feed_total,
            inputs.vaccinations.total,
            inputs.drugs.total,
            other_recurring_total,
            recurring.brooding,
            chicks_total,
        ]);

        Self {
            feed_monthly,
            feed_total,
            vaccinations: inputs.vaccinations,
            drugs: inputs.drugs,
            other_monthly,
            labour_total: recurring.labour.saturating_mul(months),
            water_total: recurring.water.saturating_mul(months),
            biosecurity_total: recurring.biosecurity.saturating_mul(months),
            other_recurring_total,
            brooding: recurring.brooding,
            chicks_total,
            first_month_other: saturating_sum([other_monthly, recurring.brooding, chicks_total]),
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(monthly_cost: i64) -> FeedCost {
        FeedCost {
            daily_intake_kg: Decimal::ZERO,
            cost_per_kg: Decimal::ZERO,
            daily_cost_per_bird: Decimal::ZERO,
            monthly_cost: Decimal::from(monthly_cost),
        }
    }

    fn health(total: i64, months: u32) -> HealthCost {
        HealthCost {
            total: Decimal::from(total),
            monthly_average: Decimal::from(total) / Decimal::from(months),
        }
    }

    #[test]
    fn test_grand_total() {
        let feed = feed(10_000);
        let recurring = RecurringCosts {
            labour: Decimal::from(300),
            water: Decimal::from(50),
            biosecurity: Decimal::from(150),
            brooding: Decimal::from(2_000),
        };
        let costs = CostBreakdown::compute(&CostInputs {
            feed: &feed,
            vaccinations: health(1_200, 2),
            drugs: health(800, 2),
            recurring: &recurring,
            chick_cost: Decimal::from(3),
            bird_count: 1_000,
            months: 2,
        });

        assert_eq!(costs.feed_total, Decimal::from(20_000));
        assert_eq!(costs.other_monthly, Decimal::from(500));
        assert_eq!(costs.other_recurring_total, Decimal::from(1_000));
        assert_eq!(costs.labour_total, Decimal::from(600));
        assert_eq!(costs.chicks_total, Decimal::from(3_000));
        assert_eq!(costs.first_month_other, Decimal::from(5_500));
        // 20000 + 1200 + 800 + 1000 + 2000 + 3000
        assert_eq!(costs.total, Decimal::from(28_000));
    }

    #[test]
    fn test_one_off_costs_ignore_month_count() {
        let feed = feed(0);
        let recurring = RecurringCosts {
            brooding: Decimal::from(500),
            ..RecurringCosts::default()
        };
        let costs = CostBreakdown::compute(&CostInputs {
            feed: &feed,
            vaccinations: HealthCost::default(),
            drugs: HealthCost::default(),
            recurring: &recurring,
            chick_cost: Decimal::from(2),
            bird_count: 100,
            months: 0,
        });
        assert_eq!(costs.total, Decimal::from(700));
    }

    #[test]
    fn test_zero_inputs_total_zero() {
        let feed = feed(0);
        let costs = CostBreakdown::compute(&CostInputs {
            feed: &feed,
            vaccinations: HealthCost::default(),
            drugs: HealthCost::default(),
            recurring: &RecurringCosts::default(),
            chick_cost: Decimal::ZERO,
            bird_count: 0,
            months: 0,
        });
        assert_eq!(costs, CostBreakdown::default());
    }
}
