//! Budget calculation: operation parameters in, [`BudgetBreakdown`] out.
//!
//! [`calculate`] is the only place the figures are derived. The summary, the
//! document and the email body all read the same breakdown.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::costs::{CostBreakdown, CostInputs, RecurringCosts};
use crate::feed::{FeedCost, FeedPlan, IntakeReference};
use crate::health::{HealthCost, HealthCostEntry};
use crate::input::saturating_div;
use crate::revenue::Revenue;
use crate::types::{AgeUnit, BirdType, CurrencyCode, months_for_days};

/// What is being raised, for how long, and at what prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationParameters {
    pub bird_type: BirdType,
    pub bird_count: u64,
    /// In [`BirdType::age_unit`] units.
    pub production_period: Decimal,
    /// Day-old chick price per bird.
    pub chick_cost: Decimal,
    /// Price per tray of 30 eggs.
    pub egg_price: Decimal,
    /// Price per bird at sale.
    pub meat_price: Decimal,
    pub currency: CurrencyCode,
}

impl OperationParameters {
    #[must_use]
    pub const fn age_unit(&self) -> AgeUnit {
        self.bird_type.age_unit()
    }

    #[must_use]
    pub fn production_days(&self) -> Decimal {
        self.age_unit().to_days(self.production_period)
    }

    #[must_use]
    pub fn months(&self) -> u32 {
        months_for_days(self.production_days())
    }

    /// The price that drives revenue for this bird type.
    #[must_use]
    pub const fn sale_price(&self) -> Decimal {
        if self.bird_type.is_egg_layer() {
            self.egg_price
        } else {
            self.meat_price
        }
    }
}

/// All calculator inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetInputs {
    pub parameters: OperationParameters,
    pub feed: FeedPlan,
    pub vaccinations: Vec<HealthCostEntry>,
    pub drugs: Vec<HealthCostEntry>,
    pub recurring: RecurringCosts,
}

/// Headline figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetResult {
    pub total_costs: Decimal,
    pub total_revenue: Decimal,
    /// Negative for a loss.
    pub net_profit: Decimal,
    /// `net_profit / total_costs × 100`; zero when there are no costs.
    pub profit_margin_percent: Decimal,
}

impl BudgetResult {
    #[must_use]
    pub fn new(total_costs: Decimal, total_revenue: Decimal) -> Self {
        let net_profit = total_revenue.saturating_sub(total_costs);
        let profit_margin_percent = if total_costs > Decimal::ZERO {
            saturating_div(net_profit, total_costs).saturating_mul(Decimal::ONE_HUNDRED)
        } else {
            Decimal::ZERO
        };
        Self {
            total_costs,
            total_revenue,
            net_profit,
            profit_margin_percent,
        }
    }

    #[must_use]
    pub fn is_loss(&self) -> bool {
        self.net_profit < Decimal::ZERO
    }
}

/// Every figure shown to the farmer, derived once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetBreakdown {
    pub parameters: OperationParameters,
    pub production_days: Decimal,
    pub months: u32,
    pub feed: FeedCost,
    pub costs: CostBreakdown,
    pub revenue: Revenue,
    pub result: BudgetResult,
}

/// Derive the full breakdown.
#[must_use]
pub fn calculate(inputs: &BudgetInputs) -> BudgetBreakdown {
    let parameters = &inputs.parameters;
    let production_days = parameters.production_days();
    let months = parameters.months();

    let feed = FeedCost::compute(
        IntakeReference::for_bird(parameters.bird_type),
        production_days,
        &inputs.feed,
        parameters.bird_count,
    );
    let costs = CostBreakdown::compute(&CostInputs {
        feed: &feed,
        vaccinations: HealthCost::compute(&inputs.vaccinations, months),
        drugs: HealthCost::compute(&inputs.drugs, months),
        recurring: &inputs.recurring,
        chick_cost: parameters.chick_cost,
        bird_count: parameters.bird_count,
        months,
    });
    let revenue = Revenue::compute(
        parameters.bird_type,
        parameters.bird_count,
        parameters.sale_price(),
        months,
    );
    let result = BudgetResult::new(costs.total, revenue.total());

    BudgetBreakdown {
        parameters: parameters.clone(),
        production_days,
        months,
        feed,
        costs,
        revenue,
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{CompleteFeedItem, FeedIngredient, FeedStage};

    fn parameters(bird_type: BirdType, bird_count: u64, period: i64) -> OperationParameters {
        OperationParameters {
            bird_type,
            bird_count,
            production_period: Decimal::from(period),
            chick_cost: Decimal::from(3),
            egg_price: Decimal::from(5),
            meat_price: Decimal::from(10),
            currency: CurrencyCode::USD,
        }
    }

    fn inputs(parameters: OperationParameters, feed: FeedPlan) -> BudgetInputs {
        BudgetInputs {
            parameters,
            feed,
            vaccinations: Vec::new(),
            drugs: Vec::new(),
            recurring: RecurringCosts::default(),
        }
    }

    #[test]
    fn test_layer_budget() {
        // 4 weeks = 28 days = 1 month; 120 g/day at 1.00/kg.
        let feed = FeedPlan::Complete(vec![CompleteFeedItem {
            stage: FeedStage::Grower,
            kg_per_ton: Decimal::from(1000),
            price_per_kg: Decimal::ONE,
        }]);
        let breakdown = calculate(&inputs(parameters(BirdType::Layer, 1000, 4), feed));

        assert_eq!(breakdown.production_days, Decimal::from(28));
        assert_eq!(breakdown.months, 1);
        // 0.12 kg × 1.00 × 1000 birds × 30 days
        assert_eq!(breakdown.costs.feed_total, Decimal::from(3600));
        assert_eq!(breakdown.costs.chicks_total, Decimal::from(3000));
        assert_eq!(breakdown.result.total_costs, Decimal::from(6600));
        assert_eq!(breakdown.result.total_revenue, Decimal::from(3840));
        assert_eq!(breakdown.result.net_profit, Decimal::from(-2760));
        assert!(breakdown.result.is_loss());
    }

    #[test]
    fn test_broiler_budget_uses_days() {
        let feed = FeedPlan::Ingredients(vec![FeedIngredient {
            id: "1".to_owned(),
            name: "Maize".to_owned(),
            kg_per_ton: Decimal::ZERO,
            price_per_kg: Decimal::ZERO,
        }]);
        let breakdown = calculate(&inputs(parameters(BirdType::Broiler, 1000, 42), feed));
        assert_eq!(breakdown.production_days, Decimal::from(42));
        assert_eq!(breakdown.months, 2);
        assert_eq!(breakdown.revenue.total(), Decimal::from(8800));
        // Only the chicks cost anything.
        assert_eq!(breakdown.result.total_costs, Decimal::from(3000));
        assert_eq!(breakdown.result.net_profit, Decimal::from(5800));
    }

    #[test]
    fn test_profit_margin() {
        let result = BudgetResult::new(Decimal::from(200), Decimal::from(250));
        assert_eq!(result.profit_margin_percent, Decimal::from(25));
        assert!(!result.is_loss());
    }

    #[test]
    fn test_profit_margin_without_costs_is_zero() {
        let result = BudgetResult::new(Decimal::ZERO, Decimal::from(100));
        assert_eq!(result.net_profit, Decimal::from(100));
        assert_eq!(result.profit_margin_percent, Decimal::ZERO);
    }

    #[test]
    fn test_zero_period_has_no_monthly_averages() {
        let mut inputs = inputs(
            parameters(BirdType::Layer, 10, 0),
            FeedPlan::Complete(Vec::new()),
        );
        inputs.vaccinations.push(HealthCostEntry {
            id: "v".to_owned(),
            name: "Marek".to_owned(),
            age: Decimal::ONE,
            cost: Decimal::from(50),
            notes: String::new(),
        });
        let breakdown = calculate(&inputs);
        assert_eq!(breakdown.months, 0);
        assert_eq!(breakdown.costs.vaccinations.monthly_average, Decimal::ZERO);
        assert_eq!(breakdown.result.total_costs, Decimal::from(80));
    }

    #[test]
    fn test_costs_never_negative_for_non_negative_inputs() {
        for bird in BirdType::ALL {
            for (count, period) in [(0, 0), (1, 1), (500, 7), (10_000, 80)] {
                let breakdown = calculate(&inputs(
                    parameters(bird, count, period),
                    FeedPlan::Ingredients(crate::feed::suggested_ingredients(bird)),
                ));
                assert!(breakdown.result.total_costs >= Decimal::ZERO);
            }
        }
    }
}
