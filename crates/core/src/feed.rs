//! Feed intake and feed cost.
//!
//! A [`FeedPlan`] is priced in one of two ways, and the two do not mean the
//! same thing by "cost per kg":
//!
//! - **Complete feed**: stage prices are averaged, weighted by each stage's
//!   share of the total kg-per-ton. This is a true weighted average.
//! - **Ingredients**: each ingredient contributes `kg_per_ton / 1000 × price`
//!   and the contributions are summed without normalising. A recipe whose
//!   quantities add up to 800 kg is priced as 800 kg of mix per tonne.
//!
//! Both behaviours are kept as-is; see DESIGN.md.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::input::{saturating_div, saturating_sum};
use crate::types::{BirdType, DAYS_PER_MONTH};

/// Approximate Cobb500 broiler intake, grams per bird per day, days 1 to 49.
pub const COBB500_DAILY_G_PER_DAY: [u32; 49] = [
    30, 30, 32, 34, 36, 38, 40, // week 1
    42, 44, 46, 48, 50, 52, 54, // week 2
    56, 58, 60, 62, 64, 66, 68, // week 3
    70, 72, 74, 76, 78, 80, 82, // week 4
    84, 86, 88, 90, 92, 94, 96, // week 5
    98, 100, 102, 104, 106, 108, 110, // week 6
    112, 114, 116, 118, 120, 122, 124, // week 7
];

const KG_PER_TON: u32 = 1000;
const GRAMS_PER_KG: u32 = 1000;

/// Where a bird type's daily intake comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeReference {
    /// Same grams every day.
    Flat { grams_per_day: u32 },
    /// Day-indexed grams, starting at day 1.
    Curve(&'static [u32]),
}

impl IntakeReference {
    /// Reference intake for a bird type.
    #[must_use]
    pub const fn for_bird(bird: BirdType) -> Self {
        match bird {
            BirdType::Broiler => Self::Curve(&COBB500_DAILY_G_PER_DAY),
            BirdType::Layer => Self::Flat { grams_per_day: 120 },
            BirdType::DualPurposeFast => Self::Flat { grams_per_day: 130 },
            BirdType::DualPurposeSlow => Self::Flat { grams_per_day: 100 },
        }
    }

    /// Average daily intake in kg over the production period.
    ///
    /// Curves are averaged over the first `min(days, len)` whole days. A
    /// period shorter than one day gives zero rather than dividing by zero.
    #[must_use]
    pub fn daily_intake_kg(&self, production_days: Decimal) -> Decimal {
        let grams = match *self {
            Self::Flat { grams_per_day } => Decimal::from(grams_per_day),
            Self::Curve(curve) => {
                let whole_days = if production_days.is_sign_negative() {
                    0
                } else {
                    production_days.trunc().to_usize().unwrap_or(usize::MAX)
                };
                let days = whole_days.min(curve.len());
                let Some(window) = curve.get(..days) else {
                    return Decimal::ZERO;
                };
                if window.is_empty() {
                    return Decimal::ZERO;
                }
                let total: u64 = window.iter().map(|&g| u64::from(g)).sum();
                Decimal::from(total) / Decimal::from(window.len())
            }
        };
        grams / Decimal::from(GRAMS_PER_KG)
    }
}

/// How feed is sourced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedMode {
    /// Mixed on farm from raw ingredients.
    #[default]
    Ingredients,
    /// Bought as ready-made stage feeds.
    Complete,
}

/// Ready-made feed formulations in order of bird age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedStage {
    Prestarter,
    Starter,
    Grower,
    Finisher,
}

impl FeedStage {
    pub const ALL: [Self; 4] = [Self::Prestarter, Self::Starter, Self::Grower, Self::Finisher];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Prestarter => "Prestarter",
            Self::Starter => "Starter",
            Self::Grower => "Grower",
            Self::Finisher => "Finisher",
        }
    }
}

impl core::str::FromStr for FeedStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prestarter" | "pre-starter" => Ok(Self::Prestarter),
            "starter" => Ok(Self::Starter),
            "grower" => Ok(Self::Grower),
            "finisher" => Ok(Self::Finisher),
            other => Err(format!("unknown feed stage: {other}")),
        }
    }
}

/// One raw ingredient of an on-farm recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedIngredient {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kg_per_ton: Decimal,
    #[serde(default)]
    pub price_per_kg: Decimal,
}

impl FeedIngredient {
    /// Priced and named, so it can carry a recipe on its own.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.name.trim().is_empty()
            && self.kg_per_ton > Decimal::ZERO
            && self.price_per_kg > Decimal::ZERO
    }
}

/// One stage of a complete-feed programme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteFeedItem {
    pub stage: FeedStage,
    #[serde(default)]
    pub kg_per_ton: Decimal,
    #[serde(default)]
    pub price_per_kg: Decimal,
}

impl CompleteFeedItem {
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.kg_per_ton > Decimal::ZERO && self.price_per_kg > Decimal::ZERO
    }
}

/// The feed side of a budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "items", rename_all = "lowercase")]
pub enum FeedPlan {
    Ingredients(Vec<FeedIngredient>),
    Complete(Vec<CompleteFeedItem>),
}

impl FeedPlan {
    #[must_use]
    pub const fn mode(&self) -> FeedMode {
        match self {
            Self::Ingredients(_) => FeedMode::Ingredients,
            Self::Complete(_) => FeedMode::Complete,
        }
    }

    /// Cost of one kg of feed under this plan.
    #[must_use]
    pub fn blended_cost_per_kg(&self) -> Decimal {
        match self {
            Self::Ingredients(items) => ingredient_cost_per_kg(items),
            Self::Complete(items) => complete_feed_cost_per_kg(items),
        }
    }

    /// Whether the feed step of the wizard may be left.
    ///
    /// Complete feed needs a priced starter and grower stage; an ingredient
    /// recipe needs at least one named, priced ingredient.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Ingredients(items) => items.iter().any(FeedIngredient::is_usable),
            Self::Complete(items) => [FeedStage::Starter, FeedStage::Grower]
                .into_iter()
                .all(|stage| items.iter().any(|i| i.stage == stage && i.is_usable())),
        }
    }
}

/// `Σ kg_per_ton / 1000 × price_per_kg`, deliberately not renormalised.
#[must_use]
pub fn ingredient_cost_per_kg(items: &[FeedIngredient]) -> Decimal {
    saturating_sum(
        items
            .iter()
            .map(|f| (f.kg_per_ton / Decimal::from(KG_PER_TON)).saturating_mul(f.price_per_kg)),
    )
}

/// Stage prices weighted by share of total kg-per-ton; zero when no stage
/// has a quantity.
#[must_use]
pub fn complete_feed_cost_per_kg(items: &[CompleteFeedItem]) -> Decimal {
    let total = saturating_sum(items.iter().map(|i| i.kg_per_ton));
    if total.is_zero() {
        return Decimal::ZERO;
    }
    saturating_sum(
        items
            .iter()
            .map(|i| saturating_div(i.kg_per_ton, total).saturating_mul(i.price_per_kg)),
    )
}

/// Feed cost figures for one flock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedCost {
    pub daily_intake_kg: Decimal,
    pub cost_per_kg: Decimal,
    pub daily_cost_per_bird: Decimal,
    /// Flock cost for a fixed 30-day month.
    pub monthly_cost: Decimal,
}

impl FeedCost {
    #[must_use]
    pub fn compute(
        intake: IntakeReference,
        production_days: Decimal,
        plan: &FeedPlan,
        bird_count: u64,
    ) -> Self {
        let daily_intake_kg = intake.daily_intake_kg(production_days);
        let cost_per_kg = plan.blended_cost_per_kg();
        let daily_cost_per_bird = daily_intake_kg.saturating_mul(cost_per_kg);
        let monthly_cost = daily_cost_per_bird
            .saturating_mul(Decimal::from(bird_count))
            .saturating_mul(Decimal::from(DAYS_PER_MONTH));
        Self {
            daily_intake_kg,
            cost_per_kg,
            daily_cost_per_bird,
            monthly_cost,
        }
    }
}

/// Industry-standard on-farm recipe for a bird type, unpriced.
#[must_use]
pub fn suggested_ingredients(bird: BirdType) -> Vec<FeedIngredient> {
    let recipe: &[(&str, u32)] = match bird {
        BirdType::Layer | BirdType::DualPurposeSlow => &[
            ("Maize", 550),
            ("Soybean Meal", 250),
            ("Sunflower Cake", 100),
            ("Layer Concentrate (5%)", 50),
            ("Layer Concentrate (20%)", 30),
            ("Stock Feed Lime", 20),
        ],
        BirdType::Broiler => &[
            ("Maize", 580),
            ("Soybean Meal", 280),
            ("Sunflower Cake", 80),
            ("Broiler Concentrate (5%)", 40),
            ("Broiler Concentrate (20%)", 20),
            ("Stock Feed Lime", 0),
        ],
        BirdType::DualPurposeFast => &[
            ("Maize", 570),
            ("Soybean Meal", 270),
            ("Sunflower Cake", 90),
            ("Broiler Concentrate (5%)", 45),
            ("Broiler Concentrate (20%)", 25),
            ("Stock Feed Lime", 0),
        ],
    };
    recipe
        .iter()
        .enumerate()
        .map(|(i, &(name, kg))| FeedIngredient {
            id: format!("ingredient-{}", i + 1),
            name: name.to_owned(),
            kg_per_ton: Decimal::from(kg),
            price_per_kg: Decimal::ZERO,
        })
        .collect()
}

/// Suggested stage quantities (kg per ton) with a short description.
#[must_use]
pub const fn suggested_stage_plan(bird: BirdType) -> [(FeedStage, u32, &'static str); 4] {
    match bird {
        BirdType::Broiler | BirdType::DualPurposeFast => [
            (FeedStage::Prestarter, 0, "Day 1-7 (Optional)"),
            (FeedStage::Starter, 200, "Day 8-14 (1.5kg per bird)"),
            (FeedStage::Grower, 400, "Day 15-28 (3.0kg per bird)"),
            (FeedStage::Finisher, 400, "Day 29+ (4.5kg per bird)"),
        ],
        BirdType::Layer | BirdType::DualPurposeSlow => [
            (FeedStage::Prestarter, 0, "Week 1-2 (Optional)"),
            (FeedStage::Starter, 300, "Week 3-6 (1.5kg per bird)"),
            (FeedStage::Grower, 700, "Week 7-20 (6.0kg per bird)"),
            (FeedStage::Finisher, 0, "Week 21+ (Layer feed)"),
        ],
    }
}

/// Suggested complete-feed stages for a bird type, unpriced.
#[must_use]
pub fn suggested_stages(bird: BirdType) -> Vec<CompleteFeedItem> {
    suggested_stage_plan(bird)
        .into_iter()
        .map(|(stage, kg, _)| CompleteFeedItem {
            stage,
            kg_per_ton: Decimal::from(kg),
            price_per_kg: Decimal::ZERO,
        })
        .collect()
}

/// All four stages with no quantity or price.
#[must_use]
pub fn empty_stages() -> Vec<CompleteFeedItem> {
    FeedStage::ALL
        .into_iter()
        .map(|stage| CompleteFeedItem {
            stage,
            kg_per_ton: Decimal::ZERO,
            price_per_kg: Decimal::ZERO,
        })
        .collect()
}
