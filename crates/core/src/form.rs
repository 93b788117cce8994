//! The persisted budget form.
//!
//! [`BudgetForm`] is exactly what gets saved under [`STORAGE_KEY`]: numeric
//! fields stay as the text the farmer typed and are parsed on every
//! calculation. Unknown fields are ignored and malformed ones fall back to
//! their defaults, so an older or newer snapshot always loads.

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::budget::{BudgetBreakdown, BudgetInputs, OperationParameters, calculate};
use crate::costs::RecurringCosts;
use crate::feed::{
    CompleteFeedItem, FeedIngredient, FeedMode, FeedPlan, FeedStage, empty_stages,
    suggested_ingredients, suggested_stages,
};
use crate::health::{HealthCostEntry, recommended_vaccinations};
use crate::input::{parse_amount, parse_count};
use crate::types::{BirdType, ContactInfo, CurrencyCode};

/// Key of the saved form in the local store.
pub const STORAGE_KEY: &str = "budget_calculator_step_by_step";

/// Which health collection an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthKind {
    Vaccination,
    Drug,
}

/// Every field of the budget wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetForm {
    #[serde(deserialize_with = "or_default")]
    pub bird_type: BirdType,
    #[serde(deserialize_with = "text")]
    pub num_birds: String,
    #[serde(deserialize_with = "text")]
    pub production_period: String,
    #[serde(deserialize_with = "text")]
    pub doc_cost_per_chick: String,
    #[serde(deserialize_with = "text")]
    pub egg_price: String,
    #[serde(deserialize_with = "text")]
    pub broiler_price: String,
    #[serde(deserialize_with = "or_default")]
    pub currency_code: CurrencyCode,
    #[serde(deserialize_with = "or_default")]
    pub feed_type: FeedMode,
    #[serde(deserialize_with = "or_default")]
    pub complete_feed_items: Vec<CompleteFeedItem>,
    #[serde(deserialize_with = "or_default")]
    pub feed_items: Vec<FeedIngredient>,
    #[serde(deserialize_with = "or_default")]
    pub vaccinations: Vec<HealthCostEntry>,
    #[serde(deserialize_with = "or_default")]
    pub drug_treatments: Vec<HealthCostEntry>,
    #[serde(deserialize_with = "text")]
    pub labour_cost: String,
    #[serde(deserialize_with = "text")]
    pub water_cost: String,
    #[serde(deserialize_with = "text")]
    pub biosecurity_cost: String,
    #[serde(deserialize_with = "text")]
    pub brooding_cost: String,
    #[serde(deserialize_with = "or_default")]
    pub contact_info: ContactInfo,
}

impl Default for BudgetForm {
    /// A blank form: no figures, no recipe, four empty feed stages.
    fn default() -> Self {
        Self {
            bird_type: BirdType::default(),
            num_birds: String::new(),
            production_period: String::new(),
            doc_cost_per_chick: String::new(),
            egg_price: String::new(),
            broiler_price: String::new(),
            currency_code: CurrencyCode::default(),
            feed_type: FeedMode::default(),
            complete_feed_items: empty_stages(),
            feed_items: Vec::new(),
            vaccinations: Vec::new(),
            drug_treatments: Vec::new(),
            labour_cost: String::new(),
            water_cost: String::new(),
            biosecurity_cost: String::new(),
            brooding_cost: String::new(),
            contact_info: ContactInfo::default(),
        }
    }
}

impl BudgetForm {
    /// A blank form seeded with the suggested recipe for the default bird.
    #[must_use]
    pub fn new() -> Self {
        let mut form = Self::default();
        form.reseed_feed();
        form
    }

    /// Parse the operation parameters, coercing bad input to zero.
    #[must_use]
    pub fn parameters(&self) -> OperationParameters {
        OperationParameters {
            bird_type: self.bird_type,
            bird_count: parse_count(&self.num_birds),
            production_period: parse_amount(&self.production_period),
            chick_cost: parse_amount(&self.doc_cost_per_chick),
            egg_price: parse_amount(&self.egg_price),
            meat_price: parse_amount(&self.broiler_price),
            currency: self.currency_code,
        }
    }

    /// The feed plan for the active feed mode.
    #[must_use]
    pub fn feed_plan(&self) -> FeedPlan {
        match self.feed_type {
            FeedMode::Ingredients => FeedPlan::Ingredients(self.feed_items.clone()),
            FeedMode::Complete => FeedPlan::Complete(self.complete_feed_items.clone()),
        }
    }

    #[must_use]
    pub fn recurring(&self) -> RecurringCosts {
        RecurringCosts {
            labour: parse_amount(&self.labour_cost),
            water: parse_amount(&self.water_cost),
            biosecurity: parse_amount(&self.biosecurity_cost),
            brooding: parse_amount(&self.brooding_cost),
        }
    }

    #[must_use]
    pub fn inputs(&self) -> BudgetInputs {
        BudgetInputs {
            parameters: self.parameters(),
            feed: self.feed_plan(),
            vaccinations: self.vaccinations.clone(),
            drugs: self.drug_treatments.clone(),
            recurring: self.recurring(),
        }
    }

    /// Recompute every figure from the current form.
    #[must_use]
    pub fn calculate(&self) -> BudgetBreakdown {
        calculate(&self.inputs())
    }

    /// Change bird type and replace the active feed list with its suggestions.
    pub fn set_bird_type(&mut self, bird: BirdType) {
        self.bird_type = bird;
        self.reseed_feed();
    }

    /// Change feed mode and replace its list with the bird type's suggestions.
    pub fn set_feed_mode(&mut self, mode: FeedMode) {
        self.feed_type = mode;
        self.reseed_feed();
    }

    /// Seed the active feed list with unpriced suggestions.
    pub fn reseed_feed(&mut self) {
        match self.feed_type {
            FeedMode::Ingredients => {
                self.feed_items = suggested_ingredients(self.bird_type)
                    .into_iter()
                    .map(|item| FeedIngredient {
                        id: new_id(),
                        ..item
                    })
                    .collect();
            }
            FeedMode::Complete => self.complete_feed_items = suggested_stages(self.bird_type),
        }
    }

    /// Append an ingredient and return its id.
    pub fn add_ingredient(&mut self, name: &str, kg_per_ton: Decimal, price_per_kg: Decimal) -> String {
        let id = new_id();
        self.feed_items.push(FeedIngredient {
            id: id.clone(),
            name: name.trim().to_owned(),
            kg_per_ton,
            price_per_kg,
        });
        id
    }

    /// Set quantity and price for a complete-feed stage, adding the stage if absent.
    pub fn set_stage(&mut self, stage: FeedStage, kg_per_ton: Decimal, price_per_kg: Decimal) {
        if let Some(item) = self.complete_feed_items.iter_mut().find(|i| i.stage == stage) {
            item.kg_per_ton = kg_per_ton;
            item.price_per_kg = price_per_kg;
        } else {
            self.complete_feed_items.push(CompleteFeedItem {
                stage,
                kg_per_ton,
                price_per_kg,
            });
        }
    }

    /// Append a vaccination or drug treatment and return its id.
    pub fn add_health_entry(
        &mut self,
        kind: HealthKind,
        name: &str,
        age: Decimal,
        cost: Decimal,
        notes: &str,
    ) -> String {
        let id = new_id();
        let entry = HealthCostEntry {
            id: id.clone(),
            name: name.trim().to_owned(),
            age,
            cost,
            notes: notes.trim().to_owned(),
        };
        match kind {
            HealthKind::Vaccination => self.vaccinations.push(entry),
            HealthKind::Drug => self.drug_treatments.push(entry),
        }
        id
    }

    /// Append the bird type's recommended programme; returns how many were added.
    pub fn add_recommended_vaccines(&mut self) -> usize {
        let recommended = recommended_vaccinations(self.bird_type);
        let added = recommended.len();
        self.vaccinations.extend(
            recommended
                .into_iter()
                .map(|entry| HealthCostEntry { id: new_id(), ..entry }),
        );
        added
    }

    /// Change the cost of the vaccination or drug with this id.
    pub fn set_health_cost(&mut self, id: &str, cost: Decimal) -> bool {
        match self
            .vaccinations
            .iter_mut()
            .chain(self.drug_treatments.iter_mut())
            .find(|entry| entry.id == id)
        {
            Some(entry) => {
                entry.cost = cost;
                true
            }
            None => false,
        }
    }

    /// Remove the ingredient, vaccination or drug with this id.
    pub fn remove(&mut self, id: &str) -> bool {
        let before =
            self.feed_items.len() + self.vaccinations.len() + self.drug_treatments.len();
        self.feed_items.retain(|i| i.id != id);
        self.vaccinations.retain(|v| v.id != id);
        self.drug_treatments.retain(|d| d.id != id);
        let after = self.feed_items.len() + self.vaccinations.len() + self.drug_treatments.len();
        after < before
    }
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Accept a string or a number; anything else reads as empty.
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Fall back to the default when a field has the wrong shape.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}
