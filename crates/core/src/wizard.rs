//! Step-by-step budget wizard.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::form::BudgetForm;
use crate::input::{parse_amount, parse_count};

/// Wizard steps in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WizardStep {
    #[default]
    BasicInformation,
    Feed,
    Vaccinations,
    DrugTreatments,
    OtherCosts,
    Results,
}

impl WizardStep {
    pub const ALL: [Self; 6] = [
        Self::BasicInformation,
        Self::Feed,
        Self::Vaccinations,
        Self::DrugTreatments,
        Self::OtherCosts,
        Self::Results,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::BasicInformation => "Basic Information",
            Self::Feed => "Feed",
            Self::Vaccinations => "Vaccinations",
            Self::DrugTreatments => "Drug Treatments",
            Self::OtherCosts => "Other Costs",
            Self::Results => "Results",
        }
    }

    /// Whether the form satisfies this step.
    ///
    /// Only the first two steps have requirements; health entries, other
    /// costs and the results page are optional.
    #[must_use]
    pub fn is_valid(self, form: &BudgetForm) -> bool {
        match self {
            Self::BasicInformation => {
                let sale_price = if form.bird_type.is_egg_layer() {
                    &form.egg_price
                } else {
                    &form.broiler_price
                };
                parse_count(&form.num_birds) > 0
                    && [&form.production_period, &form.doc_cost_per_chick, sale_price]
                        .into_iter()
                        .all(|field| parse_amount(field) > Decimal::ZERO)
            }
            Self::Feed => form.feed_plan().is_complete(),
            Self::Vaccinations | Self::DrugTreatments | Self::OtherCosts | Self::Results => true,
        }
    }
}

/// Cursor over [`WizardStep`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Wizard {
    step: WizardStep,
}

impl Wizard {
    #[must_use]
    pub const fn at(step: WizardStep) -> Self {
        Self { step }
    }

    #[must_use]
    pub const fn step(&self) -> WizardStep {
        self.step
    }

    /// Advance if the current step is valid; returns whether it moved.
    pub fn next(&mut self, form: &BudgetForm) -> bool {
        if !self.step.is_valid(form) {
            return false;
        }
        match WizardStep::from_index(self.step.index() + 1) {
            Some(next) => {
                self.step = next;
                true
            }
            None => false,
        }
    }

    /// Go back one step; returns whether it moved.
    pub fn back(&mut self) -> bool {
        match self.step.index().checked_sub(1).and_then(WizardStep::from_index) {
            Some(previous) => {
                self.step = previous;
                true
            }
            None => false,
        }
    }

    /// Return to the first step with a fresh form.
    pub fn reset(&mut self, form: &mut BudgetForm) {
        self.step = WizardStep::BasicInformation;
        *form = BudgetForm::new();
    }
}
