//! River Poultry core: budget calculations and shared types.
//!
//! Everything here is pure. The planner feeds a [`BudgetForm`] in and renders
//! the [`BudgetBreakdown`] it gets back; the relay only uses the wire types in
//! [`types::relay`].
//!
//! # Modules
//!
//! - [`types`] - bird types, currencies, contact details, email addresses
//! - [`feed`] - daily intake and blended feed cost
//! - [`health`] - vaccination and drug costs, recommended programmes
//! - [`costs`] - cost aggregation
//! - [`revenue`] - egg and terminal-sale revenue
//! - [`budget`] - the full calculation
//! - [`form`] - the persisted wizard form
//! - [`wizard`] - wizard steps and validity
//! - [`calendar`] - iCalendar export
//! - [`housing`] - house floor space for a flock

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod budget;
pub mod calendar;
pub mod costs;
pub mod feed;
pub mod form;
pub mod health;
pub mod housing;
pub mod input;
pub mod revenue;
pub mod types;
pub mod wizard;

pub use budget::{BudgetBreakdown, BudgetInputs, BudgetResult, OperationParameters, calculate};
pub use costs::{CostBreakdown, RecurringCosts};
pub use feed::{CompleteFeedItem, FeedCost, FeedIngredient, FeedMode, FeedPlan, FeedStage};
pub use form::{BudgetForm, HealthKind, STORAGE_KEY};
pub use health::{HealthCost, HealthCostEntry};
pub use housing::{HouseSpace, HousingError};
pub use revenue::Revenue;
pub use types::*;
pub use wizard::{Wizard, WizardStep};
