//! Shared domain types.
//!
//! Newtypes and enums for the values that flow between the calculator, the
//! report emitter and the email relay.

pub mod bird;
pub mod contact;
pub mod directory;
pub mod email;
pub mod money;
pub mod relay;

pub use bird::{AgeUnit, BirdType, DAYS_PER_MONTH, UnknownBirdType, months_for_days};
pub use contact::{COUNTRY_CODES, ContactInfo, DEFAULT_COUNTRY_CODE};
pub use directory::{BusinessGrowthExpert, BusinessSize, DirectoryEntry, ExpertStatus, Msme};
pub use email::{Email, EmailError};
pub use money::{CurrencyCode, Money, UnknownCurrency, group_thousands};
pub use relay::{HealthResponse, RelayResponse, SendEmailRequest};
