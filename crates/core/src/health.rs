//! Vaccination and drug-treatment costs.
//!
//! Entries are summed as a whole; the age column only matters for the
//! calendar export. The monthly figure is a plain average over the budgeting
//! months, not weighted by when the doses are given.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::input::saturating_sum;
use crate::types::{AgeUnit, BirdType};

/// One vaccination or drug treatment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCostEntry {
    pub id: String,
    pub name: String,
    /// Age at administration, in the bird type's [`AgeUnit`].
    #[serde(default)]
    pub age: Decimal,
    /// Cost for the whole flock.
    #[serde(default)]
    pub cost: Decimal,
    #[serde(default)]
    pub notes: String,
}

/// Totals for one health-cost collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCost {
    pub total: Decimal,
    /// `total / months`, zero when there are no months.
    pub monthly_average: Decimal,
}

impl HealthCost {
    #[must_use]
    pub fn compute(entries: &[HealthCostEntry], months: u32) -> Self {
        let total = saturating_sum(entries.iter().map(|e| e.cost));
        let monthly_average = if months == 0 {
            Decimal::ZERO
        } else {
            total / Decimal::from(months)
        };
        Self {
            total,
            monthly_average,
        }
    }
}

/// A programme entry with its age in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendedVaccine {
    pub name: &'static str,
    pub typical_age_days: u32,
    pub notes: &'static str,
}

const fn vaccine(name: &'static str, typical_age_days: u32, notes: &'static str) -> RecommendedVaccine {
    RecommendedVaccine {
        name,
        typical_age_days,
        notes,
    }
}

/// Short-cycle meat-bird programme (broilers and Sasso/Kroilers).
const MEAT_BIRD_PROGRAMME: &[RecommendedVaccine] = &[
    vaccine("Marek Disease Vaccine", 1, "Subcutaneous injection - Done at hatchery (in ovo at 17-19 days embryonation)"),
    vaccine("Newcastle Disease Vaccine", 1, "Coarse spray - Done at hatchery"),
    vaccine("Infectious Bronchitis Vaccine", 1, "Coarse spray - Massachusetts strain, often combined with Newcastle"),
    vaccine("Newcastle Disease Booster", 7, "Drinking water or coarse spray - Optional 2nd dose"),
    vaccine("Infectious Bronchitis Booster", 7, "Drinking water or coarse spray - Massachusetts strain booster"),
    vaccine("Infectious Bursal Disease (IBD)", 14, "Drinking water - Intermediate strain, protects immune system"),
    vaccine("Newcastle Disease Final", 21, "Drinking water or coarse spray - Final booster for market birds"),
];

/// Long-cycle programme for layers. Local birds follow the first 14 entries.
const LAYER_PROGRAMME: &[RecommendedVaccine] = &[
    vaccine("Marek Disease Vaccine", 1, "Subcutaneous injection - Done at hatchery (in ovo at 17-19 days embryonation)"),
    vaccine("Tenosynovitis Vaccine", 6, "Subcutaneous injection - Live mild strain"),
    vaccine("Newcastle Disease/Infectious Bronchitis", 14, "Drinking water - B1/Massachusetts combined vaccine"),
    vaccine("Infectious Bursal Disease (IBD)", 14, "Drinking water - Intermediate strain"),
    vaccine("Newcastle Disease/Infectious Bronchitis", 28, "Drinking water or coarse spray - B1/Massachusetts booster"),
    vaccine("Tenosynovitis Booster", 42, "Subcutaneous injection - Live mild strain booster"),
    vaccine("Infectious Bursal Disease Booster", 56, "Drinking water or coarse spray - Live strain"),
    vaccine("Newcastle Disease/Infectious Bronchitis", 56, "Drinking water or coarse spray - B1 or LaSota/Massachusetts"),
    vaccine("Avian Encephalomyelitis", 70, "Wing web - Live chick-embryo origin"),
    vaccine("Fowl Pox Vaccine", 70, "Wing web - Modified live vaccine"),
    vaccine("Chicken Infectious Anemia", 70, "Drinking water - Live vaccine"),
    vaccine("Newcastle Disease (Inactivated)", 98, "Subcutaneous injection - Killed vaccine for long-term protection"),
    vaccine("Infectious Bronchitis (Inactivated)", 98, "Subcutaneous injection - Killed vaccine booster"),
    vaccine("Egg Drop Syndrome", 98, "Subcutaneous injection - Prevents egg production drops"),
    vaccine("Fowl Cholera", 126, "Drinking water (live) or subcutaneous (inactivated)"),
    vaccine("Newcastle Disease Booster", 147, "Drinking water or spray - LaSota strain"),
    vaccine("Fowl Cholera Booster", 168, "Drinking water (live) or subcutaneous (inactivated)"),
    vaccine("Erysipelas", 182, "Drinking water (live) or subcutaneous (inactivated)"),
    vaccine("Fowl Pox Booster", 182, "Wing web - Modified live vaccine"),
    vaccine("Newcastle Disease (Inactivated)", 196, "Subcutaneous injection - Killed vaccine"),
    vaccine("Fowl Cholera Booster", 196, "Drinking water (live) or subcutaneous (inactivated)"),
    vaccine("Avian Encephalomyelitis Booster", 196, "Drinking water - Live vaccine"),
];

const LOCAL_PROGRAMME_LEN: usize = 14;

/// Recommended vaccination programme for a bird type, ages in days.
#[must_use]
pub fn recommended_programme(bird: BirdType) -> &'static [RecommendedVaccine] {
    match bird {
        BirdType::Broiler | BirdType::DualPurposeFast => MEAT_BIRD_PROGRAMME,
        BirdType::Layer => LAYER_PROGRAMME,
        BirdType::DualPurposeSlow => LAYER_PROGRAMME
            .get(..LOCAL_PROGRAMME_LEN)
            .unwrap_or(LAYER_PROGRAMME),
    }
}

/// The recommended programme as unpriced cost entries.
///
/// Ages are converted to the bird type's unit, rounding weeks up.
#[must_use]
pub fn recommended_vaccinations(bird: BirdType) -> Vec<HealthCostEntry> {
    let unit = bird.age_unit();
    recommended_programme(bird)
        .iter()
        .enumerate()
        .map(|(i, v)| HealthCostEntry {
            id: format!("vaccine-{}", i + 1),
            name: v.name.to_owned(),
            age: Decimal::from(age_in_unit(v.typical_age_days, unit)),
            cost: Decimal::ZERO,
            notes: v.notes.to_owned(),
        })
        .collect()
}

const fn age_in_unit(days: u32, unit: AgeUnit) -> u32 {
    days.div_ceil(unit.days())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(cost: i64) -> HealthCostEntry {
        HealthCostEntry {
            id: cost.to_string(),
            name: "Newcastle".to_owned(),
            age: Decimal::from(7),
            cost: Decimal::from(cost),
            notes: String::new(),
        }
    }

    #[test]
    fn test_total_and_monthly_average() {
        let cost = HealthCost::compute(&[entry(3000), entry(1500)], 3);
        assert_eq!(cost.total, Decimal::from(4500));
        assert_eq!(cost.monthly_average, Decimal::from(1500));
    }

    #[test]
    fn test_zero_months_average_is_zero() {
        let cost = HealthCost::compute(&[entry(900)], 0);
        assert_eq!(cost.total, Decimal::from(900));
        assert_eq!(cost.monthly_average, Decimal::ZERO);
    }

    #[test]
    fn test_empty_collection() {
        assert_eq!(HealthCost::compute(&[], 2), HealthCost::default());
    }

    #[test]
    fn test_programme_lengths() {
        assert_eq!(recommended_programme(BirdType::Broiler).len(), 7);
        assert_eq!(recommended_programme(BirdType::DualPurposeFast).len(), 7);
        assert_eq!(recommended_programme(BirdType::Layer).len(), 22);
        assert_eq!(recommended_programme(BirdType::DualPurposeSlow).len(), 14);
    }

    #[test]
    fn test_recommended_ages_converted_to_weeks() {
        let broiler = recommended_vaccinations(BirdType::Broiler);
        assert_eq!(broiler.last().map(|v| v.age), Some(Decimal::from(21)));

        let layers = recommended_vaccinations(BirdType::Layer);
        // Day 1 is week 1, day 6 is week 1, day 14 is week 2.
        let ages: Vec<_> = layers.iter().take(3).map(|v| v.age).collect();
        assert_eq!(ages, vec![Decimal::from(1), Decimal::from(1), Decimal::from(2)]);
        assert!(layers.iter().all(|v| v.cost.is_zero()));
    }
}
