//! Floor space a poultry house needs for a flock.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use thiserror::Error;

use crate::types::BirdType;

/// Broilers, in m² per bird.
pub const BROILER_SPACE: Decimal = Decimal::from_parts(9, 0, 0, false, 2);
/// Layers, in m² per bird.
pub const LAYER_SPACE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);
/// Sasso and kuroilers, in m² per bird.
pub const DUAL_PURPOSE_SPACE: Decimal = Decimal::from_parts(14, 0, 0, false, 2);

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HousingError {
    #[error("enter the number of birds")]
    NoBirds,
    #[error("no space guideline for {0} birds")]
    NoGuideline(BirdType),
}

/// Square metres each bird needs, for types with a guideline.
#[must_use]
pub const fn space_per_bird(bird: BirdType) -> Option<Decimal> {
    match bird {
        BirdType::Broiler => Some(BROILER_SPACE),
        BirdType::Layer => Some(LAYER_SPACE),
        BirdType::DualPurposeFast => Some(DUAL_PURPOSE_SPACE),
        BirdType::DualPurposeSlow => None,
    }
}

/// House size for one flock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseSpace {
    pub bird_type: BirdType,
    pub bird_count: u64,
    pub space_per_bird: Decimal,
    /// Unrounded; see [`HouseSpace::area_display`].
    pub area: Decimal,
}

impl HouseSpace {
    /// # Errors
    ///
    /// Returns [`HousingError::NoBirds`] for an empty flock and
    /// [`HousingError::NoGuideline`] for bird types without a figure.
    pub fn compute(bird: BirdType, bird_count: u64) -> Result<Self, HousingError> {
        if bird_count == 0 {
            return Err(HousingError::NoBirds);
        }
        let space_per_bird = space_per_bird(bird).ok_or(HousingError::NoGuideline(bird))?;
        Ok(Self {
            bird_type: bird,
            bird_count,
            space_per_bird,
            area: space_per_bird.saturating_mul(Decimal::from(bird_count)),
        })
    }

    /// Area to two decimals, e.g. `"45.00"`.
    #[must_use]
    pub fn area_display(&self) -> String {
        let rounded = self
            .area
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{rounded:.2}")
    }
}
