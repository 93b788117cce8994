//! House-space calculator.

use river_poultry_core::{BirdType, HouseSpace, HousingError};
use river_poultry_planner::PlannerError;
use river_poultry_planner::leads::{LeadAction, ToolData, ToolName};

use super::{Context, say};

/// Print the floor area a flock needs and record the lead.
pub async fn house_space(ctx: &Context, bird: BirdType, birds: u64) -> Result<(), PlannerError> {
    let space = HouseSpace::compute(bird, birds).map_err(|e| match e {
        HousingError::NoBirds => PlannerError::invalid("birds", e),
        HousingError::NoGuideline(_) => PlannerError::invalid("bird-type", e),
    })?;

    let session = ctx.session()?;
    ctx.leads
        .track(
            ToolName::RoomMeasurement,
            LeadAction::Calculation,
            &session.form.contact_info,
            ToolData::house_space(&space),
        )
        .await?;
    say(requirement(&space));
    Ok(())
}

fn requirement(space: &HouseSpace) -> String {
    format!(
        "You need approximately {} m² to accommodate {} {}.",
        space.area_display(),
        space.bird_count,
        space.bird_type.label().to_lowercase()
    )
}
