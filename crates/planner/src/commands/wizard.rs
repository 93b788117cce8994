//! Moving through the wizard.
//!
//! A step can only be left forwards once its required fields are filled.
//! Going back is always allowed.

use river_poultry_core::WizardStep;
use river_poultry_planner::PlannerError;

use super::{Context, say};

/// Advance to the next step.
pub fn next(ctx: &Context) -> Result<(), PlannerError> {
    let mut session = ctx.session()?;
    let current = session.wizard.step();
    if !session.wizard.next(&session.form) {
        if current == WizardStep::Results {
            say("Already on the last step.");
            return Ok(());
        }
        return Err(PlannerError::StepIncomplete(current.title()));
    }
    session.save()?;
    announce(session.wizard.step());
    Ok(())
}

/// Return to the previous step.
pub fn back(ctx: &Context) -> Result<(), PlannerError> {
    let mut session = ctx.session()?;
    if !session.wizard.back() {
        say("Already on the first step.");
        return Ok(());
    }
    session.save()?;
    announce(session.wizard.step());
    Ok(())
}

/// List the steps with the current one marked.
pub fn status(ctx: &Context) -> Result<(), PlannerError> {
    let session = ctx.session()?;
    let current = session.wizard.step();
    for step in WizardStep::ALL {
        say(status_line(step, current, step.is_valid(&session.form)));
    }
    Ok(())
}

fn announce(step: WizardStep) {
    say(format!(
        "Step {} of {}: {}",
        step.index() + 1,
        WizardStep::ALL.len(),
        step.title()
    ));
}

fn status_line(step: WizardStep, current: WizardStep, valid: bool) -> String {
    let marker = if step == current { '>' } else { ' ' };
    let state = if valid { "ok" } else { "incomplete" };
    format!("{marker} {}. {} [{state}]", step.index() + 1, step.title())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_marks_current_step() {
        assert_eq!(
            status_line(WizardStep::Feed, WizardStep::Feed, true),
            "> 2. Feed [ok]"
        );
        assert_eq!(
            status_line(WizardStep::BasicInformation, WizardStep::Feed, false),
            "  1. Basic Information [incomplete]"
        );
    }
}
