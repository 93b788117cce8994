//! Summaries, documents, emails and the vaccination calendar.
//!
//! # Usage
//!
//! ```bash
//! river-poultry summary
//! river-poultry summary --document
//! river-poultry download
//! river-poultry email
//! river-poultry calendar --arrival 2025-03-01 --include-drugs
//! ```

use chrono::{NaiveDate, Utc};
use river_poultry_core::{BudgetForm, WizardStep, calendar};
use river_poultry_planner::PlannerError;
use river_poultry_planner::leads::{LeadAction, ToolData, ToolName};
use river_poultry_planner::report::emitter::write_file;
use river_poultry_planner::report::{
    Document, EmailOutcome, ReportError, ReportView, summary as summary_view,
};

use super::{Context, say};

/// File name of the exported calendar.
const CALENDAR_FILENAME: &str = "vaccination_schedule.ics";

/// Print the budget summary, or the full document with `document`.
pub fn summary(ctx: &Context, document: bool) -> Result<(), PlannerError> {
    let session = ctx.session()?;
    let view = view(&session.form)?;
    let text = if document {
        Document::layout(&view).render_text()
    } else {
        summary_view::render(&view)
    }
    .map_err(ReportError::from)?;
    say(text.trim_end());
    Ok(())
}

/// Write the printable report and record the download.
pub async fn download(ctx: &Context) -> Result<(), PlannerError> {
    let session = ctx.session()?;
    let form = &session.form;
    let view = view(form)?;
    let path = ctx.emitter().download(&view, &form.contact_info)?;
    ctx.leads
        .track(
            ToolName::BudgetCalculator,
            LeadAction::PdfDownload,
            &form.contact_info,
            ToolData::budget(&form.calculate()),
        )
        .await?;
    say(format!("Report saved to {}", path.display()));
    Ok(())
}

/// Email the report through the relay.
pub async fn email(ctx: &Context) -> Result<(), PlannerError> {
    let session = ctx.session()?;
    let form = &session.form;
    if !form.contact_info.has_email() {
        return Err(ReportError::MissingContact(
            "Please enter an email address to send the report.",
        )
        .into());
    }
    let view = view(form)?;
    ctx.leads
        .track(
            ToolName::BudgetCalculator,
            LeadAction::EmailRequest,
            &form.contact_info,
            ToolData::budget(&form.calculate()),
        )
        .await?;

    match ctx.emitter().email(&view, &form.contact_info).await? {
        EmailOutcome::Sent { to, .. } => say(format!("Report successfully sent to {to}!")),
        EmailOutcome::Fallback(fallback) => {
            say(format!(
                "Email service is not available ({}).",
                fallback.reason
            ));
            say(format!("The report was saved to {}", fallback.document.display()));
            if fallback.opened {
                say("Your mail client has been opened; attach the report and send it.");
            } else {
                say("Send it yourself with this link:");
                say(&fallback.mailto);
            }
        }
    }
    Ok(())
}

/// Export vaccinations (and optionally drug treatments) as an iCalendar file.
pub async fn calendar(
    ctx: &Context,
    arrival: NaiveDate,
    include_drugs: bool,
) -> Result<(), PlannerError> {
    let session = ctx.session()?;
    let form = &session.form;
    let mut entries = form.vaccinations.clone();
    if include_drugs {
        entries.extend(form.drug_treatments.iter().cloned());
    }
    if entries.is_empty() {
        return Err(PlannerError::invalid(
            "calendar",
            "add vaccinations before exporting a schedule",
        ));
    }

    let events = calendar::schedule(&entries, form.bird_type, arrival);
    let path = ctx.config.output_dir.join(CALENDAR_FILENAME);
    write_file(&path, &calendar::to_ics(&events, Utc::now()))?;

    ctx.leads
        .track(
            ToolName::Vaccination,
            LeadAction::CalendarExport,
            &form.contact_info,
            ToolData {
                poultry_type: Some(form.bird_type.as_str().to_string()),
                arrival_date: Some(arrival.to_string()),
                vaccine_count: Some(form.vaccinations.len()),
                ..ToolData::default()
            },
        )
        .await?;
    say(format!("{} events saved to {}", events.len(), path.display()));
    Ok(())
}

/// Build the report view, refusing a form whose basic information is missing.
fn view(form: &BudgetForm) -> Result<ReportView, PlannerError> {
    let basic = WizardStep::BasicInformation;
    if !basic.is_valid(form) {
        return Err(PlannerError::StepIncomplete(basic.title()));
    }
    Ok(ReportView::new(&form.calculate(), &form.contact_info, Utc::now()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use river_poultry_core::BirdType;

    use super::*;

    #[test]
    fn test_view_requires_basic_information() {
        let form = BudgetForm::new();
        assert!(matches!(
            view(&form),
            Err(PlannerError::StepIncomplete("Basic Information"))
        ));
    }

    #[test]
    fn test_view_for_complete_form() {
        let mut form = BudgetForm::new();
        form.set_bird_type(BirdType::Layer);
        form.num_birds = "300".to_string();
        form.production_period = "72".to_string();
        form.doc_cost_per_chick = "3000".to_string();
        form.egg_price = "12000".to_string();
        let view = view(&form).unwrap();
        assert_eq!(view.bird_type, "Layers");
    }
}
