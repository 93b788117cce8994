//! Integration tests for planner sessions and report consistency.
//!
//! Run with: cargo test -p river-poultry-integration-tests

#![allow(clippy::unwrap_used)]

use chrono::{NaiveDate, TimeZone, Utc};
use river_poultry_core::{BirdType, STORAGE_KEY, WizardStep, calendar};
use river_poultry_integration_tests::{broiler_form, dead_relay_url, layer_form};
use river_poultry_planner::leads::{LeadAction, ToolData, ToolName};
use river_poultry_planner::report::{Document, ReportView, email, summary};
use river_poultry_planner::{FileStore, LeadTracker, Session};

// ============================================================================
// Sessions
// ============================================================================

#[test]
fn test_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut session = Session::open(FileStore::new(dir.path())).unwrap();
    session.form = broiler_form();
    assert!(session.wizard.next(&session.form));
    session.save().unwrap();

    let reopened = Session::open(FileStore::new(dir.path())).unwrap();
    assert_eq!(reopened.form, session.form);
    assert_eq!(reopened.wizard.step(), WizardStep::Feed);
    assert_eq!(reopened.form.calculate(), session.form.calculate());
}

#[test]
fn test_corrupt_snapshot_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(format!("{STORAGE_KEY}.json")), "[1, 2").unwrap();

    let session = Session::open(FileStore::new(dir.path())).unwrap();
    assert_eq!(session.wizard.step(), WizardStep::BasicInformation);
    assert!(session.form.num_birds.is_empty());
}

#[test]
fn test_reset_clears_saved_form() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::open(FileStore::new(dir.path())).unwrap();
    session.form = layer_form();
    session.save().unwrap();

    session.reset();
    session.save().unwrap();

    let reopened = Session::open(FileStore::new(dir.path())).unwrap();
    assert!(reopened.form.vaccinations.is_empty());
    assert_eq!(reopened.form.bird_type, BirdType::default());
}

// ============================================================================
// Report consistency
// ============================================================================

#[test]
fn test_every_presentation_shows_the_same_figures() {
    for form in [broiler_form(), layer_form()] {
        let view = ReportView::new(
            &form.calculate(),
            &form.contact_info,
            Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap(),
        );
        let document = Document::layout(&view);
        let outputs = [
            summary::render(&view).unwrap(),
            document.render_text().unwrap(),
            document.render_html().unwrap(),
            email::render_html(&view).unwrap(),
        ];

        for output in &outputs {
            for figure in [&view.total_costs, &view.net_profit] {
                assert!(output.contains(figure.as_str()), "{figure} missing");
            }
        }
    }
}

// ============================================================================
// Leads and calendar
// ============================================================================

#[tokio::test]
async fn test_leads_are_kept_when_tracking_endpoint_is_down() {
    let dir = tempfile::tempdir().unwrap();
    let endpoint = dead_relay_url().join("/api/leads").unwrap();
    let tracker = LeadTracker::new(FileStore::new(dir.path()), reqwest::Client::new(), Some(endpoint));
    let form = broiler_form();

    tracker
        .track(
            ToolName::BudgetCalculator,
            LeadAction::EmailRequest,
            &form.contact_info,
            ToolData::budget(&form.calculate()),
        )
        .await
        .unwrap();

    let stored = tracker.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored.first().unwrap().session_id, tracker.session_id());

    let csv = tracker.export_csv();
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains("\"farmer@example.com\""));
}

#[test]
fn test_layer_calendar_covers_every_vaccine() {
    let form = layer_form();
    let arrival = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let events = calendar::schedule(&form.vaccinations, form.bird_type, arrival);

    assert_eq!(events.len(), form.vaccinations.len());
    for (event, entry) in events.iter().zip(&form.vaccinations) {
        assert!(event.date >= arrival);
        assert_eq!(event.title, entry.name);
    }

    let ics = calendar::to_ics(&events, Utc::now());
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), events.len());
}
