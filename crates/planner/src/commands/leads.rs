//! Lead reporting.

use std::path::Path;

use chrono::Utc;
use river_poultry_planner::PlannerError;
use river_poultry_planner::leads::LeadStats;
use river_poultry_planner::report::emitter::write_file;

use super::{Context, say};

/// Print lead counts, or export the stored leads as CSV.
///
/// With `csv` and no `output` the CSV goes to stdout.
pub fn leads(ctx: &Context, csv: bool, output: Option<&Path>) -> Result<(), PlannerError> {
    if csv || output.is_some() {
        let export = ctx.leads.export_csv();
        match output {
            Some(path) => {
                write_file(path, &export)?;
                say(format!("Leads exported to {}", path.display()));
            }
            None => say(export),
        }
        return Ok(());
    }

    for line in stats_lines(&ctx.leads.stats(Utc::now())) {
        say(line);
    }
    Ok(())
}

fn stats_lines(stats: &LeadStats) -> Vec<String> {
    [
        ("Total leads", stats.total),
        ("Budget calculator", stats.budget_calculator),
        ("Vaccination scheduler", stats.vaccination),
        ("House space", stats.room_measurement),
        ("Report downloads", stats.pdf_download),
        ("Email requests", stats.email_request),
        ("Calendar exports", stats.calendar_export),
        ("With email", stats.with_email),
        ("With phone", stats.with_phone),
        ("Last 24 hours", stats.last_24_hours),
    ]
    .into_iter()
    .map(|(label, count)| format!("{label:<22} {count}"))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_lines_are_aligned() {
        let stats = LeadStats {
            total: 3,
            email_request: 2,
            ..LeadStats::default()
        };
        let lines = stats_lines(&stats);
        assert_eq!(lines.len(), 10);
        assert_eq!(lines.first().map(String::as_str), Some("Total leads            3"));
        assert!(lines.contains(&"Email requests         2".to_string()));
    }
}
