//! Rendering of the human-readable run summary stored with the log entry.

use crate::task::domain::OwnerCounts;
use chrono::NaiveDate;
use minijinja::{Environment, context};

/// Template used when no override is configured.
///
/// Receives `run_date`, `carried` (total) and `owners` (pairs of owner
/// identifier and count).
pub const DEFAULT_SUMMARY_TEMPLATE: &str = "Carried {{ carried }} task{{ '' if carried == 1 else 's' }} into {{ run_date }}\
{% for owner, count in owners %}{% if loop.first %}: {% else %}, {% endif %}{{ owner }} {{ count }}{% endfor %}";

/// Renders the success summary for a run.
///
/// # Errors
///
/// Returns the template error when `template` does not parse or render.
pub fn render_summary(
    template: &str,
    run_date: NaiveDate,
    counts: &OwnerCounts,
) -> Result<String, minijinja::Error> {
    let owners: Vec<(&str, usize)> = counts
        .iter()
        .map(|(owner, count)| (owner.as_str(), *count))
        .collect();
    let carried: usize = counts.values().sum();
    Environment::new().render_str(
        template,
        context! {
            run_date => run_date.to_string(),
            carried => carried,
            owners => owners,
        },
    )
}
