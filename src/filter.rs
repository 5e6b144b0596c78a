//! Admission predicate for the application review list

use crate::models::Application;

/// Decide whether a record appears in the filtered view.
///
/// The search clause matches case-insensitively against the display name and
/// the raw `fio` field, and literally against the phone string; a record
/// passes on any of the three. The status clause goes through the status
/// equivalence table. Both clauses must hold.
pub fn admits(application: &Application, search: &str, status_filter: &str) -> bool {
    matches_search(application, search) && application.status.matches_filter(status_filter)
}

fn matches_search(application: &Application, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }

    let needle = search.to_lowercase();
    if application.display_name().to_lowercase().contains(&needle) {
        return true;
    }
    if application
        .fio
        .as_deref()
        .is_some_and(|fio| fio.to_lowercase().contains(&needle))
    {
        return true;
    }

    // Phone numbers are numeric/symbolic; match on the literal string.
    application
        .phone
        .as_deref()
        .unwrap_or("")
        .contains(search)
}
