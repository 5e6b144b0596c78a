//! Draft state for a new housing application

use crate::validation::{validate_draft, ValidationError};
use serde::{Deserialize, Serialize};

/// Regions with their districts, backing the draft form's scoped district
/// options.
pub const REGIONS: &[(&str, &[&str])] = &[
    (
        "Toshkent",
        &["Chilonzor", "Yunusobod", "Mirzo Ulug'bek", "Yakkasaroy"],
    ),
    (
        "Samarqand",
        &["Samarqand shahri", "Urgut", "Kattaqo'rg'on"],
    ),
    ("Buxoro", &["Buxoro shahri", "G'ijduvon", "Kogon"]),
    ("Farg'ona", &["Farg'ona shahri", "Qo'qon", "Marg'ilon"]),
    ("Andijon", &["Andijon shahri", "Asaka", "Xonobod"]),
];

/// District options for a region; empty for an unknown or unselected region.
pub fn districts_of(region: &str) -> &'static [&'static str] {
    REGIONS
        .iter()
        .find(|(name, _)| *name == region)
        .map(|(_, districts)| *districts)
        .unwrap_or(&[])
}

/// Mutable draft for creating a new application.
///
/// Fields update independently; the one cross-field rule is that selecting a
/// region resets the district, since district options are scoped to the
/// selected region. The draft has no relationship to fetched records and is
/// never merged into the review list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDraft {
    pub last_name: String,
    pub first_name: String,
    pub phone: String,
    pub room: String,
    pub faculty: String,
    pub region: String,
    pub district: String,
    pub has_privilege: bool,
    pub privilege_percent: u8,
}

impl ApplicationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a region, resetting any previously selected district.
    pub fn set_region(&mut self, region: impl Into<String>) {
        self.region = region.into();
        self.district.clear();
    }

    /// District options for the currently selected region.
    pub fn district_options(&self) -> &'static [&'static str] {
        districts_of(&self.region)
    }

    pub fn set_district(&mut self, district: impl Into<String>) {
        self.district = district.into();
    }

    /// Validate and close the draft.
    ///
    /// TODO: wire this to the backend create endpoint once its contract is
    /// settled; for now the draft is only validated and handed back.
    pub fn submit(self) -> Result<SubmittedDraft, ValidationError> {
        validate_draft(&self)?;
        tracing::info!(
            "Draft for {} {} closed without remote submission",
            self.last_name,
            self.first_name
        );
        Ok(SubmittedDraft { draft: self })
    }
}

/// A validated draft whose form has been closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedDraft {
    pub draft: ApplicationDraft,
}
