//! Region/district cascade
//!
//! One instance per participant section. The offered districts always
//! belong to the selected region, and choosing a region clears any district
//! picked before.

use crate::models::person::{Person, Role};
use crate::models::region::District;
use crate::services::reference::ReferenceData;
use crate::utils::errors::{RegistrationError, Result};
use crate::utils::logging::log_cascade_selection;

#[derive(Debug, Clone)]
pub struct RegionCascade {
    role: Role,
    language: String,
    selected_region: Option<u32>,
    district_options: Vec<District>,
}

impl RegionCascade {
    pub fn new(role: Role, language: impl Into<String>) -> Self {
        Self {
            role,
            language: language.into(),
            selected_region: None,
            district_options: Vec::new(),
        }
    }

    /// Select a region, or clear the selection with `None`.
    ///
    /// Writes the localised region name into `person.region`, clears
    /// `person.district` and recomputes the district options.
    pub fn select_region(
        &mut self,
        reference: &ReferenceData,
        person: &mut Person,
        region_id: Option<u32>,
    ) -> Result<()> {
        let Some(region_id) = region_id else {
            self.selected_region = None;
            self.district_options.clear();
            person.region.clear();
            person.district.clear();
            return Ok(());
        };

        let region = reference
            .region(region_id)
            .ok_or(RegistrationError::UnknownRegion { region_id })?;

        let name = region.name.get(&self.language).to_string();
        log_cascade_selection(&self.role.to_string(), "region", region_id, &name);

        person.region = name;
        person.district.clear();
        self.selected_region = Some(region_id);
        self.district_options = reference.districts_in(region_id);
        Ok(())
    }

    /// Select one of the offered districts
    pub fn select_district(&mut self, person: &mut Person, district_id: u32) -> Result<()> {
        if !self.district_enabled() {
            return Err(RegistrationError::DistrictSelectorDisabled);
        }

        let district = self
            .district_options
            .iter()
            .find(|district| district.id == district_id)
            .ok_or(RegistrationError::UnknownDistrict { district_id })?;

        let name = district.name.get(&self.language).to_string();
        log_cascade_selection(&self.role.to_string(), "district", district_id, &name);

        person.district = name;
        Ok(())
    }

    /// The district selector is usable only once a region is chosen
    pub fn district_enabled(&self) -> bool {
        self.selected_region.is_some()
    }

    pub fn selected_region(&self) -> Option<u32> {
        self.selected_region
    }

    pub fn district_options(&self) -> &[District] {
        &self.district_options
    }

    /// Map the stored district name back to an option id
    pub fn selected_district_id(&self, person: &Person) -> Option<u32> {
        if person.district.is_empty() {
            return None;
        }
        self.district_options
            .iter()
            .find(|district| district.name.matches(&person.district))
            .map(|district| district.id)
    }
}
