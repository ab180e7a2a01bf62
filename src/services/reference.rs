//! Region/district reference dataset
//!
//! Two static JSON files are loaded wholesale at startup and never change
//! during the session. Districts refer to their region through `region_id`.

use std::collections::HashSet;
use std::path::Path;
use tracing::info;
use crate::config::DatasetConfig;
use crate::models::region::{District, Region};
use crate::utils::errors::{RegistrationError, Result};

const BUILTIN_REGIONS: &str = include_str!("../../data/regions.json");
const BUILTIN_DISTRICTS: &str = include_str!("../../data/districts.json");

/// Immutable region and district lists
#[derive(Debug, Clone)]
pub struct ReferenceData {
    regions: Vec<Region>,
    districts: Vec<District>,
}

impl ReferenceData {
    /// Build from already parsed lists, checking referential integrity
    pub fn new(regions: Vec<Region>, districts: Vec<District>) -> Result<Self> {
        let mut region_ids = HashSet::new();
        for region in &regions {
            if !region_ids.insert(region.id) {
                return Err(RegistrationError::Dataset(format!("Duplicate region id {}", region.id)));
            }
        }

        let mut district_ids = HashSet::new();
        for district in &districts {
            if !district_ids.insert(district.id) {
                return Err(RegistrationError::Dataset(format!("Duplicate district id {}", district.id)));
            }
            if !region_ids.contains(&district.region_id) {
                return Err(RegistrationError::Dataset(format!(
                    "District {} refers to unknown region {}",
                    district.id, district.region_id
                )));
            }
        }

        Ok(Self { regions, districts })
    }

    pub fn from_json_strs(regions_json: &str, districts_json: &str) -> Result<Self> {
        let regions: Vec<Region> = serde_json::from_str(regions_json)
            .map_err(|e| RegistrationError::Dataset(format!("Invalid regions dataset: {}", e)))?;
        let districts: Vec<District> = serde_json::from_str(districts_json)
            .map_err(|e| RegistrationError::Dataset(format!("Invalid districts dataset: {}", e)))?;
        Self::new(regions, districts)
    }

    /// Datasets compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json_strs(BUILTIN_REGIONS, BUILTIN_DISTRICTS)
    }

    /// Load both dataset files
    pub async fn load(regions_path: &Path, districts_path: &Path) -> Result<Self> {
        let regions_json = read_dataset(regions_path).await?;
        let districts_json = read_dataset(districts_path).await?;
        let data = Self::from_json_strs(&regions_json, &districts_json)?;

        info!(
            regions = data.regions.len(),
            districts = data.districts.len(),
            "Reference datasets loaded"
        );
        Ok(data)
    }

    /// Load the files named in the configuration
    pub async fn from_config(config: &DatasetConfig) -> Result<Self> {
        Self::load(Path::new(&config.regions_path), Path::new(&config.districts_path)).await
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    pub fn region(&self, id: u32) -> Option<&Region> {
        self.regions.iter().find(|region| region.id == id)
    }

    /// Districts belonging to one region, in dataset order
    pub fn districts_in(&self, region_id: u32) -> Vec<District> {
        self.districts
            .iter()
            .filter(|district| district.region_id == region_id)
            .cloned()
            .collect()
    }

}

async fn read_dataset(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        RegistrationError::Dataset(format!("Failed to read dataset {}: {}", path.display(), e))
    })
}
