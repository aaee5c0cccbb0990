use serde::Deserialize;

use crate::error::Result;
use crate::models::catalog::{ItineraryTemplate, TourItem, TransferItem};

const MASTER_CATALOG: &str = include_str!("seed/master_catalog.json");

pub const DEFAULT_COUNTRIES: [&str; 4] = ["Thailand", "UAE", "India Goa", "Vietnam"];

/// Products and templates shipped with the service.
#[derive(Debug, Clone, Deserialize)]
pub struct MasterCatalog {
    pub tours: Vec<TourItem>,
    pub transfers: Vec<TransferItem>,
    pub templates: Vec<ItineraryTemplate>,
}

impl MasterCatalog {
    pub fn load() -> Result<Self> {
        Ok(serde_json::from_str(MASTER_CATALOG)?)
    }
}

pub fn default_countries() -> Vec<String> {
    DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_catalog_parses() {
        let catalog = MasterCatalog::load().unwrap();
        assert_eq!(catalog.tours.len(), 17);
        assert_eq!(catalog.transfers.len(), 7);
        assert_eq!(catalog.templates.len(), 2);

        let safari = catalog.tours.iter().find(|t| t.id == "th-bkk-2").unwrap();
        assert!(safari.is_sharing_only);
    }

    #[test]
    fn test_templates_reference_catalog_products() {
        let catalog = MasterCatalog::load().unwrap();
        for template in &catalog.templates {
            let nights: u32 = template.city_stays.iter().map(|s| s.nights).sum();
            assert_eq!(template.days, nights + 1, "{}", template.id);

            for id in &template.tour_ids {
                assert!(catalog.tours.iter().any(|t| &t.id == id), "{} missing", id);
            }
            for id in &template.transfer_ids {
                assert!(catalog.transfers.iter().any(|t| &t.id == id), "{} missing", id);
            }
        }
    }
}
