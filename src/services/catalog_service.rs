use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::catalog::{TourItem, TransferItem};

/// Read-only view over the product catalog.
pub trait Catalog {
    fn tours(&self) -> &[TourItem];
    fn transfers(&self) -> &[TransferItem];

    fn find_tour(&self, id: &str) -> Option<&TourItem> {
        self.tours().iter().find(|t| t.id == id)
    }

    fn find_transfer(&self, id: &str) -> Option<&TransferItem> {
        self.transfers().iter().find(|t| t.id == id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogSnapshot {
    pub tours: Vec<TourItem>,
    pub transfers: Vec<TransferItem>,
}

impl Catalog for CatalogSnapshot {
    fn tours(&self) -> &[TourItem] {
        &self.tours
    }

    fn transfers(&self) -> &[TransferItem] {
        &self.transfers
    }
}

/// Countries an agent can quote for and the cities the catalog covers in each.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Destinations {
    pub countries: Vec<String>,
    pub cities_by_country: BTreeMap<String, Vec<String>>,
}

/// Catalog products available for one quotation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct InventoryPool {
    pub tours: Vec<TourItem>,
    pub transfers: Vec<TransferItem>,
}

pub struct CatalogService;

impl CatalogService {
    pub fn generate_id() -> String {
        format!("cms-{}", uuid::Uuid::new_v4().simple())
    }

    /// Inserts a new tour at the front, or replaces the tour with the same id.
    /// Returns the stored item.
    pub fn upsert_tour(tours: &mut Vec<TourItem>, mut item: TourItem) -> TourItem {
        if item.id.trim().is_empty() {
            item.id = Self::generate_id();
        }
        match tours.iter_mut().find(|t| t.id == item.id) {
            Some(existing) => *existing = item.clone(),
            None => tours.insert(0, item.clone()),
        }
        item
    }

    pub fn upsert_transfer(transfers: &mut Vec<TransferItem>, mut item: TransferItem) -> TransferItem {
        if item.id.trim().is_empty() {
            item.id = Self::generate_id();
        }
        match transfers.iter_mut().find(|t| t.id == item.id) {
            Some(existing) => *existing = item.clone(),
            None => transfers.insert(0, item.clone()),
        }
        item
    }

    /// Adds a country name, ignoring blanks and exact duplicates.
    /// Returns whether the list changed.
    pub fn add_country(countries: &mut Vec<String>, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || countries.iter().any(|c| c == name) {
            return false;
        }
        countries.push(name.to_string());
        true
    }

    pub fn destinations(managed_countries: &[String], catalog: &impl Catalog) -> Destinations {
        let countries: BTreeSet<String> = managed_countries
            .iter()
            .cloned()
            .chain(catalog.tours().iter().map(|t| t.country.clone()))
            .chain(catalog.transfers().iter().map(|t| t.country.clone()))
            .filter(|c| !c.is_empty())
            .collect();

        let mut cities_by_country: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for tour in catalog.tours() {
            let cities = cities_by_country.entry(tour.country.clone()).or_default();
            if !cities.contains(&tour.city) {
                cities.push(tour.city.clone());
            }
        }

        Destinations {
            countries: countries.into_iter().collect(),
            cities_by_country,
        }
    }

    /// First catalog city for a country, in catalog order.
    pub fn first_city(catalog: &impl Catalog, country: &str) -> Option<String> {
        catalog
            .tours()
            .iter()
            .find(|t| t.country == country)
            .map(|t| t.city.clone())
    }

    /// Products for `country` (case-insensitive). A city narrows the tours
    /// only; transfers are point-to-point and always stay in the pool.
    pub fn inventory_pool(
        catalog: &impl Catalog,
        country: &str,
        city: Option<&str>,
        search: Option<&str>,
    ) -> InventoryPool {
        let country = country.to_lowercase();
        let city = city
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"))
            .map(str::to_lowercase);
        let query = search
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let matches_query = |name: &str| {
            query
                .as_ref()
                .map_or(true, |q| name.to_lowercase().contains(q.as_str()))
        };

        let tours = catalog
            .tours()
            .iter()
            .filter(|t| t.country.to_lowercase() == country)
            .filter(|t| city.as_ref().map_or(true, |c| t.city.to_lowercase() == *c))
            .filter(|t| matches_query(&t.name))
            .cloned()
            .collect();

        let transfers = catalog
            .transfers()
            .iter()
            .filter(|t| t.country.to_lowercase() == country)
            .filter(|t| matches_query(&t.route))
            .cloned()
            .collect();

        InventoryPool { tours, transfers }
    }
}
