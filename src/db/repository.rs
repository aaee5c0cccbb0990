use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::db::seed::{default_countries, MasterCatalog};
use crate::db::store::KeyValueStore;
use crate::error::Result;
use crate::models::catalog::{ItineraryTemplate, TourItem, TransferItem};
use crate::models::quotation::SavedQuotation;
use crate::services::catalog_service::{CatalogService, CatalogSnapshot};

pub const TOURS_KEY: &str = "tour_maker_tours";
pub const TRANSFERS_KEY: &str = "tour_maker_transfers";
pub const COUNTRIES_KEY: &str = "tour_maker_countries";
pub const SAVED_QUOTES_KEY: &str = "tour_maker_saved_quotes";

/// Typed access to everything the service persists.
///
/// Collections are stored whole under one key each. Read-modify-write
/// operations hold `write_lock` so concurrent requests do not drop each
/// other's changes.
pub struct Repository {
    store: Arc<dyn KeyValueStore>,
    master: MasterCatalog,
    write_lock: Mutex<()>,
}

impl Repository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        Ok(Self {
            store,
            master: MasterCatalog::load()?,
            write_lock: Mutex::new(()),
        })
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn persist<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.store.set(key, serde_json::to_value(value)?).await
    }

    /// Returns the stored collection, writing `seed` first if the key is unset.
    async fn load_or_seed<T, F>(&self, key: &str, seed: F) -> Result<T>
    where
        T: DeserializeOwned + Serialize,
        F: FnOnce() -> T,
    {
        if let Some(existing) = self.load(key).await? {
            return Ok(existing);
        }
        let _guard = self.write_lock.lock().await;
        self.seed_if_unset(key, seed).await
    }

    /// Caller must hold `write_lock`.
    async fn seed_if_unset<T, F>(&self, key: &str, seed: F) -> Result<T>
    where
        T: DeserializeOwned + Serialize,
        F: FnOnce() -> T,
    {
        if let Some(existing) = self.load(key).await? {
            return Ok(existing);
        }
        log::info!("Seeding {} with bundled defaults", key);
        let seed = seed();
        self.persist(key, &seed).await?;
        Ok(seed)
    }

    pub async fn get_tours(&self) -> Result<Vec<TourItem>> {
        self.load_or_seed(TOURS_KEY, || self.master.tours.clone()).await
    }

    async fn locked_tours(&self) -> Result<Vec<TourItem>> {
        self.seed_if_unset(TOURS_KEY, || self.master.tours.clone()).await
    }

    pub async fn save_tours(&self, tours: &[TourItem]) -> Result<()> {
        self.persist(TOURS_KEY, &tours).await
    }

    pub async fn get_transfers(&self) -> Result<Vec<TransferItem>> {
        self.load_or_seed(TRANSFERS_KEY, || self.master.transfers.clone()).await
    }

    async fn locked_transfers(&self) -> Result<Vec<TransferItem>> {
        self.seed_if_unset(TRANSFERS_KEY, || self.master.transfers.clone()).await
    }

    pub async fn save_transfers(&self, transfers: &[TransferItem]) -> Result<()> {
        self.persist(TRANSFERS_KEY, &transfers).await
    }

    pub async fn get_countries(&self) -> Result<Vec<String>> {
        self.load_or_seed(COUNTRIES_KEY, default_countries).await
    }

    async fn locked_countries(&self) -> Result<Vec<String>> {
        self.seed_if_unset(COUNTRIES_KEY, default_countries).await
    }

    pub async fn save_countries(&self, countries: &[String]) -> Result<()> {
        self.persist(COUNTRIES_KEY, &countries).await
    }

    pub async fn catalog_snapshot(&self) -> Result<CatalogSnapshot> {
        Ok(CatalogSnapshot {
            tours: self.get_tours().await?,
            transfers: self.get_transfers().await?,
        })
    }

    pub fn templates(&self) -> &[ItineraryTemplate] {
        &self.master.templates
    }

    pub async fn upsert_tour(&self, tour: TourItem) -> Result<TourItem> {
        let _guard = self.write_lock.lock().await;
        let mut tours = self.locked_tours().await?;
        let stored = CatalogService::upsert_tour(&mut tours, tour);
        self.save_tours(&tours).await?;
        Ok(stored)
    }

    /// Returns whether a tour was removed.
    pub async fn delete_tour(&self, id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut tours = self.locked_tours().await?;
        let before = tours.len();
        tours.retain(|t| t.id != id);
        if tours.len() == before {
            return Ok(false);
        }
        self.save_tours(&tours).await?;
        Ok(true)
    }

    pub async fn upsert_transfer(&self, transfer: TransferItem) -> Result<TransferItem> {
        let _guard = self.write_lock.lock().await;
        let mut transfers = self.locked_transfers().await?;
        let stored = CatalogService::upsert_transfer(&mut transfers, transfer);
        self.save_transfers(&transfers).await?;
        Ok(stored)
    }

    pub async fn delete_transfer(&self, id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut transfers = self.locked_transfers().await?;
        let before = transfers.len();
        transfers.retain(|t| t.id != id);
        if transfers.len() == before {
            return Ok(false);
        }
        self.save_transfers(&transfers).await?;
        Ok(true)
    }

    pub async fn add_country(&self, name: &str) -> Result<Vec<String>> {
        let _guard = self.write_lock.lock().await;
        let mut countries = self.locked_countries().await?;
        if CatalogService::add_country(&mut countries, name) {
            self.save_countries(&countries).await?;
        }
        Ok(countries)
    }

    pub async fn delete_country(&self, name: &str) -> Result<Vec<String>> {
        let _guard = self.write_lock.lock().await;
        let mut countries = self.locked_countries().await?;
        let before = countries.len();
        countries.retain(|c| c != name);
        if countries.len() != before {
            self.save_countries(&countries).await?;
        }
        Ok(countries)
    }

    /// Most recently saved first.
    pub async fn get_saved_quotations(&self) -> Result<Vec<SavedQuotation>> {
        Ok(self.load(SAVED_QUOTES_KEY).await?.unwrap_or_default())
    }

    pub async fn find_saved(&self, reference_no: &str) -> Result<Option<SavedQuotation>> {
        Ok(self
            .get_saved_quotations()
            .await?
            .into_iter()
            .find(|q| q.quotation.reference_no == reference_no))
    }

    /// Replaces a saved quotation with the same reference in place, or puts
    /// a new one at the front.
    pub async fn save_quotation(&self, saved: SavedQuotation) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut quotes = self.get_saved_quotations().await?;
        match quotes
            .iter_mut()
            .find(|q| q.quotation.reference_no == saved.quotation.reference_no)
        {
            Some(existing) => *existing = saved,
            None => quotes.insert(0, saved),
        }
        self.persist(SAVED_QUOTES_KEY, &quotes).await
    }

    pub async fn delete_quotation(&self, reference_no: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut quotes = self.get_saved_quotations().await?;
        let before = quotes.len();
        quotes.retain(|q| q.quotation.reference_no != reference_no);
        if quotes.len() == before {
            return Ok(false);
        }
        self.persist(SAVED_QUOTES_KEY, &quotes).await?;
        Ok(true)
    }

    /// Round-trips the store so health checks see backend failures.
    pub async fn ping(&self) -> Result<()> {
        self.store.get(COUNTRIES_KEY).await.map(|_| ())
    }
}
