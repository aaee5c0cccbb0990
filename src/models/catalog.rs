use serde::{Deserialize, Serialize};

use super::numeric::{deserialize_count, deserialize_money};
use super::quotation::CityStay;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    #[serde(rename = "City Tour")]
    CityTour,
    #[serde(rename = "Desert & Safari")]
    Desert,
    #[serde(rename = "Cruise")]
    Cruise,
    #[serde(rename = "Attraction & Theme Park")]
    Attraction,
    #[serde(rename = "Transfer")]
    Transfer,
    #[serde(rename = "Island Tour")]
    IslandTour,
}

/// How a tour is costed.
///
/// `TieredBySize` is a flat base price covering up to four travellers plus a
/// fixed charge for each extra traveller.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum PricingMode {
    Standard,
    TieredBySize,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TourItem {
    /// Empty on items the CMS has not stored yet.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub city: String,
    pub country: String,
    #[serde(default, deserialize_with = "deserialize_money")]
    pub adult_price_inr: f64,
    #[serde(default, deserialize_with = "deserialize_money")]
    pub child_price_inr: f64,
    #[serde(default, deserialize_with = "deserialize_money")]
    pub sharing_transfer_price_inr: f64,
    #[serde(default, deserialize_with = "deserialize_money")]
    pub private_transfer_price_inr: f64,
    pub category: Category,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_sharing_only: bool,
    /// Explicit pricing mode. Older catalog entries leave this unset and
    /// have their mode inferred from the product name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_mode: Option<PricingMode>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum VehicleType {
    Sedan,
    #[serde(rename = "SUV")]
    Suv,
    Van,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TransferItem {
    #[serde(default)]
    pub id: String,
    pub route: String,
    pub country: String,
    pub vehicle_type: VehicleType,
    #[serde(default, deserialize_with = "deserialize_money")]
    pub price_inr: f64,
    #[serde(default)]
    pub description: String,
}

/// A canned multi-city plan an agent can start a quotation from.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ItineraryTemplate {
    pub id: String,
    pub name: String,
    pub country: String,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub days: u32,
    pub city_stays: Vec<CityStay>,
    #[serde(default)]
    pub tour_ids: Vec<String>,
    #[serde(default)]
    pub transfer_ids: Vec<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub tagline: String,
}
