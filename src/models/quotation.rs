use serde::{Deserialize, Serialize};

use super::itinerary::ItineraryDay;
use super::numeric::{deserialize_count, deserialize_money, deserialize_percent};

pub const FALLBACK_CITY: &str = "Principal City";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CityStay {
    pub city: String,
    #[serde(deserialize_with = "deserialize_count")]
    pub nights: u32,
    #[serde(default)]
    pub hotel_name: String,
    #[serde(default, deserialize_with = "deserialize_money")]
    pub hotel_cost_inr: f64,
}

impl CityStay {
    pub fn new(city: impl Into<String>, nights: u32) -> Self {
        Self {
            city: city.into(),
            nights,
            hotel_name: String::new(),
            hotel_cost_inr: 0.0,
        }
    }
}

/// Resolves the city a traveller sleeps in on `day_number` by walking the
/// stays in order and accumulating nights. Days past the last night (the
/// departure day) belong to the final stay.
pub fn city_for_day(day_number: u32, stays: &[CityStay]) -> &str {
    let mut cumulative = 0u32;
    for stay in stays {
        cumulative = cumulative.saturating_add(stay.nights);
        if day_number <= cumulative {
            return &stay.city;
        }
    }
    stays.last().map(|s| s.city.as_str()).unwrap_or(FALLBACK_CITY)
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Quotation {
    pub reference_no: String,
    #[serde(default)]
    pub client_name: String,
    pub country: String,
    pub city_stays: Vec<CityStay>,
    #[serde(default)]
    pub travel_start_date: String,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub number_of_days: u32,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub adults: u32,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub children: u32,
    #[serde(default)]
    pub hotel_name: String,
    #[serde(default, deserialize_with = "deserialize_money")]
    pub hotel_cost_inr: f64,
    #[serde(default)]
    pub selected_tour_ids: Vec<String>,
    #[serde(default)]
    pub selected_transfer_ids: Vec<String>,
    #[serde(default)]
    pub itinerary: Vec<ItineraryDay>,
    #[serde(default, deserialize_with = "deserialize_percent")]
    pub margin_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_email: Option<String>,
}

impl Quotation {
    pub fn total_nights(&self) -> u32 {
        self.city_stays
            .iter()
            .fold(0u32, |total, s| total.saturating_add(s.nights))
    }

    pub fn total_pax(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }

    /// Trip length in days: one more than the nights booked.
    pub fn derived_number_of_days(&self) -> u32 {
        self.total_nights().saturating_add(1)
    }

    pub fn city_for_day(&self, day_number: u32) -> &str {
        city_for_day(day_number, &self.city_stays)
    }

    pub fn day(&self, day_number: u32) -> Option<&ItineraryDay> {
        self.itinerary.iter().find(|d| d.day_number == day_number)
    }

    pub fn day_mut(&mut self, day_number: u32) -> Option<&mut ItineraryDay> {
        self.itinerary.iter_mut().find(|d| d.day_number == day_number)
    }
}

/// A quotation frozen at save time. `total_inr` is the final total when the
/// agent saved it and is never recomputed.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SavedQuotation {
    #[serde(flatten)]
    pub quotation: Quotation,
    pub saved_at: String,
    #[serde(default, deserialize_with = "deserialize_money")]
    pub total_inr: f64,
}

impl SavedQuotation {
    pub fn into_quotation(self) -> Quotation {
        self.quotation
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Default)]
pub struct PriceBreakdown {
    pub tour_cost_inr: f64,
    pub hotel_cost_inr: f64,
    pub subtotal_inr: f64,
    pub margin_amount_inr: f64,
    pub final_total_inr: f64,
}

/// Display figures for a breakdown, rounded to whole rupees.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct PriceSummary {
    pub breakdown: PriceBreakdown,
    pub tour_cost_inr: i64,
    pub hotel_cost_inr: i64,
    pub subtotal_inr: i64,
    pub margin_amount_inr: i64,
    pub final_total_inr: i64,
    pub per_person_inr: i64,
}
