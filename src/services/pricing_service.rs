use crate::models::catalog::{PricingMode, TourItem};
use crate::models::itinerary::{AssignedTour, TransferType};
use crate::models::numeric::sanitize;
use crate::models::quotation::{PriceBreakdown, PriceSummary, Quotation};
use crate::services::catalog_service::Catalog;

/// Travellers covered by the base price of a tiered product.
const TIERED_BASE_PAX: u32 = 4;
/// Charge for each traveller beyond the tiered base.
const TIERED_EXTRA_PAX_INR: f64 = 500.0;

pub struct PricingService;

impl PricingService {
    /// Full net-to-gross breakdown for a quotation. Never fails: products
    /// missing from the catalog cost nothing.
    pub fn calculate_breakdown(quotation: &Quotation, catalog: &impl Catalog) -> PriceBreakdown {
        let tour_cost = Self::calculate_tour_cost(quotation, catalog)
            + Self::calculate_transfer_cost(quotation, catalog)
            + Self::calculate_custom_cost(quotation);
        let hotel_cost = Self::calculate_hotel_cost(quotation);

        let subtotal = tour_cost + hotel_cost;
        let margin_percent = sanitize(quotation.margin_percent);
        let margin_amount = subtotal * (margin_percent / 100.0);

        PriceBreakdown {
            tour_cost_inr: tour_cost,
            hotel_cost_inr: hotel_cost,
            subtotal_inr: subtotal,
            margin_amount_inr: margin_amount,
            final_total_inr: subtotal + margin_amount,
        }
    }

    /// Quotation-level hotel cost plus every city stay's hotel cost.
    pub fn calculate_hotel_cost(quotation: &Quotation) -> f64 {
        sanitize(quotation.hotel_cost_inr)
            + quotation
                .city_stays
                .iter()
                .map(|stay| sanitize(stay.hotel_cost_inr))
                .sum::<f64>()
    }

    /// Sum of every selected catalog tour.
    pub fn calculate_tour_cost(quotation: &Quotation, catalog: &impl Catalog) -> f64 {
        quotation
            .selected_tour_ids
            .iter()
            .filter_map(|id| match catalog.find_tour(id) {
                Some(tour) => Some(tour),
                None => {
                    log::debug!("Selected tour {} is not in the catalog, pricing it at zero", id);
                    None
                }
            })
            .map(|tour| {
                let transfer_type = Self::resolve_transfer_type(quotation, tour);
                Self::calculate_component_cost(tour, transfer_type, quotation.adults, quotation.children)
            })
            .sum()
    }

    /// Flat vehicle rates of the selected logistics transfers.
    pub fn calculate_transfer_cost(quotation: &Quotation, catalog: &impl Catalog) -> f64 {
        quotation
            .selected_transfer_ids
            .iter()
            .filter_map(|id| match catalog.find_transfer(id) {
                Some(transfer) => Some(sanitize(transfer.price_inr)),
                None => {
                    log::debug!("Selected transfer {} is not in the catalog, pricing it at zero", id);
                    None
                }
            })
            .sum()
    }

    /// Custom line items on itinerary days. These are priced independently of
    /// the catalog selections, so nothing is de-duplicated against them.
    pub fn calculate_custom_cost(quotation: &Quotation) -> f64 {
        let adults = quotation.adults as f64;
        let children = quotation.children as f64;

        quotation
            .itinerary
            .iter()
            .flat_map(|day| day.assigned_tours.iter())
            .filter_map(|assigned| match assigned {
                AssignedTour::CustomLineItem(item)
                    if item.adult_price_inr.is_some() || item.child_price_inr.is_some() =>
                {
                    Some(item)
                }
                _ => None,
            })
            .map(|item| {
                let adult_price = item.adult_price_inr.map(sanitize).unwrap_or(0.0);
                let child_price = item.child_price_inr.map(sanitize).unwrap_or(0.0);
                adult_price * adults + child_price * children
            })
            .sum()
    }

    /// The transfer type the first itinerary assignment of `tour` asks for,
    /// Sharing when unassigned. Sharing-only products are always Sharing.
    pub fn resolve_transfer_type(quotation: &Quotation, tour: &TourItem) -> TransferType {
        if tour.is_sharing_only {
            return TransferType::Sharing;
        }

        quotation
            .itinerary
            .iter()
            .flat_map(|day| day.assigned_tours.iter())
            .find(|assigned| assigned.tour_id() == Some(tour.id.as_str()))
            .map(AssignedTour::transfer_type)
            .unwrap_or_default()
    }

    /// Explicit mode when the catalog sets one; otherwise airport products and
    /// Goa private products are tiered.
    pub fn pricing_mode(tour: &TourItem) -> PricingMode {
        if let Some(mode) = tour.pricing_mode {
            return mode;
        }

        let name = tour.name.to_lowercase();
        let tiered = name.contains("airport")
            || (tour.city.eq_ignore_ascii_case("goa") && name.contains("pvt"));

        if tiered {
            PricingMode::TieredBySize
        } else {
            PricingMode::Standard
        }
    }

    pub fn calculate_component_cost(
        tour: &TourItem,
        transfer_type: TransferType,
        adults: u32,
        children: u32,
    ) -> f64 {
        let total_pax = adults.saturating_add(children);

        match Self::pricing_mode(tour) {
            PricingMode::TieredBySize => {
                let extra_pax = total_pax.saturating_sub(TIERED_BASE_PAX) as f64;
                sanitize(tour.adult_price_inr) + extra_pax * TIERED_EXTRA_PAX_INR
            }
            PricingMode::Standard => {
                let entrance = sanitize(tour.adult_price_inr) * adults as f64
                    + sanitize(tour.child_price_inr) * children as f64;
                let surcharge = match transfer_type {
                    TransferType::Sharing => {
                        sanitize(tour.sharing_transfer_price_inr) * total_pax as f64
                    }
                    TransferType::Private => sanitize(tour.private_transfer_price_inr),
                };
                entrance + surcharge
            }
        }
    }

    /// Whole-rupee figures for display. Rounding happens only here.
    pub fn summarize(breakdown: PriceBreakdown, total_pax: u32) -> PriceSummary {
        let round = |value: f64| sanitize(value).round() as i64;
        let final_total = round(breakdown.final_total_inr);
        let per_person = if total_pax == 0 {
            0
        } else {
            (final_total as f64 / total_pax as f64).round() as i64
        };

        PriceSummary {
            breakdown,
            tour_cost_inr: round(breakdown.tour_cost_inr),
            hotel_cost_inr: round(breakdown.hotel_cost_inr),
            subtotal_inr: round(breakdown.subtotal_inr),
            margin_amount_inr: round(breakdown.margin_amount_inr),
            final_total_inr: final_total,
            per_person_inr: per_person,
        }
    }
}
