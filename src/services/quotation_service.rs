use chrono::{DateTime, Days, NaiveDate, SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, Result};
use crate::models::catalog::ItineraryTemplate;
use crate::models::itinerary::{AssignedTour, CustomLineItem, ItineraryDay, Meal, TransferType};
use crate::models::numeric::{deserialize_optional_money, sanitize};
use crate::models::quotation::{CityStay, Quotation, SavedQuotation, FALLBACK_CITY};
use crate::services::catalog_service::{Catalog, CatalogService};
use crate::services::itinerary_generation_service::ItineraryGenerator;
use crate::services::pricing_service::PricingService;

const DEFAULT_NIGHTS: u32 = 4;
const DEFAULT_ADULTS: u32 = 2;
const REFERENCE_FALLBACK_CODE: &str = "TRV";
const REFERENCE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const REFERENCE_SUFFIX_LEN: usize = 4;
const NEXT_CITY_PLACEHOLDER: &str = "Next City";
const DATE_FORMAT: &str = "%Y-%m-%d";
const MAX_TRIP_NIGHTS: u32 = 365;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentKind {
    Tour,
    Transfer,
}

/// One change an agent makes to a quotation in the builder.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuotationEdit {
    SetClientName {
        client_name: String,
    },
    SetTravelStartDate {
        travel_start_date: String,
    },
    SetPax {
        adults: u32,
        children: u32,
    },
    SetHotel {
        hotel_name: String,
        #[serde(default, deserialize_with = "deserialize_optional_money")]
        hotel_cost_inr: Option<f64>,
    },
    SetMargin {
        margin_percent: f64,
    },
    SetCountry {
        country: String,
        #[serde(default)]
        first_city: Option<String>,
    },
    UpdateCityStay {
        index: usize,
        #[serde(default)]
        city: Option<String>,
        #[serde(default)]
        nights: Option<u32>,
        #[serde(default)]
        hotel_name: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_money")]
        hotel_cost_inr: Option<f64>,
    },
    AddCityStay {
        #[serde(default)]
        city: Option<String>,
    },
    RemoveCityStay {
        index: usize,
    },
    ToggleTour {
        id: String,
    },
    ToggleTransfer {
        id: String,
    },
    AssignCatalogItem {
        day_number: u32,
        id: String,
        kind: AssignmentKind,
    },
    AddCustomItem {
        day_number: u32,
        name: String,
        #[serde(default)]
        description: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_money")]
        adult_price_inr: Option<f64>,
        #[serde(default, deserialize_with = "deserialize_optional_money")]
        child_price_inr: Option<f64>,
        #[serde(default = "private_transfer")]
        transfer_type: TransferType,
    },
    RemoveAssignment {
        day_number: u32,
        index: usize,
    },
    SetTransferType {
        day_number: u32,
        index: usize,
        transfer_type: TransferType,
    },
    ToggleMeal {
        day_number: u32,
        meal: Meal,
    },
    AddInclusion {
        day_number: u32,
        value: String,
    },
    AddExclusion {
        day_number: u32,
        value: String,
    },
    RemoveInclusion {
        day_number: u32,
        value: String,
    },
    RemoveExclusion {
        day_number: u32,
        value: String,
    },
    UpdateDayText {
        day_number: u32,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        description: Option<String>,
    },
    ApplyTemplate {
        template_id: String,
    },
}

/// What an edit may consult besides the quotation itself.
pub struct EditContext<'a, C: Catalog> {
    pub catalog: &'a C,
    pub templates: &'a [ItineraryTemplate],
    pub today: NaiveDate,
}

pub struct QuotationService;

impl QuotationService {
    /// `{CODE}-{YYYYMMDD}-{XXXX}` where CODE is the first three letters of the
    /// country and XXXX is random base36.
    pub fn generate_reference(country: &str, today: NaiveDate, rng: &mut impl Rng) -> String {
        let country = country.trim();
        let code: String = if country.is_empty() {
            REFERENCE_FALLBACK_CODE.to_string()
        } else {
            country.chars().take(3).collect::<String>().to_uppercase()
        };

        let suffix: String = (0..REFERENCE_SUFFIX_LEN)
            .map(|_| REFERENCE_ALPHABET[rng.gen_range(0..REFERENCE_ALPHABET.len())] as char)
            .collect();

        format!("{}-{}-{}", code, today.format("%Y%m%d"), suffix)
    }

    pub fn default_city_for(country: &str) -> &'static str {
        match country {
            "Thailand" => "Bangkok",
            "UAE" => "Dubai",
            "Vietnam" => "Hanoi",
            c if c.contains("Goa") => "Goa",
            _ => FALLBACK_CITY,
        }
    }

    pub fn new_quotation(
        country: &str,
        today: NaiveDate,
        margin_percent: f64,
        rng: &mut impl Rng,
    ) -> Quotation {
        let mut quotation = Quotation {
            reference_no: Self::generate_reference(country, today, rng),
            client_name: String::new(),
            country: country.to_string(),
            city_stays: vec![CityStay::new(Self::default_city_for(country), DEFAULT_NIGHTS)],
            travel_start_date: today.format(DATE_FORMAT).to_string(),
            number_of_days: 0,
            adults: DEFAULT_ADULTS,
            children: 0,
            hotel_name: String::new(),
            hotel_cost_inr: 0.0,
            selected_tour_ids: vec![],
            selected_transfer_ids: vec![],
            itinerary: vec![],
            margin_percent: sanitize(margin_percent).min(100.0),
            agent_email: None,
        };
        ItineraryGenerator::reconcile(&mut quotation);
        quotation
    }

    /// Applies one edit and restores the day-count and itinerary invariants.
    pub fn apply_edit<C: Catalog>(
        mut quotation: Quotation,
        edit: QuotationEdit,
        ctx: &EditContext<'_, C>,
        rng: &mut impl Rng,
    ) -> Result<Quotation> {
        let mut stays_changed = false;

        match edit {
            QuotationEdit::SetClientName { client_name } => quotation.client_name = client_name,
            QuotationEdit::SetTravelStartDate { travel_start_date } => {
                NaiveDate::parse_from_str(&travel_start_date, DATE_FORMAT).map_err(|e| {
                    QuoteError::InvalidInput(format!(
                        "travel_start_date '{}' is not a YYYY-MM-DD date: {}",
                        travel_start_date, e
                    ))
                })?;
                quotation.travel_start_date = travel_start_date;
            }
            QuotationEdit::SetPax { adults, children } => {
                quotation.adults = adults.max(1);
                quotation.children = children;
            }
            QuotationEdit::SetHotel {
                hotel_name,
                hotel_cost_inr,
            } => {
                quotation.hotel_name = hotel_name;
                quotation.hotel_cost_inr = hotel_cost_inr.map(sanitize).unwrap_or(0.0);
            }
            QuotationEdit::SetMargin { margin_percent } => {
                quotation.margin_percent = sanitize(margin_percent).min(100.0);
            }
            QuotationEdit::SetCountry {
                country,
                first_city,
            } => {
                let city = first_city
                    .filter(|c| !c.trim().is_empty())
                    .or_else(|| CatalogService::first_city(ctx.catalog, &country))
                    .unwrap_or_else(|| FALLBACK_CITY.to_string());

                if quotation.client_name.is_empty() && quotation.selected_tour_ids.is_empty() {
                    quotation.reference_no = Self::generate_reference(&country, ctx.today, rng);
                }
                quotation.country = country;
                quotation.city_stays = vec![CityStay::new(city, DEFAULT_NIGHTS)];
                quotation.itinerary.clear();
                stays_changed = true;
            }
            QuotationEdit::UpdateCityStay {
                index,
                city,
                nights,
                hotel_name,
                hotel_cost_inr,
            } => {
                let stay = quotation
                    .city_stays
                    .get_mut(index)
                    .ok_or_else(|| QuoteError::InvalidInput(format!("No city stay at index {}", index)))?;
                if let Some(city) = city {
                    stay.city = city;
                }
                if let Some(nights) = nights {
                    stay.nights = nights.max(1);
                }
                if let Some(hotel_name) = hotel_name {
                    stay.hotel_name = hotel_name;
                }
                if let Some(cost) = hotel_cost_inr {
                    stay.hotel_cost_inr = sanitize(cost);
                }
                stays_changed = true;
            }
            QuotationEdit::AddCityStay { city } => {
                let city = city
                    .filter(|c| !c.trim().is_empty())
                    .unwrap_or_else(|| Self::next_unused_city(&quotation, ctx.catalog));
                quotation.city_stays.push(CityStay::new(city, 1));
                stays_changed = true;
            }
            QuotationEdit::RemoveCityStay { index } => {
                if index >= quotation.city_stays.len() {
                    return Err(QuoteError::InvalidInput(format!("No city stay at index {}", index)));
                }
                if quotation.city_stays.len() > 1 {
                    quotation.city_stays.remove(index);
                    stays_changed = true;
                }
            }
            QuotationEdit::ToggleTour { id } => toggle(&mut quotation.selected_tour_ids, id),
            QuotationEdit::ToggleTransfer { id } => toggle(&mut quotation.selected_transfer_ids, id),
            QuotationEdit::AssignCatalogItem { day_number, id, kind } => {
                let selection = match kind {
                    AssignmentKind::Tour => &mut quotation.selected_tour_ids,
                    AssignmentKind::Transfer => &mut quotation.selected_transfer_ids,
                };
                if !selection.contains(&id) {
                    selection.push(id.clone());
                }
                day_mut(&mut quotation, day_number)?
                    .assigned_tours
                    .push(AssignedTour::catalog(id, TransferType::Sharing));
            }
            QuotationEdit::AddCustomItem {
                day_number,
                name,
                description,
                adult_price_inr,
                child_price_inr,
                transfer_type,
            } => {
                if name.trim().is_empty() {
                    return Err(QuoteError::InvalidInput("Custom item needs a name".to_string()));
                }
                day_mut(&mut quotation, day_number)?
                    .assigned_tours
                    .push(AssignedTour::CustomLineItem(CustomLineItem {
                        name,
                        description,
                        adult_price_inr,
                        child_price_inr,
                        transfer_type,
                    }));
            }
            QuotationEdit::RemoveAssignment { day_number, index } => {
                let day = day_mut(&mut quotation, day_number)?;
                if index >= day.assigned_tours.len() {
                    return Err(QuoteError::InvalidInput(format!(
                        "Day {} has no assignment at index {}",
                        day_number, index
                    )));
                }
                day.assigned_tours.remove(index);
            }
            QuotationEdit::SetTransferType {
                day_number,
                index,
                transfer_type,
            } => {
                day_mut(&mut quotation, day_number)?
                    .assigned_tours
                    .get_mut(index)
                    .ok_or_else(|| {
                        QuoteError::InvalidInput(format!(
                            "Day {} has no assignment at index {}",
                            day_number, index
                        ))
                    })?
                    .set_transfer_type(transfer_type);
            }
            QuotationEdit::ToggleMeal { day_number, meal } => {
                day_mut(&mut quotation, day_number)?.meals.toggle(meal);
            }
            QuotationEdit::AddInclusion { day_number, value } => {
                add_tag(&mut day_mut(&mut quotation, day_number)?.inclusions, value);
            }
            QuotationEdit::AddExclusion { day_number, value } => {
                add_tag(&mut day_mut(&mut quotation, day_number)?.exclusions, value);
            }
            QuotationEdit::RemoveInclusion { day_number, value } => {
                day_mut(&mut quotation, day_number)?.inclusions.retain(|v| *v != value);
            }
            QuotationEdit::RemoveExclusion { day_number, value } => {
                day_mut(&mut quotation, day_number)?.exclusions.retain(|v| *v != value);
            }
            QuotationEdit::UpdateDayText {
                day_number,
                title,
                description,
            } => {
                let day = day_mut(&mut quotation, day_number)?;
                if let Some(title) = title {
                    day.title = title;
                }
                if let Some(description) = description {
                    day.description = description;
                }
            }
            QuotationEdit::ApplyTemplate { template_id } => {
                let template = ctx
                    .templates
                    .iter()
                    .find(|t| t.id == template_id)
                    .ok_or_else(|| QuoteError::NotFound(format!("Template {} not found", template_id)))?;

                quotation.country = template.country.clone();
                quotation.city_stays = template.city_stays.clone();
                quotation.selected_tour_ids = template.tour_ids.clone();
                quotation.selected_transfer_ids = template.transfer_ids.clone();
                quotation.itinerary.clear();
                stays_changed = true;
            }
        }

        Self::check_trip_length(&quotation)?;
        Self::settle(&mut quotation, stays_changed);
        Ok(quotation)
    }

    pub fn check_trip_length(quotation: &Quotation) -> Result<()> {
        let nights = quotation.total_nights();
        if nights > MAX_TRIP_NIGHTS {
            return Err(QuoteError::InvalidInput(format!(
                "Trip of {} nights exceeds the {} night limit",
                nights, MAX_TRIP_NIGHTS
            )));
        }
        Ok(())
    }

    /// Rebuilds the itinerary of a quotation received as a whole, with the
    /// same clamping an edit applies.
    pub fn refresh_itinerary(quotation: &mut Quotation) -> Result<()> {
        Self::check_trip_length(quotation)?;
        Self::settle(quotation, true);
        Ok(())
    }

    /// Every stay change re-derives the trip length. Anything else only
    /// regenerates when the itinerary has drifted.
    fn settle(quotation: &mut Quotation, stays_changed: bool) {
        for stay in &mut quotation.city_stays {
            stay.nights = stay.nights.max(1);
        }
        if stays_changed || quotation.number_of_days != quotation.derived_number_of_days() {
            ItineraryGenerator::reconcile(quotation);
        } else {
            ItineraryGenerator::sync(quotation);
        }
    }

    fn next_unused_city(quotation: &Quotation, catalog: &impl Catalog) -> String {
        let destinations = CatalogService::destinations(&[], catalog);
        destinations
            .cities_by_country
            .get(&quotation.country)
            .and_then(|cities| {
                cities
                    .iter()
                    .find(|c| !quotation.city_stays.iter().any(|s| &s.city == *c))
                    .cloned()
            })
            .unwrap_or_else(|| NEXT_CITY_PLACEHOLDER.to_string())
    }

    /// Calendar date of a day, counted from the travel start date.
    pub fn day_date(quotation: &Quotation, day_number: u32) -> Option<NaiveDate> {
        let start = NaiveDate::parse_from_str(&quotation.travel_start_date, DATE_FORMAT).ok()?;
        start.checked_add_days(Days::new(u64::from(day_number.checked_sub(1)?)))
    }

    /// Freezes the current final total onto a copy of the quotation.
    pub fn snapshot_for_save(
        quotation: &Quotation,
        catalog: &impl Catalog,
        now: DateTime<Utc>,
    ) -> SavedQuotation {
        let breakdown = PricingService::calculate_breakdown(quotation, catalog);
        SavedQuotation {
            quotation: quotation.clone(),
            saved_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            total_inr: breakdown.final_total_inr,
        }
    }
}

fn private_transfer() -> TransferType {
    TransferType::Private
}

fn day_mut(quotation: &mut Quotation, day_number: u32) -> Result<&mut ItineraryDay> {
    quotation
        .day_mut(day_number)
        .ok_or_else(|| QuoteError::InvalidInput(format!("Day {} is not part of this itinerary", day_number)))
}

fn toggle(ids: &mut Vec<String>, id: String) {
    match ids.iter().position(|existing| *existing == id) {
        Some(pos) => {
            ids.remove(pos);
        }
        None => ids.push(id),
    }
}

fn add_tag(tags: &mut Vec<String>, value: String) {
    let value = value.trim();
    if value.is_empty() || tags.iter().any(|t| t == value) {
        return;
    }
    tags.push(value.to_string());
}
