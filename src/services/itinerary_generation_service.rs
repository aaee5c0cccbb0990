use crate::models::itinerary::{ItineraryDay, Meals};
use crate::models::quotation::Quotation;
use crate::services::narrative_service::NarrativeService;

const ARRIVAL_TITLE: &str = "Arrival";
const DEPARTURE_TITLE: &str = "Departure";
const LEISURE_TITLE: &str = "Leisure & Exploration";

/// Keeps a quotation's day-by-day itinerary in step with its trip length and
/// city stays.
pub struct ItineraryGenerator;

impl ItineraryGenerator {
    /// Title given to a day the agent has not seen before.
    pub fn default_title(day_number: u32, total_days: u32, city: &str, prev_city: Option<&str>) -> String {
        if day_number == 1 {
            ARRIVAL_TITLE.to_string()
        } else if day_number == total_days {
            DEPARTURE_TITLE.to_string()
        } else {
            match prev_city {
                Some(prev) if prev != city => format!("Transfer: {} to {}", prev, city),
                _ => LEISURE_TITLE.to_string(),
            }
        }
    }

    /// Builds the itinerary for days `1..=number_of_days` from the current one.
    ///
    /// Existing days keep their edits. Their overnight city is always
    /// refreshed, and their description is rewritten only when that city
    /// moved. Days past the new trip length are dropped.
    pub fn regenerate(quotation: &Quotation) -> Vec<ItineraryDay> {
        let total_days = quotation.number_of_days;

        (1..=total_days)
            .map(|day_number| {
                let city = quotation.city_for_day(day_number);
                let prev_city = (day_number > 1).then(|| quotation.city_for_day(day_number - 1));

                match quotation.day(day_number) {
                    Some(existing) => {
                        let mut day = existing.clone();
                        if day.overnight_city != city {
                            day.description = NarrativeService::synthesize(
                                day_number,
                                total_days,
                                &quotation.country,
                                city,
                                prev_city,
                            );
                        }
                        day.overnight_city = city.to_string();
                        day
                    }
                    None => ItineraryDay {
                        day_number,
                        title: Self::default_title(day_number, total_days, city, prev_city),
                        description: NarrativeService::synthesize(
                            day_number,
                            total_days,
                            &quotation.country,
                            city,
                            prev_city,
                        ),
                        assigned_tours: vec![],
                        meals: Meals::breakfast_only(),
                        overnight_city: city.to_string(),
                        inclusions: vec![],
                        exclusions: vec![],
                    },
                }
            })
            .collect()
    }

    /// An itinerary already holding exactly `number_of_days` entries is left
    /// alone.
    pub fn needs_regeneration(quotation: &Quotation) -> bool {
        quotation.itinerary.is_empty() || quotation.itinerary.len() != quotation.number_of_days as usize
    }

    /// Regenerates only when the itinerary length is out of step. Returns
    /// whether anything ran.
    pub fn sync(quotation: &mut Quotation) -> bool {
        if !Self::needs_regeneration(quotation) {
            return false;
        }
        quotation.itinerary = Self::regenerate(quotation);
        true
    }

    /// Re-derives the trip length from the city stays and rebuilds the
    /// itinerary. Every change to the city stays goes through here.
    pub fn reconcile(quotation: &mut Quotation) {
        quotation.number_of_days = quotation.derived_number_of_days();
        quotation.itinerary = Self::regenerate(quotation);
        log::debug!(
            "Reconciled {} to {} days across {} city stays",
            quotation.reference_no,
            quotation.number_of_days,
            quotation.city_stays.len()
        );
    }
}
