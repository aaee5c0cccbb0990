/// Which day template a narrative is written from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeKind {
    Arrival,
    Departure,
    Transfer,
    Sightseeing,
}

impl NarrativeKind {
    /// Picks the template for a day. Checked in order, so day 1 of a one-day
    /// trip is an arrival.
    pub fn classify(day_number: u32, total_days: u32, city: &str, prev_city: Option<&str>) -> Self {
        if day_number == 1 {
            NarrativeKind::Arrival
        } else if day_number == total_days {
            NarrativeKind::Departure
        } else if prev_city.is_some_and(|prev| prev != city) {
            NarrativeKind::Transfer
        } else {
            NarrativeKind::Sightseeing
        }
    }
}

pub struct NarrativeService;

impl NarrativeService {
    pub fn synthesize(
        day_number: u32,
        total_days: u32,
        country: &str,
        city: &str,
        prev_city: Option<&str>,
    ) -> String {
        match NarrativeKind::classify(day_number, total_days, city, prev_city) {
            NarrativeKind::Arrival => format!(
                "Arrive in {country} and meet our representative at the airport, who will escort you \
                 on a private transfer to your hotel in {city}. Once checked in, the rest of the day \
                 is free to unwind or wander the neighbourhood at your own pace."
            ),
            NarrativeKind::Departure => format!(
                "Have a last breakfast at your hotel in {city} and check out. Use the morning for \
                 some final shopping or a stroll around town before our driver collects you at the \
                 agreed time for your transfer to the airport and the flight home."
            ),
            NarrativeKind::Transfer => {
                let prev = prev_city.unwrap_or_default();
                format!(
                    "Today you move on from {prev} to {city}. After breakfast and check-out, travel \
                     onward by road, ferry or flight to your next stop. On arrival in {city}, check in \
                     to your hotel and settle into your new surroundings with a quiet evening."
                )
            }
            NarrativeKind::Sightseeing => format!(
                "Begin with breakfast at your hotel in {city}, then set out to discover the best of \
                 the city on your scheduled sightseeing. In the evening, browse the local night \
                 markets or enjoy dinner at a traditional restaurant."
            ),
        }
    }
}
