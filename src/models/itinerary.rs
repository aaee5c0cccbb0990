use serde::{Deserialize, Serialize};

use super::numeric::{deserialize_count, deserialize_optional_money};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferType {
    #[default]
    Sharing,
    Private,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct Meals {
    #[serde(default)]
    pub breakfast: bool,
    #[serde(default)]
    pub lunch: bool,
    #[serde(default)]
    pub dinner: bool,
}

impl Meals {
    pub fn breakfast_only() -> Self {
        Self {
            breakfast: true,
            lunch: false,
            dinner: false,
        }
    }

    pub fn toggle(&mut self, meal: Meal) {
        let slot = match meal {
            Meal::Breakfast => &mut self.breakfast,
            Meal::Lunch => &mut self.lunch,
            Meal::Dinner => &mut self.dinner,
        };
        *slot = !*slot;
    }
}

/// A priced line item the agent typed in by hand instead of picking from
/// the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomLineItem {
    pub name: String,
    pub description: Option<String>,
    pub adult_price_inr: Option<f64>,
    pub child_price_inr: Option<f64>,
    pub transfer_type: TransferType,
}

/// Something scheduled on a day: either a catalog product or a custom item.
///
/// Stored data distinguishes the two by which of `tour_id` / `custom_name`
/// is present. When both are present the catalog reference wins.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(try_from = "RawAssignedTour", into = "RawAssignedTour")]
pub enum AssignedTour {
    CatalogReference {
        tour_id: String,
        transfer_type: TransferType,
    },
    CustomLineItem(CustomLineItem),
}

impl AssignedTour {
    pub fn catalog(tour_id: impl Into<String>, transfer_type: TransferType) -> Self {
        AssignedTour::CatalogReference {
            tour_id: tour_id.into(),
            transfer_type,
        }
    }

    pub fn tour_id(&self) -> Option<&str> {
        match self {
            AssignedTour::CatalogReference { tour_id, .. } => Some(tour_id),
            AssignedTour::CustomLineItem(_) => None,
        }
    }

    pub fn transfer_type(&self) -> TransferType {
        match self {
            AssignedTour::CatalogReference { transfer_type, .. } => *transfer_type,
            AssignedTour::CustomLineItem(item) => item.transfer_type,
        }
    }

    pub fn set_transfer_type(&mut self, value: TransferType) {
        match self {
            AssignedTour::CatalogReference { transfer_type, .. } => *transfer_type = value,
            AssignedTour::CustomLineItem(item) => item.transfer_type = value,
        }
    }
}

/// Wire shape of an assigned tour, field-for-field what the UI stores.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
struct RawAssignedTour {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tour_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_description: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_money",
        skip_serializing_if = "Option::is_none"
    )]
    custom_adult_price_inr: Option<f64>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_money",
        skip_serializing_if = "Option::is_none"
    )]
    custom_child_price_inr: Option<f64>,
    #[serde(default)]
    transfer_type: TransferType,
}

impl TryFrom<RawAssignedTour> for AssignedTour {
    type Error = String;

    fn try_from(raw: RawAssignedTour) -> Result<Self, Self::Error> {
        let tour_id = raw.tour_id.filter(|id| !id.is_empty());
        let custom_name = raw.custom_name.filter(|name| !name.is_empty());

        match (tour_id, custom_name) {
            (Some(tour_id), _) => Ok(AssignedTour::CatalogReference {
                tour_id,
                transfer_type: raw.transfer_type,
            }),
            (None, Some(name)) => Ok(AssignedTour::CustomLineItem(CustomLineItem {
                name,
                description: raw.custom_description,
                adult_price_inr: raw.custom_adult_price_inr,
                child_price_inr: raw.custom_child_price_inr,
                transfer_type: raw.transfer_type,
            })),
            (None, None) => Err("assigned tour needs either tour_id or custom_name".to_string()),
        }
    }
}

impl From<AssignedTour> for RawAssignedTour {
    fn from(tour: AssignedTour) -> Self {
        match tour {
            AssignedTour::CatalogReference {
                tour_id,
                transfer_type,
            } => RawAssignedTour {
                tour_id: Some(tour_id),
                transfer_type,
                ..Default::default()
            },
            AssignedTour::CustomLineItem(item) => RawAssignedTour {
                tour_id: None,
                custom_name: Some(item.name),
                custom_description: item.description,
                custom_adult_price_inr: item.adult_price_inr,
                custom_child_price_inr: item.child_price_inr,
                transfer_type: item.transfer_type,
            },
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ItineraryDay {
    #[serde(deserialize_with = "deserialize_count")]
    pub day_number: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub assigned_tours: Vec<AssignedTour>,
    #[serde(default)]
    pub meals: Meals,
    #[serde(default)]
    pub overnight_city: String,
    #[serde(default)]
    pub inclusions: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<String>,
}
