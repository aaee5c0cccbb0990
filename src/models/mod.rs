pub mod catalog;
pub mod itinerary;
pub mod numeric;
pub mod quotation;
