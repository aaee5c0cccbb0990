pub mod catalog_service;
pub mod itinerary_generation_service;
pub mod narrative_service;
pub mod pricing_service;
pub mod quotation_service;
