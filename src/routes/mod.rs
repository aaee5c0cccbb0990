use actix_web::web;

use crate::error::QuoteError;

pub mod catalog;
pub mod health;
pub mod quotation;
pub mod saved_quotation;

/// Registers every route. Shared by `main` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| QuoteError::InvalidInput(err.to_string()).into()),
    )
    .route("/health", web::get().to(health::health_check))
    .service(
        web::scope("/api")
            .service(
                web::scope("/catalog")
                    .route("/tours", web::get().to(catalog::get_tours))
                    .route("/tours", web::post().to(catalog::upsert_tour))
                    .route("/tours/{id}", web::delete().to(catalog::delete_tour))
                    .route("/transfers", web::get().to(catalog::get_transfers))
                    .route("/transfers", web::post().to(catalog::upsert_transfer))
                    .route("/transfers/{id}", web::delete().to(catalog::delete_transfer))
                    .route("/countries", web::get().to(catalog::get_countries))
                    .route("/countries", web::post().to(catalog::add_country))
                    .route("/countries/{name}", web::delete().to(catalog::delete_country))
                    .route("/destinations", web::get().to(catalog::get_destinations))
                    .route("/templates", web::get().to(catalog::get_templates)),
            )
            .service(
                web::scope("/quotations")
                    .route("/new", web::post().to(quotation::new_quotation))
                    .route("/edit", web::post().to(quotation::edit_quotation))
                    .route("/breakdown", web::post().to(quotation::get_breakdown))
                    .route("/itinerary", web::post().to(quotation::get_itinerary))
                    .route("/inventory", web::post().to(quotation::get_inventory))
                    .route("/saved", web::get().to(saved_quotation::get_all))
                    .route("/saved", web::post().to(saved_quotation::save))
                    .route(
                        "/saved/{reference_no}",
                        web::get().to(saved_quotation::get_by_reference),
                    )
                    .route(
                        "/saved/{reference_no}",
                        web::delete().to(saved_quotation::delete),
                    ),
            ),
    );
}
