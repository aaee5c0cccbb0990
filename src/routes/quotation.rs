use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::db::repository::Repository;
use crate::error::QuoteError;
use crate::models::quotation::{PriceSummary, Quotation};
use crate::services::catalog_service::CatalogService;
use crate::services::pricing_service::PricingService;
use crate::services::quotation_service::{EditContext, QuotationEdit, QuotationService};

#[derive(Deserialize, Default)]
pub struct NewQuotationRequest {
    #[serde(default)]
    country: Option<String>,
}

#[derive(Deserialize)]
pub struct EditRequest {
    quotation: Quotation,
    edit: QuotationEdit,
}

#[derive(Serialize)]
pub struct EditResponse {
    quotation: Quotation,
    summary: PriceSummary,
}

#[derive(Deserialize)]
pub struct InventoryRequest {
    quotation: Quotation,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    search: Option<String>,
}

/*
    /api/quotations/new
*/
pub async fn new_quotation(
    settings: web::Data<Settings>,
    input: Option<web::Json<NewQuotationRequest>>,
) -> HttpResponse {
    let request = input.map(web::Json::into_inner).unwrap_or_default();
    let country = request
        .country
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| settings.default_country.clone());

    let quotation = QuotationService::new_quotation(
        &country,
        Utc::now().date_naive(),
        settings.default_margin_percent,
        &mut rand::thread_rng(),
    );
    log::info!("Started quotation {}", quotation.reference_no);

    HttpResponse::Ok().json(quotation)
}

/*
    /api/quotations/edit
*/
pub async fn edit_quotation(
    repo: web::Data<Repository>,
    input: web::Json<EditRequest>,
) -> Result<HttpResponse, QuoteError> {
    let EditRequest { quotation, edit } = input.into_inner();
    let catalog = repo.catalog_snapshot().await?;

    let ctx = EditContext {
        catalog: &catalog,
        templates: repo.templates(),
        today: Utc::now().date_naive(),
    };
    let quotation = QuotationService::apply_edit(quotation, edit, &ctx, &mut rand::thread_rng())?;

    let breakdown = PricingService::calculate_breakdown(&quotation, &catalog);
    let summary = PricingService::summarize(breakdown, quotation.total_pax());

    Ok(HttpResponse::Ok().json(EditResponse { quotation, summary }))
}

/*
    /api/quotations/breakdown
*/
pub async fn get_breakdown(
    repo: web::Data<Repository>,
    input: web::Json<Quotation>,
) -> Result<HttpResponse, QuoteError> {
    let catalog = repo.catalog_snapshot().await?;
    let breakdown = PricingService::calculate_breakdown(&input, &catalog);
    Ok(HttpResponse::Ok().json(PricingService::summarize(breakdown, input.total_pax())))
}

/*
    /api/quotations/itinerary
*/
pub async fn get_itinerary(input: web::Json<Quotation>) -> Result<HttpResponse, QuoteError> {
    let mut quotation = input.into_inner();
    QuotationService::refresh_itinerary(&mut quotation)?;
    Ok(HttpResponse::Ok().json(quotation.itinerary))
}

/*
    /api/quotations/inventory
*/
pub async fn get_inventory(
    repo: web::Data<Repository>,
    input: web::Json<InventoryRequest>,
) -> Result<HttpResponse, QuoteError> {
    let catalog = repo.catalog_snapshot().await?;
    let pool = CatalogService::inventory_pool(
        &catalog,
        &input.quotation.country,
        input.city.as_deref(),
        input.search.as_deref(),
    );
    Ok(HttpResponse::Ok().json(pool))
}
