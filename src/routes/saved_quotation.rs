use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::db::repository::Repository;
use crate::error::QuoteError;
use crate::models::quotation::Quotation;
use crate::services::quotation_service::QuotationService;

/*
    /api/quotations/saved
*/
pub async fn get_all(repo: web::Data<Repository>) -> Result<HttpResponse, QuoteError> {
    Ok(HttpResponse::Ok().json(repo.get_saved_quotations().await?))
}

pub async fn save(
    repo: web::Data<Repository>,
    input: web::Json<Quotation>,
) -> Result<HttpResponse, QuoteError> {
    let quotation = input.into_inner();
    if quotation.reference_no.trim().is_empty() {
        return Err(QuoteError::InvalidInput(
            "Quotation needs a reference number to be saved".to_string(),
        ));
    }

    let catalog = repo.catalog_snapshot().await?;
    let saved = QuotationService::snapshot_for_save(&quotation, &catalog, Utc::now());
    repo.save_quotation(saved.clone()).await?;
    log::info!(
        "Saved quotation {} at {:.2} INR",
        saved.quotation.reference_no,
        saved.total_inr
    );

    Ok(HttpResponse::Ok().json(saved))
}

/*
    /api/quotations/saved/{reference_no}
*/
pub async fn get_by_reference(
    repo: web::Data<Repository>,
    path: web::Path<String>,
) -> Result<HttpResponse, QuoteError> {
    let reference_no = path.into_inner();
    match repo.find_saved(&reference_no).await? {
        Some(saved) => Ok(HttpResponse::Ok().json(saved.into_quotation())),
        None => Err(QuoteError::NotFound(format!(
            "Quotation {} not found",
            reference_no
        ))),
    }
}

pub async fn delete(
    repo: web::Data<Repository>,
    path: web::Path<String>,
) -> Result<HttpResponse, QuoteError> {
    let reference_no = path.into_inner();
    if repo.delete_quotation(&reference_no).await? {
        log::info!("Deleted quotation {}", reference_no);
    }
    Ok(HttpResponse::NoContent().finish())
}
