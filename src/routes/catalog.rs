use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::db::repository::Repository;
use crate::error::QuoteError;
use crate::models::catalog::{TourItem, TransferItem};
use crate::services::catalog_service::CatalogService;

#[derive(Deserialize)]
pub struct CountryInput {
    name: String,
}

/*
    /api/catalog/tours
*/
pub async fn get_tours(repo: web::Data<Repository>) -> Result<HttpResponse, QuoteError> {
    Ok(HttpResponse::Ok().json(repo.get_tours().await?))
}

pub async fn upsert_tour(
    repo: web::Data<Repository>,
    input: web::Json<TourItem>,
) -> Result<HttpResponse, QuoteError> {
    let tour = input.into_inner();
    if tour.name.trim().is_empty() || tour.country.trim().is_empty() {
        return Err(QuoteError::InvalidInput("Tour needs a name and a country".to_string()));
    }
    let stored = repo.upsert_tour(tour).await?;
    log::info!("Stored tour {}", stored.id);
    Ok(HttpResponse::Ok().json(stored))
}

pub async fn delete_tour(
    repo: web::Data<Repository>,
    path: web::Path<String>,
) -> Result<HttpResponse, QuoteError> {
    let id = path.into_inner();
    if repo.delete_tour(&id).await? {
        log::info!("Deleted tour {}", id);
    }
    Ok(HttpResponse::NoContent().finish())
}

/*
    /api/catalog/transfers
*/
pub async fn get_transfers(repo: web::Data<Repository>) -> Result<HttpResponse, QuoteError> {
    Ok(HttpResponse::Ok().json(repo.get_transfers().await?))
}

pub async fn upsert_transfer(
    repo: web::Data<Repository>,
    input: web::Json<TransferItem>,
) -> Result<HttpResponse, QuoteError> {
    let transfer = input.into_inner();
    if transfer.route.trim().is_empty() || transfer.country.trim().is_empty() {
        return Err(QuoteError::InvalidInput(
            "Transfer needs a route and a country".to_string(),
        ));
    }
    let stored = repo.upsert_transfer(transfer).await?;
    log::info!("Stored transfer {}", stored.id);
    Ok(HttpResponse::Ok().json(stored))
}

pub async fn delete_transfer(
    repo: web::Data<Repository>,
    path: web::Path<String>,
) -> Result<HttpResponse, QuoteError> {
    let id = path.into_inner();
    if repo.delete_transfer(&id).await? {
        log::info!("Deleted transfer {}", id);
    }
    Ok(HttpResponse::NoContent().finish())
}

/*
    /api/catalog/countries
*/
pub async fn get_countries(repo: web::Data<Repository>) -> Result<HttpResponse, QuoteError> {
    Ok(HttpResponse::Ok().json(repo.get_countries().await?))
}

pub async fn add_country(
    repo: web::Data<Repository>,
    input: web::Json<CountryInput>,
) -> Result<HttpResponse, QuoteError> {
    Ok(HttpResponse::Ok().json(repo.add_country(&input.name).await?))
}

pub async fn delete_country(
    repo: web::Data<Repository>,
    path: web::Path<String>,
) -> Result<HttpResponse, QuoteError> {
    Ok(HttpResponse::Ok().json(repo.delete_country(&path.into_inner()).await?))
}

pub async fn get_destinations(repo: web::Data<Repository>) -> Result<HttpResponse, QuoteError> {
    let countries = repo.get_countries().await?;
    let catalog = repo.catalog_snapshot().await?;
    Ok(HttpResponse::Ok().json(CatalogService::destinations(&countries, &catalog)))
}

pub async fn get_templates(repo: web::Data<Repository>) -> HttpResponse {
    HttpResponse::Ok().json(repo.templates())
}
