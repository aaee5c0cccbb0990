use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use tour_maker_api::config::Settings;
use tour_maker_api::db::{self, repository::Repository};
use tour_maker_api::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let settings = Settings::from_env().map_err(std::io::Error::other)?;
    log::info!("Using {:?} storage", settings.storage);

    let store = db::connect(&settings.storage)
        .await
        .map_err(std::io::Error::other)?;
    let repository = web::Data::new(Repository::new(store).map_err(std::io::Error::other)?);
    let settings_data = web::Data::new(settings.clone());

    log::info!("Starting HTTP server on {}:{}", settings.host, settings.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(repository.clone())
            .app_data(settings_data.clone())
            .configure(routes::configure)
    })
    .bind((settings.host.clone(), settings.port))?
    .run()
    .await
}
