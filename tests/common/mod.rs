use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};
use std::sync::Arc;

use tour_maker_api::config::{Settings, StorageBackend};
use tour_maker_api::db::repository::Repository;
use tour_maker_api::db::store::MemoryStore;
use tour_maker_api::routes;

pub struct TestApp {
    pub repository: web::Data<Repository>,
    pub settings: web::Data<Settings>,
}

impl TestApp {
    pub fn new() -> Self {
        let repository = Repository::new(Arc::new(MemoryStore::new()))
            .expect("bundled catalog should load");
        let settings = Settings {
            storage: StorageBackend::Memory,
            ..Settings::default()
        };

        Self {
            repository: web::Data::new(repository),
            settings: web::Data::new(settings),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.repository.clone())
            .app_data(self.settings.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::configure)
    }
}
