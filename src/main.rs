use actix_cors::Cors;
use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use std::sync::Arc;

use hrms_lite::config::Config;
use hrms_lite::db::Store;
use hrms_lite::docs::ApiDoc;
use hrms_lite::error::json_error_handler;
use hrms_lite::routes;

use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let store = Data::new(Store::connect(&config).await?);
    info!(database = %config.database_name, "connected to document store, indexes ensured");

    let store_for_app = store.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .wrap(Cors::permissive())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(store_for_app.clone())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .configure(routes::configure)
    })
    .bind(config.server_addr)?
    .run()
    .await?;

    info!("Server stopped, releasing store connection");
    if let Ok(store) = Arc::try_unwrap(store.into_inner()) {
        store.close().await;
    }

    Ok(())
}
