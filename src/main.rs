use actix_web::{middleware, web, App, HttpServer};
use log::info;

use cartoonise_worker::handlers::{cartoonise, selftest, status};
use cartoonise_worker::{CartooniserAdapter, Options};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_logger();

    let config = Config::from_env();

    info!("Initializing Cartoonise Worker");
    info!("Server configuration: {:?}", config);

    let adapter = web::Data::new(initialize_adapter()?);
    let app_adapter = adapter.clone();

    info!("Starting server on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(app_adapter.clone())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::DefaultHeaders::new().add(("X-Version", env!("CARGO_PKG_VERSION"))))
            .service(
                web::scope("/api/v1")
                    .route("/health", web::get().to(health_check))
                    .route("/cartoonise", web::post().to(cartoonise))
                    .route("/status", web::get().to(status))
                    .route("/selftest", web::post().to(selftest)),
            )
            .route("/health", web::get().to(health_check))
            .route("/cartoonise", web::post().to(cartoonise))
            .route("/status", web::get().to(status))
            .route("/selftest", web::post().to(selftest))
    })
    .bind((config.host.as_str(), config.port))?
    .workers(config.workers)
    .run()
    .await?;

    adapter.cleanup();
    Ok(())
}

fn initialize_adapter() -> std::io::Result<CartooniserAdapter> {
    let options = Options::from_env().map_err(|e| {
        log::error!("Invalid worker options: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    Ok(CartooniserAdapter::new(options))
}

async fn health_check() -> actix_web::Result<impl actix_web::Responder> {
    let health_status = HealthStatus {
        status: "healthy".to_string(),
        service: "cartoonise-worker".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        features: vec!["cartoonise".to_string(), "status".to_string(), "selftest".to_string()],
    };

    Ok(web::Json(health_status))
}

#[derive(serde::Serialize)]
struct HealthStatus {
    status: String,
    service: String,
    version: String,
    features: Vec<String>,
}

#[derive(Debug)]
struct Config {
    host: String,
    port: u16,
    workers: usize,
}

impl Config {
    fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            workers: std::env::var("WORKERS")
                .ok()
                .and_then(|w| w.parse().ok())
                .unwrap_or_else(num_cpus::get),
        }
    }
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
}
