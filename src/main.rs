use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use sitegen::api::{AppState, configure_routes};
use sitegen::{banner, config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Print the startup banner
    banner::print_banner();

    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  Warning: Could not load .env file: {}", e);
        eprintln!("   Provider credentials must be set in the environment");
    }

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let app_config = match config::AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let state = match AppState::from_config(&app_config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("❌ Failed to initialise providers: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "✅ Providers in fallback order: {}",
        state.orchestrator.registry().names().join(" → ")
    );
    println!(
        "🛡️  Rate limit: {} points per {}s",
        app_config.rate_limit.max_points, app_config.rate_limit.window_secs
    );
    println!("🚀 Starting server on http://{}:{}", app_config.server.host, app_config.server.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    })
    .bind((app_config.server.host.as_str(), app_config.server.port))?
    .run()
    .await
}
