use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use lesson_widgets::{
    app_state::AppState,
    config::Config,
    graphql::{create_schema, graphiql, graphql_handler},
    handlers,
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let state = AppState::new(config.clone());
    let schema = create_schema(state.clone());
    let state = Arc::new(state);

    log::info!(
        "starting HTTP server on {}:{}",
        config.web_server_host,
        config.web_server_port
    );
    log::info!(
        "GraphiQL playground: http://{}:{}/graphiql",
        config.web_server_host,
        config.web_server_port
    );

    let cors_origin = config.cors_allowed_origin.clone();
    HttpServer::new(move || {
        let cors = match &cors_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header(),
            None => Cors::permissive(),
        };

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(schema.clone()))
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .wrap(cors)
            .configure(handlers::configure)
            .route("/graphql", web::post().to(graphql_handler))
            .route("/graphiql", web::get().to(graphiql))
    })
    .bind((config.web_server_host.as_str(), config.web_server_port))?
    .run()
    .await
}
