use std::io;

use actix_web::{web, App, HttpServer};
use decree_backend::config::AppConfig;
use decree_backend::document::{
    DecreeTemplate, DirectoryTemplates, DocumentAssembler, EmbeddedTemplates, TemplateSource,
    SK_TIM_TEMPLATE,
};
use decree_backend::services;
use decree_backend::state::AppState;
use env_logger::Env;
use log::{error, info};

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let source: Box<dyn TemplateSource> = match &config.template_dir {
        Some(dir) => {
            let templates = DirectoryTemplates::new(dir);
            info!("Loading templates from {}", templates.root().display());
            Box::new(templates)
        }
        None => {
            info!("Using embedded templates: {}", EmbeddedTemplates.ids().join(", "));
            Box::new(EmbeddedTemplates)
        }
    };
    let template = DecreeTemplate::preload(source.as_ref(), SK_TIM_TEMPLATE).map_err(|e| {
        error!("{}", e);
        io::Error::other(e)
    })?;
    let state = AppState {
        assembler: DocumentAssembler::new(template),
    };

    info!("Server running at {}", config.url());

    let json_limit = config.json_limit;
    HttpServer::new(move || {
        App::new()
            .app_data(services::json_config(json_limit))
            .app_data(web::Data::new(state.clone()))
            .configure(services::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
