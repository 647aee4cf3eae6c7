use std::sync::Arc;

use tokio::net::TcpListener;

use flatwiki::logger::Logger;
use flatwiki::{app, AppState, Config, PageStore, Templates, WikiError};

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    if let Err(e) = Logger::init() {
        eprintln!("failed to install logger: {}", e);
    }

    let config = Config::from_env()?;
    log::debug!("Configuration: {:?}", config);

    let store = PageStore::open(config.data_dir.clone())?;
    let templates = Templates::load(&config.template_dir)?;
    let state = AppState {
        store: Arc::new(store),
        templates: Arc::new(templates),
        front_page: config.front_page_title()?,
    };

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    log::info!("Wiki listening on http://{}, pages in {:?}", addr, config.data_dir);
    axum::serve(listener, app(state)).await.map_err(WikiError::from)
}
