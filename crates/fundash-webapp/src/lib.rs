/// HTTP routes of the dashboard.
pub mod handlers;

/// A minimal display tree, serialized to HTML.
pub mod markup;

/// Trigger handling: resolve, parse and render the three sections of a symbol.
pub mod pipeline;

/// Turns parsed [`Table`](fundash_spider::Table)s into markup.
pub mod render;

use actix_web::{middleware::Logger, web, App, HttpServer};
use fundash_spider::Spider;
use tera::Tera;
use tracing::info;

/// Application state shared by every worker.
pub struct Dashboard {
    pub spider: Spider,
    pub tera: Tera,
}

impl Dashboard {
    pub fn new(spider: Spider) -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template("index.html", include_str!("../templates/index.html"))?;
        Ok(Self { spider, tera })
    }
}

/// Register the dashboard routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::index).service(handlers::analyze);
}

/// Serve the dashboard on `addr` until shutdown.
pub async fn serve(dashboard: Dashboard, addr: &str) -> std::io::Result<()> {
    info!(
        "serving on http://{addr}, data directory {:?}, remote {}",
        dashboard.spider.data_dir(),
        dashboard.spider.host()
    );
    let dashboard = web::Data::new(dashboard);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(dashboard.clone())
            .configure(configure)
    })
    .bind(addr)?
    .run()
    .await
}
