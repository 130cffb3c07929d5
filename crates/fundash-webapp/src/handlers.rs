use crate::pipeline::{self, Trigger};
use crate::render::PAGE_TITLE;
use crate::Dashboard;
use actix_web::{get, web, HttpResponse, Responder};
use tera::Context;

/// The dashboard page: symbol input, Analyze button and the output region.
///
/// When the query carries a trigger (`?n_clicks=1&symbol=AAPL`) the output region is filled in
/// on the server, so the page also works without the script.
#[get("/")]
pub async fn index(dashboard: web::Data<Dashboard>, trigger: web::Query<Trigger>) -> impl Responder {
    let trigger = trigger.into_inner();
    let output = pipeline::run(&dashboard.spider, &trigger)
        .await
        .into_fragment();

    let mut context = Context::new();
    context.insert("title", PAGE_TITLE);
    context.insert("symbol", trigger.symbol.as_deref().unwrap_or_default());
    context.insert("next_click", &trigger.n_clicks.unwrap_or(0).saturating_add(1));
    context.insert("output", &output.to_html());

    match dashboard.tera.render("index.html", &context) {
        Ok(rendered) => HttpResponse::Ok().content_type("text/html").body(rendered),
        Err(err) => {
            tracing::error!("failed to render index.html, error({err})");
            HttpResponse::InternalServerError().body("Failed to render page")
        }
    }
}

/// Only the output fragment for a trigger; the page script swaps it into `#output-container`.
#[get("/analyze")]
pub async fn analyze(
    dashboard: web::Data<Dashboard>,
    trigger: web::Query<Trigger>,
) -> impl Responder {
    let fragment = pipeline::run(&dashboard.spider, &trigger).await.into_fragment();
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(fragment.to_html())
}
