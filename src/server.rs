use crate::{
    error::{Error, Result},
    pipeline::NormalizationPipeline,
    record::Report,
};
use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Serves `POST /normalize` and `GET /stats` until the process is stopped.
/// Every worker shares the one pipeline, so the counters cover all requests.
pub fn run(bind: &str, pipeline: NormalizationPipeline) -> Result<()> {
    let pipeline = web::Data::new(pipeline);

    info!(%bind, "starting normalization service");
    HttpServer::new(move || {
        App::new()
            .register_data(pipeline.clone())
            .wrap(Cors::new().allowed_methods(vec!["GET", "POST"]))
            .route("/normalize", web::post().to(normalize))
            .route("/stats", web::get().to(stats))
    })
    .bind(bind)?
    .run()?;

    Ok(())
}

fn normalize(pipeline: web::Data<NormalizationPipeline>, body: web::Json<Value>) -> HttpResponse {
    match handle(&pipeline, &body) {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(err) => {
            warn!(%err, "rejected request");
            HttpResponse::BadRequest().json(ErrorBody {
                error: err.to_string(),
            })
        }
    }
}

fn stats(pipeline: web::Data<NormalizationPipeline>) -> HttpResponse {
    HttpResponse::Ok().json(pipeline.statistics())
}

/// Validates the request shape before anything reaches the pipeline: the body
/// must be an object whose `text` is a string.
pub fn handle(pipeline: &NormalizationPipeline, body: &Value) -> Result<Report> {
    let text = match body.get("text") {
        Some(Value::String(text)) => text,
        Some(other) => {
            return Err(Error::InvalidInput(format!(
                "`text` must be a string, found {}",
                kind(other)
            )))
        }
        None => return Err(Error::InvalidInput("missing `text` field".into())),
    };

    let outcome = pipeline.evaluate(text);
    Ok(Report::new(text.as_str(), outcome.as_ref()))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
