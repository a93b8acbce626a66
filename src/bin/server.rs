use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Deserializer, Serialize};
use sheet_cutter::{Demand, ReportPlacement, pack};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Numbers arrive either as JSON numbers or as numeric strings from form inputs.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Number(f64),
    Text(String),
}

impl Lenient {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            Lenient::Number(n) => Ok(n),
            Lenient::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid number '{s}'"))),
        }
    }
}

fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Lenient>::deserialize(deserializer)? {
        // Blank form fields count as absent.
        Some(Lenient::Text(s)) if s.trim().is_empty() => Ok(None),
        other => other.map(Lenient::into_f64).transpose(),
    }
}

fn deserialize_lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(n) = deserialize_lenient_f64(deserializer)? else {
        return Ok(None);
    };
    if !n.is_finite() || n < 0.0 || n > u32::MAX as f64 {
        return Err(serde::de::Error::custom(format!("invalid count {n}")));
    }
    Ok(Some(n.trunc() as u32))
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct OptimizeRequest {
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    sheet_length: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    sheet_width: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_u32")]
    sheet_quantity: Option<u32>,
    #[serde(default)]
    measurement_unit: Option<String>,
    #[serde(default)]
    pieces: Vec<PieceRequest>,
}

#[derive(Debug, Deserialize, Serialize)]
struct PieceRequest {
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    length: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    width: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_u32")]
    quantity: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OptimizeResponse {
    placements: Vec<Vec<ReportPlacement>>,
    waste: f64,
    total_sheets_used: usize,
    measurement_unit: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn run(req: OptimizeRequest) -> Result<OptimizeResponse, String> {
    let (Some(sheet_length), Some(sheet_width)) = (req.sheet_length, req.sheet_width) else {
        return Err("Sheet dimensions and pieces are required.".to_string());
    };
    if sheet_length == 0.0 || sheet_width == 0.0 || req.pieces.is_empty() {
        return Err("Sheet dimensions and pieces are required.".to_string());
    }

    let demands: Vec<Demand> = req
        .pieces
        .iter()
        .enumerate()
        .map(|(i, p)| match (p.length, p.width, p.quantity) {
            (Some(length), Some(width), Some(qty)) => Ok(Demand::new(length, width, qty)),
            _ => Err(format!("piece {} needs length, width and quantity", i + 1)),
        })
        .collect::<Result<Vec<_>, _>>()?;

    // A zero quantity from the form means "unlimited".
    let sheet_quantity = req.sheet_quantity.filter(|&n| n > 0);

    let report =
        pack(sheet_length, sheet_width, sheet_quantity, &demands).map_err(|e| e.to_string())?;

    Ok(OptimizeResponse {
        total_sheets_used: report.sheet_count(),
        placements: report.placements,
        waste: report.waste_area,
        measurement_unit: req.measurement_unit,
    })
}

async fn optimize(
    payload: Result<Json<OptimizeRequest>, JsonRejection>,
) -> Result<Json<OptimizeResponse>, ApiError> {
    let Json(req) = payload.map_err(|rejection| bad_request(rejection.body_text()))?;

    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /optimize"
    );

    run(req).map(Json).map_err(|e| {
        tracing::info!(error = %e, "optimize rejected");
        bad_request(e)
    })
}

fn app() -> Router {
    Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/optimize", post(optimize))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // The form is served from another origin.
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() {
    let _sentry = sentry::init(sentry::ClientOptions {
        dsn: std::env::var("SENTRY_DSN")
            .ok()
            .and_then(|dsn| dsn.parse().ok()),
        release: sentry::release_name!(),
        ..Default::default()
    });

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let addr = format!("0.0.0.0:{port}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");
    eprintln!("Listening on {addr}");
    axum::serve(listener, app()).await.expect("server error");
}
