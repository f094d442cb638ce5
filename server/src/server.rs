use shared::models::DateRangeQuery;
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::error::{ApiError, ErrorMessage};
use crate::wind_data::WindData;

pub async fn run(address: std::net::SocketAddr, client_url: Option<&str>, data: WindData) {
    if !data.exists() {
        log::warn!("Wind data file not found at '{}'", data.path().display());
    }
    log::info!("Serving wind data API on http://{}", address);

    warp::serve(routes(data, client_url)).run(address).await
}

/// Builds the whole route tree around `data`.
pub fn routes(
    data: WindData,
    client_url: Option<&str>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let home_route = warp::path::end().and(warp::get()).map(home);

    let health_route = warp::path!("health")
        .and(warp::get())
        .and(with_data(data.clone()))
        .map(health);

    let records_route = warp::path("api")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<DateRangeQuery>())
        .and(with_data(data.clone()))
        .and_then(wind_records);

    let cap_dates_route = warp::path!("api" / "cap-dates")
        .and(warp::get())
        .and(with_data(data))
        .and_then(cap_dates);

    let cors = match client_url {
        Some(url) => warp::cors().allow_origin(url),
        None => warp::cors().allow_any_origin(),
    }
    .allow_methods(vec!["GET"]);

    home_route
        .or(health_route)
        .or(records_route)
        .or(cap_dates_route)
        .recover(rejection)
        .with(cors)
}

fn with_data(data: WindData) -> impl Filter<Extract = (WindData,), Error = Infallible> + Clone {
    warp::any().map(move || data.clone())
}

fn home() -> &'static str {
    "Go to /api to fetch the data"
}

fn health(data: WindData) -> StatusCode {
    if data.exists() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

pub async fn wind_records(query: DateRangeQuery, data: WindData) -> Result<impl Reply, Rejection> {
    let records = tokio::task::spawn_blocking(move || data.records_between(&query))
        .await
        .map_err(|e| warp::reject::custom(ApiError::from(e)))?
        .map_err(|e| warp::reject::custom(ApiError::from(e)))?;

    Ok(warp::reply::json(&records))
}

pub async fn cap_dates(data: WindData) -> Result<impl Reply, Rejection> {
    let bounds = tokio::task::spawn_blocking(move || data.date_bounds())
        .await
        .map_err(|e| warp::reject::custom(ApiError::from(e)))?
        .map_err(|e| warp::reject::custom(ApiError::from(e)))?;

    Ok(warp::reply::json(&bounds))
}

pub async fn rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (code, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found.".to_string())
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        log::warn!("Rejected query: {}", e);
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if let Some(e) = err.find::<ApiError>() {
        if e.status().is_server_error() {
            log::error!("Error: {}", e);
        } else {
            log::warn!("{}", e);
        }
        (e.status(), e.public_message())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed.".to_string(),
        )
    } else {
        log::error!("Error: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error.".to_string(),
        )
    };

    let json = warp::reply::json(&ErrorMessage {
        code: code.as_u16(),
        message,
    });

    Ok(warp::reply::with_status(json, code))
}
