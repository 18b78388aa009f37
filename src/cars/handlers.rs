use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use super::dto::{CreateCarRequest, CreatedCarResponse};
use super::filter::CarQuery;
use super::repo_types::Car;
use super::services;
use crate::{error::AppError, state::AppState};

pub fn car_routes() -> Router<AppState> {
    Router::new()
        .route("/rental-cars", get(list_rental_cars))
        .route("/cars", post(create_car))
}

#[instrument(skip(state, query))]
pub async fn list_rental_cars(
    State(state): State<AppState>,
    query: Result<Query<CarQuery>, QueryRejection>,
) -> Result<Json<Vec<Car>>, AppError> {
    let Query(query) = query?;
    let cars = services::list_cars(state.cars.as_ref(), query).await?;
    info!(count = cars.len(), "rental cars listed");
    Ok(Json(cars))
}

#[instrument(skip(state, payload))]
pub async fn create_car(
    State(state): State<AppState>,
    payload: Result<Json<CreateCarRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedCarResponse>), AppError> {
    let Json(payload) = payload?;
    let car = services::create_car(state.cars.as_ref(), payload).await?;
    info!(car_id = %car.id, name = %car.name, "car added");
    Ok((
        StatusCode::CREATED,
        Json(CreatedCarResponse {
            message: "Car added successfully".into(),
            car_id: car.id,
        }),
    ))
}
