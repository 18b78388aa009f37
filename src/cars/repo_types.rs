use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Car record in the inventory.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Car {
    pub id: Uuid,
    pub name: String,
    pub price_per_day: f64,
    pub year: i32,
    pub color: String,
    pub steering_type: String,
    pub number_of_seats: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A validated car ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCar {
    pub name: String,
    pub price_per_day: f64,
    pub year: i32,
    pub color: String,
    pub steering_type: String,
    pub number_of_seats: i32,
}
