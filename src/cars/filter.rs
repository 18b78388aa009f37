//! Listing filters for `GET /rental-cars`.
//!
//! Raw query parameters are parsed into a typed [`CarFilter`]. Each provided
//! parameter narrows the result by exact match, omitted ones impose nothing,
//! and the result is always ordered by ascending daily price.

use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};

use super::repo_types::Car;
use crate::error::AppError;

const SELECT_CARS: &str =
    "SELECT id, name, price_per_day, year, color, steering_type, number_of_seats, created_at FROM cars";

/// Query string as received. Empty values count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct CarQuery {
    pub year: Option<String>,
    pub color: Option<String>,
    pub steering_type: Option<String>,
    pub number_of_seats: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CarFilter {
    pub year: Option<i32>,
    pub color: Option<String>,
    pub steering_type: Option<String>,
    pub number_of_seats: Option<i32>,
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

fn parse_int(field: &str, v: Option<String>) -> Result<Option<i32>, AppError> {
    non_empty(v)
        .map(|s| {
            s.trim()
                .parse::<i32>()
                .map_err(|_| AppError::validation(format!("{field} must be an integer")))
        })
        .transpose()
}

impl TryFrom<CarQuery> for CarFilter {
    type Error = AppError;

    fn try_from(q: CarQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            year: parse_int("year", q.year)?,
            color: non_empty(q.color),
            steering_type: non_empty(q.steering_type),
            number_of_seats: parse_int("number_of_seats", q.number_of_seats)?,
        })
    }
}

impl CarFilter {
    /// Parameterized `SELECT` with the filter's conditions ANDed together.
    pub fn select_query(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(SELECT_CARS);
        let mut sep = " WHERE ";

        if let Some(year) = self.year {
            qb.push(sep).push("year = ").push_bind(year);
            sep = " AND ";
        }
        if let Some(color) = &self.color {
            qb.push(sep).push("color = ").push_bind(color.clone());
            sep = " AND ";
        }
        if let Some(steering) = &self.steering_type {
            qb.push(sep).push("steering_type = ").push_bind(steering.clone());
            sep = " AND ";
        }
        if let Some(seats) = self.number_of_seats {
            qb.push(sep).push("number_of_seats = ").push_bind(seats);
        }

        qb.push(" ORDER BY price_per_day ASC");
        qb
    }

    /// In-process equivalent of the `WHERE` clause.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn matches(&self, car: &Car) -> bool {
        self.year.map_or(true, |y| car.year == y)
            && self.color.as_deref().map_or(true, |c| car.color == c)
            && self
                .steering_type
                .as_deref()
                .map_or(true, |s| car.steering_type == s)
            && self.number_of_seats.map_or(true, |n| car.number_of_seats == n)
    }
}

/// Orders cars by ascending daily price; ties keep their existing order.
#[cfg_attr(not(test), allow(dead_code))]
pub fn sort_by_price(cars: &mut [Car]) {
    cars.sort_by(|a, b| a.price_per_day.total_cmp(&b.price_per_day));
}
