use async_trait::async_trait;
use uuid::Uuid;

use super::filter::CarFilter;
use super::repo_types::{Car, NewCar};
use crate::db::{PgStore, StoreError};

#[async_trait]
pub trait CarRepo: Send + Sync {
    /// Cars matching `filter`, cheapest first.
    async fn list(&self, filter: &CarFilter) -> Result<Vec<Car>, StoreError>;
    async fn create(&self, car: NewCar) -> Result<Car, StoreError>;
}

#[async_trait]
impl CarRepo for PgStore {
    async fn list(&self, filter: &CarFilter) -> Result<Vec<Car>, StoreError> {
        let mut qb = filter.select_query();
        let cars = qb.build_query_as::<Car>().fetch_all(&self.pool).await?;
        Ok(cars)
    }

    async fn create(&self, car: NewCar) -> Result<Car, StoreError> {
        let car = sqlx::query_as::<_, Car>(
            r#"
            INSERT INTO cars (id, name, price_per_day, year, color, steering_type, number_of_seats)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, price_per_day, year, color, steering_type, number_of_seats, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&car.name)
        .bind(car.price_per_day)
        .bind(car.year)
        .bind(&car.color)
        .bind(&car.steering_type)
        .bind(car.number_of_seats)
        .fetch_one(&self.pool)
        .await?;
        Ok(car)
    }
}
