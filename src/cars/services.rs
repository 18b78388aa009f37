use super::dto::CreateCarRequest;
use super::filter::{CarFilter, CarQuery};
use super::repo::CarRepo;
use super::repo_types::{Car, NewCar};
use crate::error::AppError;

impl TryFrom<CreateCarRequest> for NewCar {
    type Error = AppError;

    fn try_from(req: CreateCarRequest) -> Result<Self, Self::Error> {
        if !req.has_all_fields() {
            return Err(AppError::validation("All car fields are required"));
        }

        let price_per_day = req
            .price_per_day
            .as_ref()
            .and_then(|v| v.to_f64())
            .filter(|p| *p > 0.0)
            .ok_or_else(|| AppError::validation("price_per_day must be a positive number"))?;
        let year = req
            .year
            .as_ref()
            .and_then(|v| v.to_i32())
            .ok_or_else(|| AppError::validation("year must be an integer"))?;
        let number_of_seats = req
            .number_of_seats
            .as_ref()
            .and_then(|v| v.to_i32())
            .filter(|n| *n > 0)
            .ok_or_else(|| AppError::validation("number_of_seats must be a positive integer"))?;

        Ok(NewCar {
            name: req.name.unwrap_or_default(),
            price_per_day,
            year,
            color: req.color.unwrap_or_default(),
            steering_type: req.steering_type.unwrap_or_default(),
            number_of_seats,
        })
    }
}

pub async fn list_cars(cars: &dyn CarRepo, query: CarQuery) -> Result<Vec<Car>, AppError> {
    let filter = CarFilter::try_from(query)?;
    Ok(cars.list(&filter).await?)
}

pub async fn create_car(cars: &dyn CarRepo, req: CreateCarRequest) -> Result<Car, AppError> {
    let new_car = NewCar::try_from(req)?;
    Ok(cars.create(new_car).await?)
}
