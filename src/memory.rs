//! In-process store for tests. Mirrors the Postgres schema's constraints:
//! unique usernames and price-ordered listings.

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::{
    repo::UserRepo,
    repo_types::{NewUser, User},
};
use crate::cars::{
    filter::{sort_by_price, CarFilter},
    repo::CarRepo,
    repo_types::{Car, NewCar},
};
use crate::db::StoreError;

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    cars: RwLock<Vec<Car>>,
}

impl MemoryStore {
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::Duplicate("username"));
        }
        let user = User {
            id: Uuid::new_v4(),
            full_name: user.full_name,
            email: user.email,
            username: user.username,
            password_hash: user.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl CarRepo for MemoryStore {
    async fn list(&self, filter: &CarFilter) -> Result<Vec<Car>, StoreError> {
        let mut cars: Vec<Car> = self
            .cars
            .read()
            .await
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        sort_by_price(&mut cars);
        Ok(cars)
    }

    async fn create(&self, car: NewCar) -> Result<Car, StoreError> {
        let car = Car {
            id: Uuid::new_v4(),
            name: car.name,
            price_per_day: car.price_per_day,
            year: car.year,
            color: car.color,
            steering_type: car.steering_type,
            number_of_seats: car.number_of_seats,
            created_at: OffsetDateTime::now_utc(),
        };
        self.cars.write().await.push(car.clone());
        Ok(car)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            full_name: "Test User".into(),
            email: "test@example.com".into(),
            username: username.into(),
            password_hash: "$argon2id$placeholder".into(),
        }
    }

    #[tokio::test]
    async fn create_enforces_unique_username() {
        let store = MemoryStore::default();
        UserRepo::create(&store, new_user("sam")).await.expect("first");
        let err = UserRepo::create(&store, new_user("sam")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate("username")));
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn users_are_found_by_id_and_username() {
        let store = MemoryStore::default();
        let user = UserRepo::create(&store, new_user("sam")).await.expect("create");
        let by_id = store.find_by_id(user.id).await.expect("lookup");
        let by_name = store.find_by_username("sam").await.expect("lookup");
        assert_eq!(by_id.map(|u| u.username), Some("sam".to_string()));
        assert_eq!(by_name.map(|u| u.id), Some(user.id));
        assert!(store.find_by_username("nobody").await.expect("lookup").is_none());
    }
}
