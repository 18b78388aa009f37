use crate::auth::repo::UserRepo;
use crate::cars::repo::CarRepo;
use crate::config::AppConfig;
use crate::db::PgStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepo>,
    pub cars: Arc<dyn CarRepo>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store = PgStore::connect(&config).await?;
        store.migrate().await;

        Ok(Self::from_parts(config, store))
    }

    pub fn from_parts(config: Arc<AppConfig>, store: PgStore) -> Self {
        let store = Arc::new(store);
        Self {
            config,
            users: store.clone() as Arc<dyn UserRepo>,
            cars: store as Arc<dyn CarRepo>,
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::memory::MemoryStore;

        let config = Arc::new(AppConfig::from_lookup(|key| match key {
            "JWT_SECRET" => Some("test".into()),
            "JWT_ISSUER" => Some("test-issuer".into()),
            "JWT_AUDIENCE" => Some("test-aud".into()),
            _ => None,
        }));

        let store = Arc::new(MemoryStore::default());
        Self {
            config,
            users: store.clone() as Arc<dyn UserRepo>,
            cars: store as Arc<dyn CarRepo>,
        }
    }
}
