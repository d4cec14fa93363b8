//! Storage for the catalog, saved burgers and accounts

mod memory;
mod redis_store;

pub use memory::MemoryStorage;
pub use redis_store::RedisStorage;

use anyhow::Result;
use burgerfy_common::{
    Category, Ingredient, IngredientId, NewBurger, NewIngredient, NewUser, PersistedBurger, User,
    UserId,
};
use tracing::info;

/// Choose between the in-memory and the Redis backend
pub enum Storage {
    Memory(MemoryStorage),
    Redis(RedisStorage),
}

impl Storage {
    /// Empty in-memory store
    pub fn memory() -> Self {
        Storage::Memory(MemoryStorage::new())
    }

    /// Redis when a URL is given, memory otherwise
    pub async fn connect(redis_url: Option<&str>) -> Result<Self> {
        match redis_url {
            Some(url) => Ok(Storage::Redis(RedisStorage::new(url).await?)),
            None => {
                info!("No REDIS_URL set, keeping data in memory");
                Ok(Storage::memory())
            }
        }
    }

    pub async fn health_check(&mut self) -> Result<()> {
        match self {
            Storage::Memory(_) => Ok(()),
            Storage::Redis(store) => store.health_check().await,
        }
    }

    /// Insert `entries` if the catalog is empty. Returns how many were added.
    pub async fn seed_catalog(&mut self, entries: Vec<NewIngredient>) -> Result<usize> {
        if !self.list_ingredients().await?.is_empty() {
            return Ok(0);
        }

        // Nothing is stored unless every entry is valid
        entries.iter().try_for_each(NewIngredient::validate)?;

        let mut added = 0;
        for entry in entries {
            self.create_ingredient(entry).await?;
            added += 1;
        }

        info!("Seeded catalog with {} ingredients", added);
        Ok(added)
    }

    pub async fn list_ingredients(&mut self) -> Result<Vec<Ingredient>> {
        match self {
            Storage::Memory(store) => Ok(store.list_ingredients()),
            Storage::Redis(store) => store.list_ingredients().await,
        }
    }

    pub async fn get_ingredient(&mut self, id: IngredientId) -> Result<Option<Ingredient>> {
        match self {
            Storage::Memory(store) => Ok(store.get_ingredient(id)),
            Storage::Redis(store) => store.get_ingredient(id).await,
        }
    }

    pub async fn ingredients_by_category(&mut self, category: Category) -> Result<Vec<Ingredient>> {
        match self {
            Storage::Memory(store) => Ok(store.ingredients_by_category(category)),
            Storage::Redis(store) => store.ingredients_by_category(category).await,
        }
    }

    pub async fn create_ingredient(&mut self, ingredient: NewIngredient) -> Result<Ingredient> {
        match self {
            Storage::Memory(store) => Ok(store.create_ingredient(ingredient)),
            Storage::Redis(store) => store.create_ingredient(ingredient).await,
        }
    }

    pub async fn list_burgers(&mut self) -> Result<Vec<PersistedBurger>> {
        match self {
            Storage::Memory(store) => Ok(store.list_burgers()),
            Storage::Redis(store) => store.list_burgers().await,
        }
    }

    pub async fn get_burger(&mut self, id: u64) -> Result<Option<PersistedBurger>> {
        match self {
            Storage::Memory(store) => Ok(store.get_burger(id)),
            Storage::Redis(store) => store.get_burger(id).await,
        }
    }

    pub async fn burgers_by_user(&mut self, user_id: UserId) -> Result<Vec<PersistedBurger>> {
        match self {
            Storage::Memory(store) => Ok(store.burgers_by_user(user_id)),
            Storage::Redis(store) => store.burgers_by_user(user_id).await,
        }
    }

    pub async fn create_burger(
        &mut self,
        burger: NewBurger,
        user_id: Option<UserId>,
    ) -> Result<PersistedBurger> {
        match self {
            Storage::Memory(store) => Ok(store.create_burger(burger, user_id)),
            Storage::Redis(store) => store.create_burger(burger, user_id).await,
        }
    }

    /// Returns Ok(None) if the email is already registered
    pub async fn create_user(&mut self, user: NewUser) -> Result<Option<User>> {
        match self {
            Storage::Memory(store) => Ok(store.create_user(user)),
            Storage::Redis(store) => store.create_user(user).await,
        }
    }

    pub async fn get_user(&mut self, id: UserId) -> Result<Option<User>> {
        match self {
            Storage::Memory(store) => Ok(store.get_user(id)),
            Storage::Redis(store) => store.get_user(id).await,
        }
    }

    pub async fn get_user_by_email(&mut self, email: &str) -> Result<Option<User>> {
        match self {
            Storage::Memory(store) => Ok(store.get_user_by_email(email)),
            Storage::Redis(store) => store.get_user_by_email(email).await,
        }
    }
}
