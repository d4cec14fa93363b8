//! Redis storage
//!
//! Records are JSON strings under `ingredient:{id}`, `burger:{id}` and
//! `user:{id}`. Sorted sets scored by id keep listings in id order:
//!
//! - `ingredients:all`, `burgers:all`, `burgers:user:{user_id}`
//!
//! Ids come from `INCR` counters. `user:email:{email}` maps an email to its
//! user id and is claimed with `SET NX` so two registrations cannot share one.

use anyhow::{Context, Result};
use burgerfy_common::{
    normalize_email, Category, Ingredient, IngredientId, NewBurger, NewIngredient, NewUser,
    PersistedBurger, User, UserId,
};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

const INGREDIENTS_INDEX: &str = "ingredients:all";
const INGREDIENTS_COUNTER: &str = "ingredients:next_id";
const BURGERS_INDEX: &str = "burgers:all";
const BURGERS_COUNTER: &str = "burgers:next_id";
const USERS_COUNTER: &str = "users:next_id";

/// Storage backend on a Redis connection
pub struct RedisStorage {
    conn: ConnectionManager,
}

impl RedisStorage {
    /// Connect to Redis
    pub async fn new(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url).context("Failed to create Redis client")?;

        let conn = ConnectionManager::new(client)
            .await
            .context("Failed to connect to Redis")?;

        info!("Connected to Redis at {}", redis_url);

        Ok(Self { conn })
    }

    pub async fn health_check(&mut self) -> Result<()> {
        let _: String = redis::cmd("PING")
            .query_async(&mut self.conn)
            .await
            .context("Redis health check failed")?;
        Ok(())
    }

    pub async fn list_ingredients(&mut self) -> Result<Vec<Ingredient>> {
        let ids: Vec<IngredientId> = self.conn.zrange(INGREDIENTS_INDEX, 0, -1).await?;
        self.load_all("ingredient", &ids).await
    }

    pub async fn get_ingredient(&mut self, id: IngredientId) -> Result<Option<Ingredient>> {
        self.load(&format!("ingredient:{}", id)).await
    }

    pub async fn ingredients_by_category(&mut self, category: Category) -> Result<Vec<Ingredient>> {
        let mut ingredients = self.list_ingredients().await?;
        ingredients.retain(|i| i.category == category);
        Ok(ingredients)
    }

    pub async fn create_ingredient(&mut self, ingredient: NewIngredient) -> Result<Ingredient> {
        let id: IngredientId = self.conn.incr(INGREDIENTS_COUNTER, 1).await?;
        let ingredient = ingredient.with_id(id);

        self.store(&format!("ingredient:{}", id), &ingredient).await?;
        let _: () = self.conn.zadd(INGREDIENTS_INDEX, id, id).await?;

        debug!("Stored ingredient {}: {}", id, ingredient.name);
        Ok(ingredient)
    }

    pub async fn list_burgers(&mut self) -> Result<Vec<PersistedBurger>> {
        let ids: Vec<u64> = self.conn.zrange(BURGERS_INDEX, 0, -1).await?;
        self.load_all("burger", &ids).await
    }

    pub async fn get_burger(&mut self, id: u64) -> Result<Option<PersistedBurger>> {
        self.load(&format!("burger:{}", id)).await
    }

    pub async fn burgers_by_user(&mut self, user_id: UserId) -> Result<Vec<PersistedBurger>> {
        let ids: Vec<u64> = self
            .conn
            .zrange(format!("burgers:user:{}", user_id), 0, -1)
            .await?;
        self.load_all("burger", &ids).await
    }

    pub async fn create_burger(
        &mut self,
        burger: NewBurger,
        user_id: Option<UserId>,
    ) -> Result<PersistedBurger> {
        let id: u64 = self.conn.incr(BURGERS_COUNTER, 1).await?;
        let burger = PersistedBurger::new(id, burger, user_id);

        self.store(&format!("burger:{}", id), &burger).await?;
        let _: () = self.conn.zadd(BURGERS_INDEX, id, id).await?;

        if let Some(user_id) = user_id {
            let _: () = self
                .conn
                .zadd(format!("burgers:user:{}", user_id), id, id)
                .await?;
        }

        info!("Saved burger {}: {}", id, burger.name);
        Ok(burger)
    }

    /// Returns Ok(None) if the email is already registered
    pub async fn create_user(&mut self, user: NewUser) -> Result<Option<User>> {
        let email_key = format!("user:email:{}", normalize_email(&user.email));

        // Reserve the email first; the id is filled in below
        let claimed: bool = self.conn.set_nx(&email_key, 0).await?;
        if !claimed {
            debug!("Email already registered: {}", email_key);
            return Ok(None);
        }

        match self.insert_user(user, &email_key).await {
            Ok(user) => {
                info!("Registered user {}", user.id);
                Ok(Some(user))
            }
            Err(e) => {
                // Release the claim so the email can register again
                let released: redis::RedisResult<()> = self.conn.del(&email_key).await;
                if let Err(del_err) = released {
                    warn!("Failed to release {}: {}", email_key, del_err);
                }
                Err(e)
            }
        }
    }

    async fn insert_user(&mut self, user: NewUser, email_key: &str) -> Result<User> {
        let id: UserId = self.conn.incr(USERS_COUNTER, 1).await?;
        let user = user.with_id(id);

        self.store(&format!("user:{}", id), &user).await?;
        let _: () = self.conn.set(email_key, id).await?;

        Ok(user)
    }

    pub async fn get_user(&mut self, id: UserId) -> Result<Option<User>> {
        self.load(&format!("user:{}", id)).await
    }

    pub async fn get_user_by_email(&mut self, email: &str) -> Result<Option<User>> {
        let email_key = format!("user:email:{}", normalize_email(email));
        let id: Option<UserId> = self.conn.get(&email_key).await?;

        match id {
            Some(id) if id > 0 => self.get_user(id).await,
            _ => Ok(None),
        }
    }

    async fn store<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize {}", key))?;

        let _: () = self.conn.set(key, json).await?;
        Ok(())
    }

    async fn load<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>> {
        let json: Option<String> = self.conn.get(key).await?;

        match json {
            Some(data) => {
                let value = serde_json::from_str(&data)
                    .with_context(|| format!("Failed to deserialize {}", key))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn load_all<T, I>(&mut self, prefix: &str, ids: &[I]) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        I: std::fmt::Display,
    {
        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(record) = self.load(&format!("{}:{}", prefix, id)).await? {
                records.push(record);
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burgerfy_common::BurgerIngredientRef;
    use rust_decimal::Decimal;

    async fn get_test_storage() -> RedisStorage {
        let mut storage = RedisStorage::new("redis://127.0.0.1:6379/15")
            .await
            .expect("Failed to connect to test Redis");

        let _: () = redis::cmd("FLUSHDB")
            .query_async(&mut storage.conn)
            .await
            .expect("Failed to flush test database");

        storage
    }

    fn pickle() -> NewIngredient {
        NewIngredient {
            name: "Pickle".to_string(),
            display_name: "Pickle".to_string(),
            category: Category::Veggie,
            color: "bg-green-600".to_string(),
            height: 3.0,
            width: 250.0,
            label: "PICK".to_string(),
            price: Decimal::new(25, 2),
        }
    }

    #[tokio::test]
    #[ignore] // Requires Redis to be running
    async fn test_create_and_list_ingredients() {
        let mut storage = get_test_storage().await;

        let first = storage.create_ingredient(pickle()).await.unwrap();
        let second = storage.create_ingredient(pickle()).await.unwrap();

        let listed = storage.list_ingredients().await.unwrap();
        assert_eq!(listed, vec![first.clone(), second]);

        let loaded = storage.get_ingredient(first.id).await.unwrap().unwrap();
        assert_eq!(loaded.price, Decimal::new(25, 2));

        let veggies = storage.ingredients_by_category(Category::Veggie).await.unwrap();
        assert_eq!(veggies.len(), 2);
    }

    #[tokio::test]
    #[ignore] // Requires Redis to be running
    async fn test_burgers_indexed_by_user() {
        let mut storage = get_test_storage().await;
        let pickle = storage.create_ingredient(pickle()).await.unwrap();

        let burger = NewBurger {
            name: "Sour".to_string(),
            ingredients: vec![BurgerIngredientRef::from(&pickle)],
        };

        let owned = storage.create_burger(burger.clone(), Some(3)).await.unwrap();
        storage.create_burger(burger, None).await.unwrap();

        assert_eq!(storage.list_burgers().await.unwrap().len(), 2);

        let mine = storage.burgers_by_user(3).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, owned.id);
    }

    #[tokio::test]
    #[ignore] // Requires Redis to be running
    async fn test_duplicate_email() {
        let mut storage = get_test_storage().await;

        let user = NewUser {
            full_name: "Cook".to_string(),
            email: "cook@example.com".to_string(),
            password_hash: "hash".to_string(),
            age: Some(30),
        };

        let created = storage.create_user(user.clone()).await.unwrap().unwrap();
        assert!(storage.create_user(user).await.unwrap().is_none());

        let found = storage
            .get_user_by_email("COOK@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    #[ignore] // Requires Redis to be running
    async fn test_failed_registration_frees_email() {
        let mut storage = get_test_storage().await;

        let user = NewUser {
            full_name: "Cook".to_string(),
            email: "cook@example.com".to_string(),
            password_hash: "hash".to_string(),
            age: None,
        };

        // A non-numeric counter makes INCR fail after the email is claimed
        let _: () = storage.conn.set(USERS_COUNTER, "broken").await.unwrap();
        assert!(storage.create_user(user.clone()).await.is_err());

        let _: () = storage.conn.del(USERS_COUNTER).await.unwrap();
        let created = storage.create_user(user).await.unwrap();
        assert!(created.is_some());
    }
}
