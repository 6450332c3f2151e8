use crate::db::{create_breed, create_dog, create_user};
use crate::error::AppError;
use rocket::local::asynchronous::Client;
use sqlx::{Pool, Sqlite, SqlitePool};
use std::collections::HashMap;

pub static STANDARD_PASSWORD: &str = "password123";

pub struct TestUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub struct TestDog {
    pub dog_name: String,
    pub owner_username: String,
    pub breed_name: String,
    pub age: i64,
    pub sex: String,
    pub is_vaccinated: bool,
    pub is_fixed: bool,
}

/// Seeds an in-memory database through the real db-layer functions, so
/// fixtures go through the same hashing and timestamp paths as production.
#[derive(Default)]
pub struct TestDbBuilder {
    users: Vec<TestUser>,
    breeds: Vec<String>,
    dogs: Vec<TestDog>,
}

impl TestDbBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(self, username: &str, email: &str) -> Self {
        self.user_with_password(username, email, STANDARD_PASSWORD)
    }

    pub fn user_with_password(mut self, username: &str, email: &str, password: &str) -> Self {
        self.users.push(TestUser {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        });
        self
    }

    pub fn breed(mut self, breed_name: &str) -> Self {
        self.breeds.push(breed_name.to_string());
        self
    }

    pub fn dog(mut self, dog_name: &str, owner_username: &str, breed_name: &str) -> Self {
        self.dogs.push(TestDog {
            dog_name: dog_name.to_string(),
            owner_username: owner_username.to_string(),
            breed_name: breed_name.to_string(),
            age: 3,
            sex: "M".to_string(),
            is_vaccinated: true,
            is_fixed: false,
        });
        self
    }

    pub async fn build(self) -> Result<TestDb, AppError> {
        let pool = SqlitePool::connect("sqlite::memory:").await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        let mut user_id_map: HashMap<String, i64> = HashMap::new();
        let mut breed_id_map: HashMap<String, i64> = HashMap::new();
        let mut dog_id_map: HashMap<String, i64> = HashMap::new();

        for user in &self.users {
            let created = create_user(&pool, &user.username, &user.email, &user.password).await?;
            user_id_map.insert(user.username.clone(), created.user_id);
        }

        for breed_name in &self.breeds {
            let breed = create_breed(&pool, breed_name).await?;
            breed_id_map.insert(breed_name.clone(), breed.breed_id);
        }

        for dog in &self.dogs {
            let owner_id = user_id_map
                .get(&dog.owner_username)
                .copied()
                .ok_or_else(|| AppError::NotFound(format!("No such owner {}", dog.owner_username)))?;
            let breed_id = breed_id_map
                .get(&dog.breed_name)
                .copied()
                .ok_or_else(|| AppError::NotFound(format!("No such breed {}", dog.breed_name)))?;

            let dog_id = create_dog(
                &pool,
                &dog.dog_name,
                owner_id,
                breed_id,
                dog.age,
                &dog.sex,
                dog.is_vaccinated,
                dog.is_fixed,
            )
            .await?;

            dog_id_map.insert(dog.dog_name.clone(), dog_id);
        }

        Ok(TestDb {
            pool,
            user_id_map,
            breed_id_map,
            dog_id_map,
        })
    }
}

pub struct TestDb {
    pub pool: Pool<Sqlite>,
    pub user_id_map: HashMap<String, i64>,
    pub breed_id_map: HashMap<String, i64>,
    pub dog_id_map: HashMap<String, i64>,
}

impl TestDb {
    pub fn user_id(&self, username: &str) -> Option<i64> {
        self.user_id_map.get(username).copied()
    }

    pub fn breed_id(&self, breed_name: &str) -> Option<i64> {
        self.breed_id_map.get(breed_name).copied()
    }

    pub fn dog_id(&self, dog_name: &str) -> Option<i64> {
        self.dog_id_map.get(dog_name).copied()
    }
}

/// Standard fixture: one owner, one breed, one dog.
pub async fn create_standard_test_db() -> TestDb {
    TestDbBuilder::new()
        .user("alice", "alice@x.com")
        .breed("Corgi")
        .dog("Rex", "alice", "Corgi")
        .build()
        .await
        .expect("Failed to build test database")
}

pub async fn setup_test_client(test_db: &TestDb) -> Client {
    let rocket = crate::init_rocket(test_db.pool.clone()).await;
    Client::tracked(rocket)
        .await
        .expect("Failed to build test client")
}
