use chrono::Utc;
use sqlx::{Pool, Sqlite};
use tracing::{info, instrument};

use crate::auth::{hash_password, verify_password};
use crate::error::AppError;
use crate::models::{
    Activity, Breed, DbActivity, DbBreed, DbDogActivity, DbDogProfile, DbSwipe, DbUser, DogActivity,
    DogProfile, Swipe, User,
};

const USER_COLUMNS: &str = "user_id, username, email, password_hash, name, age, gender, \
     user_pic, user_bio, max_distance, zipcode, creation_time, last_update";

#[instrument]
pub async fn get_user(pool: &Pool<Sqlite>, id: i64) -> Result<User, AppError> {
    info!("Fetching user by ID");
    let row = sqlx::query_as::<_, DbUser>(&format!(
        "SELECT {} FROM users WHERE user_id = ?",
        USER_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(user) => Ok(User::from(user)),
        _ => Err(AppError::NotFound(format!(
            "User with id {} not found in database",
            id
        ))),
    }
}

#[instrument]
pub async fn find_user_by_email(
    pool: &Pool<Sqlite>,
    email: &str,
) -> Result<Option<User>, AppError> {
    info!("Fetching user by email");
    let row = sqlx::query_as::<_, DbUser>(&format!(
        "SELECT {} FROM users WHERE email = ?",
        USER_COLUMNS
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(User::from))
}

#[instrument(skip_all, fields(email))]
pub async fn create_user(
    pool: &Pool<Sqlite>,
    username: &str,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    info!("Creating new user");

    let hashed_password = hash_password(password)?;
    let now = Utc::now().naive_utc();

    let res = sqlx::query(
        "INSERT INTO users (username, email, password_hash, creation_time) VALUES (?, ?, ?, ?)",
    )
    .bind(username)
    .bind(email)
    .bind(&hashed_password)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| AppError::from_insert_error(e, "email"))?;

    get_user(pool, res.last_insert_rowid()).await
}

/// Looks up the account by exact email and checks the candidate password.
/// Unknown email and wrong password both come back as `None`; callers must
/// not distinguish the two.
#[instrument(skip_all, fields(email))]
pub async fn authenticate_user(
    pool: &Pool<Sqlite>,
    email: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    info!("Authenticating user");

    let user = find_user_by_email(pool, email).await?;

    match user {
        Some(user) if verify_password(&user.password_hash, password) => Ok(Some(user)),
        _ => Ok(None),
    }
}

const DOG_PROFILE_QUERY: &str = "SELECT d.dog_id, d.dog_name, d.owner_id, d.breed_id, d.age, \
     d.sex, d.is_vaccinated, d.is_fixed, d.dog_bio, d.dog_pic, d.creation_time, d.last_updated, \
     u.username AS owner, b.breed_name AS breed \
     FROM dogs d \
     JOIN users u ON u.user_id = d.owner_id \
     JOIN breeds b ON b.breed_id = d.breed_id \
     WHERE d.dog_id = ?";

#[instrument]
pub async fn get_dog_profile(pool: &Pool<Sqlite>, dog_id: i64) -> Result<DogProfile, AppError> {
    info!("Fetching dog joined with owner and breed");
    let row = sqlx::query_as::<_, DbDogProfile>(DOG_PROFILE_QUERY)
        .bind(dog_id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(dog) => Ok(DogProfile::from(dog)),
        _ => Err(AppError::NotFound(format!(
            "Dog with id {} not found in database",
            dog_id
        ))),
    }
}

#[allow(clippy::too_many_arguments)]
#[instrument]
pub async fn create_dog(
    pool: &Pool<Sqlite>,
    dog_name: &str,
    owner_id: i64,
    breed_id: i64,
    age: i64,
    sex: &str,
    is_vaccinated: bool,
    is_fixed: bool,
) -> Result<i64, AppError> {
    info!("Creating dog");
    let now = Utc::now().naive_utc();

    let res = sqlx::query(
        "INSERT INTO dogs (dog_name, owner_id, breed_id, age, sex, is_vaccinated, is_fixed, creation_time)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(dog_name)
    .bind(owner_id)
    .bind(breed_id)
    .bind(age)
    .bind(sex)
    .bind(is_vaccinated)
    .bind(is_fixed)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(res.last_insert_rowid())
}

/// Overwrites the mutable dog fields and stamps `last_updated`.
/// `creation_time` is never touched after insert.
#[allow(clippy::too_many_arguments)]
#[instrument]
pub async fn update_dog(
    pool: &Pool<Sqlite>,
    dog_id: i64,
    dog_name: &str,
    owner_id: i64,
    breed_id: i64,
    age: i64,
    sex: &str,
    is_vaccinated: bool,
    is_fixed: bool,
) -> Result<(), AppError> {
    info!("Updating dog");
    let now = Utc::now().naive_utc();

    let res = sqlx::query(
        "UPDATE dogs
         SET dog_name = ?, owner_id = ?, breed_id = ?, age = ?, sex = ?,
             is_vaccinated = ?, is_fixed = ?, last_updated = ?
         WHERE dog_id = ?",
    )
    .bind(dog_name)
    .bind(owner_id)
    .bind(breed_id)
    .bind(age)
    .bind(sex)
    .bind(is_vaccinated)
    .bind(is_fixed)
    .bind(now)
    .bind(dog_id)
    .execute(pool)
    .await?;

    if res.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Dog with id {} not found in database",
            dog_id
        )));
    }

    Ok(())
}

#[instrument]
pub async fn create_breed(pool: &Pool<Sqlite>, breed_name: &str) -> Result<Breed, AppError> {
    info!("Creating breed");
    let res = sqlx::query("INSERT INTO breeds (breed_name) VALUES (?)")
        .bind(breed_name)
        .execute(pool)
        .await?;

    let row = sqlx::query_as::<_, DbBreed>("SELECT breed_id, breed_name FROM breeds WHERE breed_id = ?")
        .bind(res.last_insert_rowid())
        .fetch_one(pool)
        .await?;

    Ok(Breed::from(row))
}

#[instrument]
pub async fn create_activity(
    pool: &Pool<Sqlite>,
    activity_description: &str,
) -> Result<Activity, AppError> {
    info!("Creating activity");
    let res = sqlx::query("INSERT INTO activities (activity_description) VALUES (?)")
        .bind(activity_description)
        .execute(pool)
        .await?;

    let row = sqlx::query_as::<_, DbActivity>(
        "SELECT activity_id, activity_description FROM activities WHERE activity_id = ?",
    )
    .bind(res.last_insert_rowid())
    .fetch_one(pool)
    .await?;

    Ok(Activity::from(row))
}

#[instrument]
pub async fn add_dog_activity(
    pool: &Pool<Sqlite>,
    dog_id: i64,
    activity_id: i64,
    activity_rank: i64,
) -> Result<DogActivity, AppError> {
    info!("Ranking activity for dog");
    let res = sqlx::query(
        "INSERT INTO dog_activities (dog_id, activity_id, activity_rank) VALUES (?, ?, ?)",
    )
    .bind(dog_id)
    .bind(activity_id)
    .bind(activity_rank)
    .execute(pool)
    .await?;

    let row = sqlx::query_as::<_, DbDogActivity>(
        "SELECT dog_activity_id, dog_id, activity_id, activity_rank
         FROM dog_activities WHERE dog_activity_id = ?",
    )
    .bind(res.last_insert_rowid())
    .fetch_one(pool)
    .await?;

    Ok(DogActivity::from(row))
}

#[instrument]
pub async fn get_dog_activities(
    pool: &Pool<Sqlite>,
    dog_id: i64,
) -> Result<Vec<DogActivity>, AppError> {
    info!("Fetching ranked activities for dog");
    let rows = sqlx::query_as::<_, DbDogActivity>(
        "SELECT dog_activity_id, dog_id, activity_id, activity_rank
         FROM dog_activities
         WHERE dog_id = ?
         ORDER BY activity_rank",
    )
    .bind(dog_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(DogActivity::from).collect())
}

#[instrument]
pub async fn record_swipe(
    pool: &Pool<Sqlite>,
    dog_id: i64,
    swiped_dog_id: i64,
    is_interested: bool,
) -> Result<Swipe, AppError> {
    info!("Recording swipe");
    let now = Utc::now().naive_utc();

    let res = sqlx::query(
        "INSERT INTO swipes (dog_id, swiped_dog_id, is_interested, creation_time)
         VALUES (?, ?, ?, ?)",
    )
    .bind(dog_id)
    .bind(swiped_dog_id)
    .bind(is_interested)
    .bind(now)
    .execute(pool)
    .await?;

    let row = sqlx::query_as::<_, DbSwipe>(
        "SELECT swipe_id, dog_id, swiped_dog_id, is_interested, creation_time
         FROM swipes WHERE swipe_id = ?",
    )
    .bind(res.last_insert_rowid())
    .fetch_one(pool)
    .await?;

    Ok(Swipe::from(row))
}

#[instrument]
pub async fn get_swipes_for_dog(pool: &Pool<Sqlite>, dog_id: i64) -> Result<Vec<Swipe>, AppError> {
    info!("Fetching swipes made by dog");
    let rows = sqlx::query_as::<_, DbSwipe>(
        "SELECT swipe_id, dog_id, swiped_dog_id, is_interested, creation_time
         FROM swipes
         WHERE dog_id = ?
         ORDER BY creation_time",
    )
    .bind(dog_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Swipe::from).collect())
}
