use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

fn to_utc(dt: Option<NaiveDateTime>) -> DateTime<Utc> {
    dt.map(|dt| DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc))
        .unwrap_or_else(Utc::now)
}

fn to_utc_opt(dt: Option<NaiveDateTime>) -> Option<DateTime<Utc>> {
    dt.map(|dt| DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc))
}

/// A registered account. The password is never held in plaintext; only the
/// bcrypt hash is stored, and the hash is skipped on serialization so it
/// cannot leak through any projection.
#[derive(Serialize, Clone)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub user_pic: Option<String>,
    pub user_bio: Option<String>,
    pub max_distance: Option<i64>,
    pub zipcode: Option<String>,
    pub creation_time: DateTime<Utc>,
    pub last_update: Option<DateTime<Utc>>,
}

#[derive(sqlx::FromRow, Clone)]
pub struct DbUser {
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub user_pic: Option<String>,
    pub user_bio: Option<String>,
    pub max_distance: Option<i64>,
    pub zipcode: Option<String>,
    pub creation_time: Option<NaiveDateTime>,
    pub last_update: Option<NaiveDateTime>,
}

impl From<DbUser> for User {
    fn from(user: DbUser) -> Self {
        Self {
            user_id: user.user_id.unwrap_or_default(),
            username: user.username.unwrap_or_default(),
            email: user.email.unwrap_or_default(),
            password_hash: user.password_hash.unwrap_or_default(),
            name: user.name,
            age: user.age,
            gender: user.gender,
            user_pic: user.user_pic,
            user_bio: user.user_bio,
            max_distance: user.max_distance,
            zipcode: user.zipcode,
            creation_time: to_utc(user.creation_time),
            last_update: to_utc_opt(user.last_update),
        }
    }
}

#[derive(Serialize, Clone)]
pub struct Breed {
    pub breed_id: i64,
    pub breed_name: String,
}

#[derive(sqlx::FromRow, Clone)]
pub struct DbBreed {
    pub breed_id: Option<i64>,
    pub breed_name: Option<String>,
}

impl From<DbBreed> for Breed {
    fn from(breed: DbBreed) -> Self {
        Self {
            breed_id: breed.breed_id.unwrap_or_default(),
            breed_name: breed.breed_name.unwrap_or_default(),
        }
    }
}

#[derive(Serialize, Clone)]
pub struct Dog {
    pub dog_id: i64,
    pub dog_name: String,
    pub owner_id: i64,
    pub breed_id: i64,
    pub age: i64,
    pub sex: String,
    pub is_vaccinated: bool,
    pub is_fixed: bool,
    pub dog_bio: Option<String>,
    pub dog_pic: Option<String>,
    pub creation_time: DateTime<Utc>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// A dog joined with its owner and breed. `owner` (the owner's username)
/// and `breed` (the breed name) are denormalized for the API response;
/// the dog's own columns flatten into the same record.
#[derive(Serialize, Clone)]
pub struct DogProfile {
    #[serde(flatten)]
    pub dog: Dog,
    pub owner: String,
    pub breed: String,
}

#[derive(sqlx::FromRow, Clone)]
pub struct DbDogProfile {
    pub dog_id: Option<i64>,
    pub dog_name: Option<String>,
    pub owner_id: Option<i64>,
    pub breed_id: Option<i64>,
    pub age: Option<i64>,
    pub sex: Option<String>,
    pub is_vaccinated: Option<bool>,
    pub is_fixed: Option<bool>,
    pub dog_bio: Option<String>,
    pub dog_pic: Option<String>,
    pub creation_time: Option<NaiveDateTime>,
    pub last_updated: Option<NaiveDateTime>,
    pub owner: Option<String>,
    pub breed: Option<String>,
}

impl From<DbDogProfile> for DogProfile {
    fn from(row: DbDogProfile) -> Self {
        Self {
            dog: Dog {
                dog_id: row.dog_id.unwrap_or_default(),
                dog_name: row.dog_name.unwrap_or_default(),
                owner_id: row.owner_id.unwrap_or_default(),
                breed_id: row.breed_id.unwrap_or_default(),
                age: row.age.unwrap_or_default(),
                sex: row.sex.unwrap_or_default(),
                is_vaccinated: row.is_vaccinated.unwrap_or_default(),
                is_fixed: row.is_fixed.unwrap_or_default(),
                dog_bio: row.dog_bio,
                dog_pic: row.dog_pic,
                creation_time: to_utc(row.creation_time),
                last_updated: to_utc_opt(row.last_updated),
            },
            owner: row.owner.unwrap_or_default(),
            breed: row.breed.unwrap_or_default(),
        }
    }
}

#[derive(Serialize, Clone)]
pub struct Activity {
    pub activity_id: i64,
    pub activity_description: String,
}

#[derive(sqlx::FromRow, Clone)]
pub struct DbActivity {
    pub activity_id: Option<i64>,
    pub activity_description: Option<String>,
}

impl From<DbActivity> for Activity {
    fn from(activity: DbActivity) -> Self {
        Self {
            activity_id: activity.activity_id.unwrap_or_default(),
            activity_description: activity.activity_description.unwrap_or_default(),
        }
    }
}

/// A dog's ranked preference for an activity. Rank 1 is the favourite.
#[derive(Serialize, Clone)]
pub struct DogActivity {
    pub dog_activity_id: i64,
    pub dog_id: i64,
    pub activity_id: i64,
    pub activity_rank: i64,
}

#[derive(sqlx::FromRow, Clone)]
pub struct DbDogActivity {
    pub dog_activity_id: Option<i64>,
    pub dog_id: Option<i64>,
    pub activity_id: Option<i64>,
    pub activity_rank: Option<i64>,
}

impl From<DbDogActivity> for DogActivity {
    fn from(da: DbDogActivity) -> Self {
        Self {
            dog_activity_id: da.dog_activity_id.unwrap_or_default(),
            dog_id: da.dog_id.unwrap_or_default(),
            activity_id: da.activity_id.unwrap_or_default(),
            activity_rank: da.activity_rank.unwrap_or_default(),
        }
    }
}

/// One dog's verdict on another. References two dogs but owns neither.
#[derive(Serialize, Clone)]
pub struct Swipe {
    pub swipe_id: i64,
    pub dog_id: i64,
    pub swiped_dog_id: i64,
    pub is_interested: bool,
    pub creation_time: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Clone)]
pub struct DbSwipe {
    pub swipe_id: Option<i64>,
    pub dog_id: Option<i64>,
    pub swiped_dog_id: Option<i64>,
    pub is_interested: Option<bool>,
    pub creation_time: Option<NaiveDateTime>,
}

impl From<DbSwipe> for Swipe {
    fn from(swipe: DbSwipe) -> Self {
        Self {
            swipe_id: swipe.swipe_id.unwrap_or_default(),
            dog_id: swipe.dog_id.unwrap_or_default(),
            swiped_dog_id: swipe.swiped_dog_id.unwrap_or_default(),
            is_interested: swipe.is_interested.unwrap_or_default(),
            creation_time: to_utc(swipe.creation_time),
        }
    }
}
