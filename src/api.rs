use rocket::State;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::{Deserialize, Serialize, json::Json};
use sqlx::{Pool, Sqlite};
use validator::Validate;

use crate::db::{authenticate_user, create_dog, create_user, get_dog_profile, update_dog};
use crate::error::AppError;
use crate::models::{DogProfile, User};
use crate::projection::{Record, project};

#[derive(Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// The public account triple. Built from a `User`; the password hash has
/// no field here so it cannot be returned even by mistake.
#[derive(Serialize, Deserialize, Debug)]
pub struct UserView {
    pub user_id: i64,
    pub username: String,
    pub email: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
        }
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

fn login_failure() -> Custom<Json<MessageResponse>> {
    Custom(Status::BadRequest, Json(MessageResponse::new("fail")))
}

/// Missing credentials, an unknown email, and a wrong password all produce
/// the identical failure response so nothing leaks about which one it was.
#[post("/login", data = "<login>")]
pub async fn api_login(
    login: Json<LoginRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<UserView>, Custom<Json<MessageResponse>>> {
    let email = login.email.as_deref().unwrap_or_default();
    let password = login.password.as_deref().unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        return Err(login_failure());
    }

    match authenticate_user(db, email, password).await {
        Ok(Some(user)) => Ok(Json(UserView::from(user))),
        Ok(None) => Err(login_failure()),
        Err(e) => {
            e.log("POST /login");
            Err(login_failure())
        }
    }
}

/// Placeholder until token-based sessions exist; there is no server-side
/// state to tear down.
#[post("/logout")]
pub async fn api_logout() -> Json<MessageResponse> {
    Json(MessageResponse::new("success!"))
}

#[derive(Deserialize, Validate, Clone)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "username is required"))]
    username: String,
    #[validate(email(message = "email must be a valid address"))]
    email: String,
    #[validate(length(min = 1, message = "password is required"))]
    password: String,
}

#[post("/createuser", data = "<registration>")]
pub async fn api_create_user(
    registration: Json<CreateUserRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<UserView>, Custom<Json<MessageResponse>>> {
    if let Err(errors) = registration.validate() {
        return Err(Custom(
            Status::BadRequest,
            Json(MessageResponse::new(&errors.to_string())),
        ));
    }

    let user = create_user(
        db,
        &registration.username,
        &registration.email,
        &registration.password,
    )
    .await
    .map_err(|e| {
        let status = e.to_status_with_log("POST /createuser");
        let message = if status == Status::Conflict {
            "email already exists"
        } else {
            "could not create user"
        };
        Custom(status, Json(MessageResponse::new(message)))
    })?;

    Ok(Json(UserView::from(user)))
}

fn dog_not_found() -> Custom<Json<MessageResponse>> {
    Custom(
        Status::BadRequest,
        Json(MessageResponse::new("Dog Not Found")),
    )
}

fn dog_response(
    profile: &DogProfile,
) -> Result<Json<Record>, Custom<Json<MessageResponse>>> {
    match project(profile) {
        Ok(record) => Ok(Json(record)),
        Err(e) => Err(Custom(
            e.to_status_with_log("Projecting dog record"),
            Json(MessageResponse::new("could not serialize dog")),
        )),
    }
}

#[get("/dog/<dog_id>")]
pub async fn api_get_dog(
    dog_id: i64,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Record>, Custom<Json<MessageResponse>>> {
    match get_dog_profile(db, dog_id).await {
        Ok(profile) => dog_response(&profile),
        Err(AppError::NotFound(_)) => Err(dog_not_found()),
        Err(e) => Err(Custom(
            e.to_status_with_log("GET /dog"),
            Json(MessageResponse::new("could not fetch dog")),
        )),
    }
}

#[derive(Deserialize, Validate, Clone)]
pub struct DogPayload {
    #[serde(default)]
    dog_id: Option<i64>,
    #[validate(length(min = 1, message = "dog_name is required"))]
    dog_name: String,
    owner_id: i64,
    breed_id: i64,
    #[validate(range(min = 0, message = "age cannot be negative"))]
    age: i64,
    #[validate(length(min = 1, message = "sex is required"))]
    sex: String,
    is_vaccinated: bool,
    is_fixed: bool,
}

/// Create-or-update. A payload with `dog_id` edits that dog; without one,
/// a new dog is inserted. Both paths answer with the dog joined to its
/// owner and breed.
#[post("/dog", data = "<payload>")]
pub async fn api_post_dog(
    payload: Json<DogPayload>,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<Record>, Custom<Json<MessageResponse>>> {
    if let Err(errors) = payload.validate() {
        return Err(Custom(
            Status::BadRequest,
            Json(MessageResponse::new(&errors.to_string())),
        ));
    }

    let dog_id = match payload.dog_id {
        Some(dog_id) => {
            let updated = update_dog(
                db,
                dog_id,
                &payload.dog_name,
                payload.owner_id,
                payload.breed_id,
                payload.age,
                &payload.sex,
                payload.is_vaccinated,
                payload.is_fixed,
            )
            .await;

            match updated {
                Ok(()) => dog_id,
                Err(AppError::NotFound(_)) => return Err(dog_not_found()),
                Err(e) => {
                    return Err(Custom(
                        e.to_status_with_log("POST /dog (update)"),
                        Json(MessageResponse::new("could not update dog")),
                    ));
                }
            }
        }
        None => create_dog(
            db,
            &payload.dog_name,
            payload.owner_id,
            payload.breed_id,
            payload.age,
            &payload.sex,
            payload.is_vaccinated,
            payload.is_fixed,
        )
        .await
        .map_err(|e| {
            Custom(
                e.to_status_with_log("POST /dog (create)"),
                Json(MessageResponse::new("could not create dog")),
            )
        })?,
    };

    match get_dog_profile(db, dog_id).await {
        Ok(profile) => dog_response(&profile),
        Err(AppError::NotFound(_)) => Err(dog_not_found()),
        Err(e) => Err(Custom(
            e.to_status_with_log("POST /dog (re-read)"),
            Json(MessageResponse::new("could not fetch dog")),
        )),
    }
}

#[get("/health")]
pub fn health() -> &'static str {
    "OK"
}
