use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::AppError;

/// The flat external representation of an entity: field name to value.
pub type Record = Map<String, Value>;

/// Converts an entity into a flat record of its declared fields. Unset
/// optional fields are kept as explicit nulls rather than dropped, and
/// fields marked as non-serializable (the password hash) never appear.
pub fn project<T: Serialize>(entity: &T) -> Result<Record, AppError> {
    match serde_json::to_value(entity) {
        Ok(Value::Object(record)) => Ok(record),
        Ok(_) => Err(AppError::Internal(
            "Projected entity did not serialize to an object".to_string(),
        )),
        Err(e) => Err(AppError::Internal(format!("Projection failed: {}", e))),
    }
}

/// Projects each entity in turn, preserving input order.
pub fn project_many<T: Serialize>(entities: &[T]) -> Result<Vec<Record>, AppError> {
    entities.iter().map(project).collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::Value;

    use super::{project, project_many};
    use crate::models::{Breed, User};

    fn sample_user() -> User {
        User {
            user_id: 7,
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
            name: None,
            age: Some(34),
            gender: None,
            user_pic: None,
            user_bio: None,
            max_distance: None,
            zipcode: Some("02139".to_string()),
            creation_time: Utc::now(),
            last_update: None,
        }
    }

    #[test]
    fn test_project_never_exposes_password_hash() {
        let record = project(&sample_user()).expect("Failed to project user");

        assert!(!record.contains_key("password_hash"));
        assert!(!record.contains_key("password"));
        assert_eq!(record["username"], Value::from("alice"));
        assert_eq!(record["email"], Value::from("alice@x.com"));
    }

    #[test]
    fn test_project_keeps_unset_fields_as_null() {
        let record = project(&sample_user()).unwrap();

        assert_eq!(record["name"], Value::Null);
        assert_eq!(record["last_update"], Value::Null);
        assert_eq!(record["age"], Value::from(34));
    }

    #[test]
    fn test_project_many_preserves_order() {
        let breeds = vec![
            Breed {
                breed_id: 1,
                breed_name: "Corgi".to_string(),
            },
            Breed {
                breed_id: 2,
                breed_name: "Husky".to_string(),
            },
            Breed {
                breed_id: 3,
                breed_name: "Poodle".to_string(),
            },
        ];

        let records = project_many(&breeds).expect("Failed to project breeds");

        assert_eq!(records.len(), 3);
        let names: Vec<&Value> = records.iter().map(|r| &r["breed_name"]).collect();
        assert_eq!(names, vec!["Corgi", "Husky", "Poodle"]);
    }
}
