use sqlx::FromRow;

/// The slice of a user row needed to check a password.
#[derive(Debug, FromRow)]
pub(crate) struct Credentials {
    pub id: i64,
    pub hashed_password: String, // PHC string, never leaves the crate
}
