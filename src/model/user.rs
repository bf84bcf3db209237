use serde::{Deserialize, Serialize};

/// Account row for the login gate. Staff members are a separate table;
/// an account is just an operator identity.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub password: String,
}
