use serde::{Deserialize, Serialize};

/// Body of `POST /apps`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewApp {
    pub name: String,
    pub platform: String,
}

/// Body of `POST /users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password: String,
}

/// Body of `POST /users/{email}/tokens`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub password: String,
}

/// Response of `POST /users/{email}/tokens`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub token: String,
}

/// Body of `POST /teams`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTeam {
    pub name: String,
}

/// Body of `POST /users/keys` and `DELETE /users/keys`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicKey {
    pub key: String,
}

/// Response of `GET /apps/{name}`.
///
/// Older servers capitalise field names (`Name`, `Repository`), so both
/// spellings are accepted. Only `repository` is needed by the deploy flow;
/// everything else is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppInfo {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Platform", alias = "Framework")]
    pub platform: Option<String>,
    #[serde(alias = "Repository")]
    pub repository: String,
    #[serde(default, alias = "Teams")]
    pub teams: Vec<String>,
}
