use serde::{Deserialize, Serialize};

/// One row of the hosted users collection, linked to an identity by `uid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub uid: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub telephone: String,
}

/// Profile payload for creation; the store assigns the `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProfile {
    pub uid: String,
    pub email: String,
    pub name: String,
    pub lastname: String,
    pub avatar: String,
    pub telephone: String,
}
