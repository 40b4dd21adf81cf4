use serde::{Deserialize, Serialize};

/// The blob persisted under the session key. Older clients wrote `id` and
/// `accessToken`, newer ones `userId` and `token`, and some blobs carry both
/// spellings at once. `userId` and `token` win when both are present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl SessionRecord {
    /// A record is only a session when it names a user and carries a token.
    pub fn to_user(&self) -> Option<SessionUser> {
        let user_id = self.user_id.or(self.id)?;
        let token = [&self.token, &self.access_token]
            .into_iter()
            .filter_map(|t| t.as_deref().map(str::trim))
            .find(|t| !t.is_empty())?;
        Some(SessionUser {
            user_id,
            token: token.to_string(),
            name: self.name.clone(),
            email: self.email.clone(),
            picture: self.picture.clone(),
        })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub user_id: i64,
    #[serde(skip_serializing)]
    pub token: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
}
