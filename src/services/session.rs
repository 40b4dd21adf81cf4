use std::{
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use tokio::fs;
use tracing::{info, warn};

use crate::{
    error::AppError,
    models::session::{SessionRecord, SessionUser},
};

/// Read side of the session: who is signed in right now, if anyone.
pub trait SessionProvider {
    fn current_user(&self) -> Option<SessionUser>;

    fn current_user_id(&self) -> Option<i64> {
        self.current_user().map(|user| user.user_id)
    }
}

/// Session persisted as a single JSON blob at `path`, mirrored in memory so
/// reads never touch the disk.
#[derive(Clone)]
pub struct SessionStore {
    path: Arc<PathBuf>,
    current: Arc<RwLock<Option<SessionRecord>>>,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path: Arc::new(path),
            current: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the blob from disk. A missing, empty or unreadable blob leaves
    /// the store signed out.
    pub async fn load(&self) -> Result<Option<SessionUser>, AppError> {
        let record = if fs::try_exists(self.path()).await? {
            let raw = fs::read(self.path()).await?;
            if raw.is_empty() {
                None
            } else {
                match serde_json::from_slice::<SessionRecord>(&raw) {
                    Ok(record) => Some(record),
                    Err(err) => {
                        warn!("ignoring invalid session blob at {}: {err}", self.path().display());
                        None
                    }
                }
            }
        } else {
            None
        };

        let user = record.as_ref().and_then(SessionRecord::to_user);
        self.replace(record.filter(|_| user.is_some()));
        Ok(user)
    }

    pub async fn sign_in(&self, record: SessionRecord) -> Result<SessionUser, AppError> {
        let user = record
            .to_user()
            .ok_or_else(|| AppError::BadRequest("session needs a user id and a token".into()))?;
        if let Some(parent) = self.path().parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let data = serde_json::to_vec_pretty(&record)?;
        fs::write(self.path(), data).await?;
        self.replace(Some(record));
        info!(user_id = user.user_id, "signed in");
        Ok(user)
    }

    pub async fn sign_out(&self) -> Result<(), AppError> {
        if fs::try_exists(self.path()).await? {
            fs::remove_file(self.path()).await?;
        }
        let previous = self.current_user_id();
        self.replace(None);
        if let Some(user_id) = previous {
            info!(user_id, "signed out");
        }
        Ok(())
    }

    fn replace(&self, record: Option<SessionRecord>) {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = record;
    }
}

impl SessionProvider for SessionStore {
    fn current_user(&self) -> Option<SessionUser> {
        let guard = self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.as_ref().and_then(SessionRecord::to_user)
    }
}
