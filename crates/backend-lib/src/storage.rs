// ============================
// backend-lib/src/storage.rs
// ============================
//! Storage abstraction with flat-file and in-memory implementations.
//!
//! Users are stored as whole documents with their sessions embedded; there
//! is no separate session table. Appending a session is a single storage
//! operation so concurrent logins for one user cannot overwrite each other.
use crate::auth::Session;
use crate::error::AppError;
use crate::user::{User, UserId};
use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::{fs as tokio_fs, sync::Mutex};

/// Trait for storage backends
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store a new user; fails with `EmailTaken` if the email is registered
    async fn insert_user(&self, user: &User) -> Result<(), AppError>;

    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Append a session to the stored user's list against the latest stored document
    async fn append_session(&self, id: &UserId, session: &Session) -> Result<(), AppError>;

    /// Find a user by id that owns a session for `refresh_token`
    async fn find_user_by_session_token(
        &self,
        id: &UserId,
        refresh_token: &str,
    ) -> Result<Option<User>, AppError> {
        Ok(self
            .find_user_by_id(id)
            .await?
            .filter(|user| user.session(refresh_token).is_some()))
    }
}

/// Flat-file implementation of the Storage trait.
///
/// Layout under `root`: `users/<id>.json` per user and `users/emails.json`
/// mapping emails to ids. Writes go through a temp file and a rename.
#[derive(Debug, Clone)]
pub struct FlatFileStorage {
    root: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FlatFileStorage {
    pub fn new<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("users"))?;
        Ok(Self {
            root,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn user_path(&self, id: &UserId) -> PathBuf {
        self.root.join("users").join(format!("{id}.json"))
    }

    fn index_path(&self) -> PathBuf {
        self.root.join("users").join("emails.json")
    }

    async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, AppError> {
        match tokio_fs::read_to_string(path).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(value)?;
        let tmp = path.with_extension("json.tmp");
        tokio_fs::write(&tmp, json).await?;
        tokio_fs::rename(&tmp, path).await?;
        Ok(())
    }

    async fn read_index(&self) -> Result<HashMap<String, UserId>, AppError> {
        Ok(Self::read_json(&self.index_path()).await?.unwrap_or_default())
    }
}

#[async_trait]
impl Storage for FlatFileStorage {
    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;

        let mut index = self.read_index().await?;
        if index.contains_key(&user.email) {
            return Err(AppError::EmailTaken);
        }

        Self::write_json(&self.user_path(&user.id), user).await?;
        index.insert(user.email.clone(), user.id);
        Self::write_json(&self.index_path(), &index).await?;
        Ok(())
    }

    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, AppError> {
        Self::read_json(&self.user_path(id)).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let index = self.read_index().await?;
        match index.get(email) {
            Some(id) => self.find_user_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn append_session(&self, id: &UserId, session: &Session) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;

        let path = self.user_path(id);
        let mut user: User = Self::read_json(&path)
            .await?
            .ok_or_else(|| AppError::Persistence(format!("user {id} not found")))?;
        user.sessions.push(session.clone());
        Self::write_json(&path, &user).await
    }
}

/// In-memory implementation of the Storage trait
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    users: Arc<DashMap<UserId, User>>,
    emails: Arc<DashMap<String, UserId>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        match self.emails.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(AppError::EmailTaken),
            Entry::Vacant(slot) => {
                self.users.insert(user.id, user.clone());
                slot.insert(user.id);
                Ok(())
            },
        }
    }

    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, AppError> {
        Ok(self.users.get(id).map(|user| user.clone()))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let Some(id) = self.emails.get(email).map(|id| *id) else {
            return Ok(None);
        };
        self.find_user_by_id(&id).await
    }

    async fn append_session(&self, id: &UserId, session: &Session) -> Result<(), AppError> {
        match self.users.get_mut(id) {
            Some(mut user) => {
                user.sessions.push(session.clone());
                Ok(())
            },
            None => Err(AppError::Persistence(format!("user {id} not found"))),
        }
    }
}
