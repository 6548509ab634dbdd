use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::sublist::{OwnedEntry, SubEntry};

/// A post with its author's name/avatar snapshotted at creation time, so
/// feeds render without touching the users table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub likes: Json<Vec<Like>>,
    pub comments: Json<Vec<Comment>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Like {
    pub id: Uuid,
    pub user: Uuid,
}

impl Like {
    pub fn by(user: Uuid) -> Self {
        Self { id: Uuid::new_v4(), user }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: Uuid,
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

impl SubEntry for Like {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl OwnedEntry for Like {
    fn owner(&self) -> Uuid {
        self.user
    }
}

impl SubEntry for Comment {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl OwnedEntry for Comment {
    fn owner(&self) -> Uuid {
        self.user
    }
}
