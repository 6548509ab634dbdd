//! Typed stores over the shared pool. Sub-entry lists (likes, comments,
//! experience, education) are JSONB columns written whole: every edit is a
//! read-modify-write of the parent row, last writer wins.

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Comment, Education, Experience, Like, Post, Profile, Social, User};

pub struct UserStore {
    pool: PgPool,
}

impl UserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        name: &str,
        email: &str,
        password_digest: &str,
        avatar: &str,
    ) -> Result<User, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password, avatar)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(password_digest)
        .bind(avatar)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, DatabaseError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let users = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Upsert payload for the profile row; experience/education are untouched
/// by an upsert and edited through their own save calls.
#[derive(Debug)]
pub struct ProfileFields {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub social: Social,
}

pub struct ProfileStore {
    pool: PgPool,
}

impl ProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, DatabaseError> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }

    pub async fn list(&self) -> Result<Vec<Profile>, DatabaseError> {
        let profiles =
            sqlx::query_as::<_, Profile>("SELECT * FROM profiles ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(profiles)
    }

    /// Create or update the profile owned by `user_id` (upsert keyed by owner).
    pub async fn upsert(
        &self,
        user_id: Uuid,
        fields: ProfileFields,
    ) -> Result<Profile, DatabaseError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles
                (id, user_id, company, website, location, status, skills, bio, githubusername, social)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (user_id) DO UPDATE SET
                company = EXCLUDED.company,
                website = EXCLUDED.website,
                location = EXCLUDED.location,
                status = EXCLUDED.status,
                skills = EXCLUDED.skills,
                bio = EXCLUDED.bio,
                githubusername = EXCLUDED.githubusername,
                social = EXCLUDED.social
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(fields.company)
        .bind(fields.website)
        .bind(fields.location)
        .bind(fields.status)
        .bind(fields.skills)
        .bind(fields.bio)
        .bind(fields.githubusername)
        .bind(Json(fields.social))
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }

    pub async fn save_experience(
        &self,
        user_id: Uuid,
        experience: Vec<Experience>,
    ) -> Result<Profile, DatabaseError> {
        let profile = sqlx::query_as::<_, Profile>(
            "UPDATE profiles SET experience = $2 WHERE user_id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(Json(experience))
        .fetch_one(&self.pool)
        .await?;
        Ok(profile)
    }

    pub async fn save_education(
        &self,
        user_id: Uuid,
        education: Vec<Education>,
    ) -> Result<Profile, DatabaseError> {
        let profile = sqlx::query_as::<_, Profile>(
            "UPDATE profiles SET education = $2 WHERE user_id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(Json(education))
        .fetch_one(&self.pool)
        .await?;
        Ok(profile)
    }

    pub async fn delete_by_user(&self, user_id: Uuid) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

pub struct PostStore {
    pool: PgPool,
}

impl PostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        user_id: Uuid,
        text: &str,
        name: &str,
        avatar: &str,
    ) -> Result<Post, DatabaseError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (id, user_id, text, name, avatar)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(text)
        .bind(name)
        .bind(avatar)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    pub async fn list(&self) -> Result<Vec<Post>, DatabaseError> {
        let posts = sqlx::query_as::<_, Post>("SELECT * FROM posts ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(posts)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Post>, DatabaseError> {
        let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn delete_by_user(&self, user_id: Uuid) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM posts WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn save_likes(&self, id: Uuid, likes: Vec<Like>) -> Result<Post, DatabaseError> {
        let post =
            sqlx::query_as::<_, Post>("UPDATE posts SET likes = $2 WHERE id = $1 RETURNING *")
                .bind(id)
                .bind(Json(likes))
                .fetch_one(&self.pool)
                .await?;
        Ok(post)
    }

    pub async fn save_comments(
        &self,
        id: Uuid,
        comments: Vec<Comment>,
    ) -> Result<Post, DatabaseError> {
        let post =
            sqlx::query_as::<_, Post>("UPDATE posts SET comments = $2 WHERE id = $1 RETURNING *")
                .bind(id)
                .bind(Json(comments))
                .fetch_one(&self.pool)
                .await?;
        Ok(post)
    }
}
