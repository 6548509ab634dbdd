use axum::extract::Path;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::{Education, Experience, Owner, Profile, Social};
use crate::database::store::{PostStore, ProfileFields, ProfileStore, UserStore};
use crate::database::parse_id;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, AuthUser};
use crate::sublist;
use crate::validate::{split_skills, FieldErrors};

/// Profile response enriched with the owner's display name and avatar
#[derive(Debug, Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: Profile,
    pub user: Owner,
}

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    /// Comma-separated, e.g. "rust, sql, axum"
    pub skills: Option<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExperienceRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EducationRequest {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub fieldofstudy: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

/// GET /api/profile/me - the authenticated user's profile
pub async fn me(Extension(auth_user): Extension<AuthUser>) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let profile = ProfileStore::new(pool.clone())
        .find_by_user(auth_user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("no profile for this user"))?;

    let view = with_owner(&UserStore::new(pool), profile).await?;
    Ok(ApiResponse::success(view))
}

/// POST /api/profile - create or update the caller's profile (upsert keyed
/// by the owning identity)
pub async fn upsert(
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<ProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut fields = FieldErrors::new();
    fields.require("status", payload.status.as_deref(), "Status is required");
    fields.require("skills", payload.skills.as_deref(), "Skills is required");
    fields.into_result()?;

    let profile_fields = ProfileFields {
        company: payload.company,
        website: payload.website,
        location: payload.location,
        status: payload.status.unwrap_or_default(),
        skills: split_skills(&payload.skills.unwrap_or_default()),
        bio: payload.bio,
        githubusername: payload.githubusername,
        social: Social {
            youtube: payload.youtube,
            twitter: payload.twitter,
            facebook: payload.facebook,
            linkedin: payload.linkedin,
            instagram: payload.instagram,
        },
    };

    let pool = DatabaseManager::pool().await?;
    let profile = ProfileStore::new(pool)
        .upsert(auth_user.id, profile_fields)
        .await?;

    Ok(ApiResponse::success(profile))
}

/// GET /api/profile - all profiles, with owner name/avatar
pub async fn list() -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let profiles = ProfileStore::new(pool.clone()).list().await?;

    let owner_ids: Vec<Uuid> = profiles.iter().map(|p| p.user_id).collect();
    let owners = UserStore::new(pool).find_ids(&owner_ids).await?;

    let views: Vec<ProfileView> = profiles
        .into_iter()
        .filter_map(|profile| {
            owners
                .iter()
                .find(|u| u.id == profile.user_id)
                .map(|u| ProfileView { profile, user: Owner::from(u) })
        })
        .collect();

    Ok(ApiResponse::success(views))
}

/// GET /api/profile/user/:user_id - profile by owner id; malformed or unknown
/// ids both read as not found
pub async fn by_user(Path(user_id): Path<String>) -> Result<impl IntoResponse, ApiError> {
    let user_id = parse_id(&user_id)?;

    let pool = DatabaseManager::pool().await?;
    let profile = ProfileStore::new(pool.clone())
        .find_by_user(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("no matching profile found"))?;

    let view = with_owner(&UserStore::new(pool), profile).await?;
    Ok(ApiResponse::success(view))
}

/// DELETE /api/profile - remove the caller's profile, posts, and account
pub async fn delete_account(
    Extension(auth_user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;

    PostStore::new(pool.clone()).delete_by_user(auth_user.id).await?;
    ProfileStore::new(pool.clone()).delete_by_user(auth_user.id).await?;
    UserStore::new(pool).delete(auth_user.id).await?;

    Ok(ApiResponse::success(json!({ "msg": "user removed successfully" })))
}

/// PUT /api/profile/experience - prepend a work-experience entry
pub async fn add_experience(
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<ExperienceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut fields = FieldErrors::new();
    fields.require("title", payload.title.as_deref(), "Title is required");
    fields.require("company", payload.company.as_deref(), "Company is required");
    let from_date = require_date(
        &mut fields,
        "from",
        payload.from.as_deref(),
        "From date is required",
    );
    let to_date = optional_date(&mut fields, "to", payload.to.as_deref());
    fields.into_result()?;

    let entry = Experience {
        id: Uuid::new_v4(),
        title: payload.title.unwrap_or_default(),
        company: payload.company.unwrap_or_default(),
        location: payload.location,
        from_date: from_date.unwrap_or_default(),
        to_date,
        current: payload.current,
        description: payload.description,
    };

    let pool = DatabaseManager::pool().await?;
    let store = ProfileStore::new(pool);

    let profile = store
        .find_by_user(auth_user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("no profile for this user"))?;

    let mut experience = profile.experience.0;
    sublist::add_front(&mut experience, entry);

    let profile = store.save_experience(auth_user.id, experience).await?;
    Ok(ApiResponse::success(profile))
}

/// DELETE /api/profile/experience/:exp_id - remove by entry id; a miss is a
/// silent no-op, not an error
pub async fn remove_experience(
    Extension(auth_user): Extension<AuthUser>,
    Path(exp_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let exp_id = parse_id(&exp_id)?;

    let pool = DatabaseManager::pool().await?;
    let store = ProfileStore::new(pool);

    let profile = store
        .find_by_user(auth_user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("no profile for this user"))?;

    let mut experience = profile.experience.0;
    // A miss leaves the list untouched
    let _ = sublist::remove_first_matching(&mut experience, |e| e.id == exp_id);

    let profile = store.save_experience(auth_user.id, experience).await?;
    Ok(ApiResponse::success(profile))
}

/// PUT /api/profile/education - prepend an education entry
pub async fn add_education(
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<EducationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut fields = FieldErrors::new();
    fields.require("school", payload.school.as_deref(), "School is required");
    fields.require("degree", payload.degree.as_deref(), "Degree is required");
    fields.require(
        "fieldofstudy",
        payload.fieldofstudy.as_deref(),
        "Field of study is required",
    );
    let from_date = require_date(
        &mut fields,
        "from",
        payload.from.as_deref(),
        "From date is required",
    );
    let to_date = optional_date(&mut fields, "to", payload.to.as_deref());
    fields.into_result()?;

    let entry = Education {
        id: Uuid::new_v4(),
        school: payload.school.unwrap_or_default(),
        degree: payload.degree.unwrap_or_default(),
        fieldofstudy: payload.fieldofstudy.unwrap_or_default(),
        from_date: from_date.unwrap_or_default(),
        to_date,
        current: payload.current,
        description: payload.description,
    };

    let pool = DatabaseManager::pool().await?;
    let store = ProfileStore::new(pool);

    let profile = store
        .find_by_user(auth_user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("no profile for this user"))?;

    let mut education = profile.education.0;
    sublist::add_front(&mut education, entry);

    let profile = store.save_education(auth_user.id, education).await?;
    Ok(ApiResponse::success(profile))
}

/// DELETE /api/profile/education/:edu_id - remove by entry id; silent no-op
/// on miss
pub async fn remove_education(
    Extension(auth_user): Extension<AuthUser>,
    Path(edu_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let edu_id = parse_id(&edu_id)?;

    let pool = DatabaseManager::pool().await?;
    let store = ProfileStore::new(pool);

    let profile = store
        .find_by_user(auth_user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("no profile for this user"))?;

    let mut education = profile.education.0;
    // A miss leaves the list untouched
    let _ = sublist::remove_first_matching(&mut education, |e| e.id == edu_id);

    let profile = store.save_education(auth_user.id, education).await?;
    Ok(ApiResponse::success(profile))
}

async fn with_owner(users: &UserStore, profile: Profile) -> Result<ProfileView, ApiError> {
    let owner = users
        .find_by_id(profile.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("no matching profile found"))?;

    Ok(ProfileView {
        profile,
        user: Owner::from(&owner),
    })
}

fn require_date(
    fields: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    message: &str,
) -> Option<NaiveDate> {
    match value {
        None => {
            fields.add(field, message);
            None
        }
        Some(raw) => parse_date(fields, field, raw),
    }
}

fn optional_date(fields: &mut FieldErrors, field: &str, value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(|raw| parse_date(fields, field, raw))
}

fn parse_date(fields: &mut FieldErrors, field: &str, raw: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            fields.add(field, "Invalid date, expected YYYY-MM-DD");
            None
        }
    }
}
