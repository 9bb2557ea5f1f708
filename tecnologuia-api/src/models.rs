use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::schema::{areas, comments, contents, users};

// --- Users ---

#[derive(Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub occupation: Option<String>,
    pub bio: Option<String>,
    pub role: String,
    pub reset_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Partial profile update. `None` fields are left untouched.
/// Length limits mirror the column sizes in `db_init`.
#[derive(Debug, Default, AsChangeset, Validate)]
#[diesel(table_name = users)]
pub struct ProfileChanges {
    #[validate(length(max = 255, message = "name must be at most 255 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 50, message = "phone must be at most 50 characters"))]
    pub phone: Option<String>,
    #[validate(length(max = 255, message = "location must be at most 255 characters"))]
    pub location: Option<String>,
    #[validate(length(max = 255, message = "occupation must be at most 255 characters"))]
    pub occupation: Option<String>,
    pub bio: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.location.is_none()
            && self.occupation.is_none()
            && self.bio.is_none()
    }
}

/// Public view of a user. Never carries the password hash or reset digest.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub occupation: Option<String>,
    pub bio: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            phone: u.phone,
            location: u.location,
            occupation: u.occupation,
            bio: u.bio,
            role: u.role,
            created_at: u.created_at,
        }
    }
}

// --- Areas ---

#[derive(Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name = areas)]
pub struct Area {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub video_link: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub video_link: String,
}

impl From<Area> for AreaResponse {
    fn from(a: Area) -> Self {
        Self {
            id: a.id,
            name: a.name,
            description: a.description.unwrap_or_default(),
            video_link: a.video_link.unwrap_or_default(),
        }
    }
}

// --- Comments ---

#[derive(Debug, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = comments)]
#[diesel(belongs_to(User))]
#[diesel(belongs_to(Area))]
pub struct Comment {
    pub id: i32,
    pub content: String,
    pub user_id: i32,
    pub area_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = comments)]
pub struct NewComment {
    pub content: String,
    pub user_id: i32,
    pub area_id: i32,
}

/// A comment joined with its author's name, as the forum page renders it.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommentView {
    pub id: i32,
    pub content: String,
    #[serde(rename = "userId")]
    pub user_id: i32,
    #[serde(rename = "areaId")]
    pub area_id: i32,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub user_name: String,
}

impl CommentView {
    pub fn new(comment: Comment, user_name: String) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            user_id: comment.user_id,
            area_id: comment.area_id,
            created_at: comment.created_at,
            user_name,
        }
    }
}

// --- Contents ---

#[derive(Debug, Queryable, Selectable, Identifiable, Serialize, Deserialize)]
#[diesel(table_name = contents)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, Validate)]
#[diesel(table_name = contents)]
pub struct NewContent {
    #[validate(length(max = 255, message = "title must be at most 255 characters"))]
    pub title: String,
    #[validate(length(max = 100, message = "category must be at most 100 characters"))]
    pub category: String,
}
