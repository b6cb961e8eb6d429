use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::plugins::blog::sanitize::sanitize_body;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, FromRow)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub image: String,
    pub body: String,
    pub created: DateTime<Utc>,
}

/// Input to `BlogStore::create`. `created` falls back to the store's clock.
#[derive(Debug, Clone, Default)]
pub struct NewBlog {
    pub title: String,
    pub image: String,
    pub body: String,
    pub created: Option<DateTime<Utc>>,
}

/// Replacement values for an update; `id` and `created` are never touched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogFields {
    pub title: String,
    pub image: String,
    pub body: String,
}

impl From<BlogFields> for NewBlog {
    fn from(fields: BlogFields) -> Self {
        Self {
            title: fields.title,
            image: fields.image,
            body: fields.body,
            created: None,
        }
    }
}

/// The `blog[...]` grouped fields posted by the new and edit forms.
#[derive(Deserialize, Debug, Default)]
pub struct BlogForm {
    #[serde(rename = "blog[title]", default)]
    pub title: String,
    #[serde(rename = "blog[image]", default)]
    pub image: String,
    #[serde(rename = "blog[body]", default)]
    pub body: String,
}

impl BlogForm {
    /// Only the body is sanitized; title and image are kept verbatim.
    pub fn sanitized(self) -> BlogFields {
        BlogFields {
            title: self.title,
            image: self.image,
            body: sanitize_body(&self.body),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct ListQuery {
    pub error: Option<String>,
}
