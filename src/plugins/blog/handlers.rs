use axum::extract::rejection::FormRejection;
use axum::extract::{Path, Query};
use axum::response::{Html, Redirect};
use axum::{Extension, Form};
use minijinja::context;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::StoreError;
use crate::http_error::PageError;
use crate::plugins::blog::models::{Blog, BlogForm, ListQuery, NewBlog};
use crate::plugins::blog::repo::DynBlogStore;
use crate::views::Views;

pub const LISTING: &str = "/blogs";

/// Banner text for the `error` codes failed requests redirect with.
pub fn flash_message(code: &str) -> Option<&'static str> {
    match code {
        "not_found" => Some("That blog post could not be found."),
        "create_failed" => Some("Your blog post could not be saved. Please try again."),
        "update_failed" => Some("Your changes could not be saved. Please try again."),
        "delete_failed" => Some("The blog post could not be deleted. Please try again."),
        "store_unavailable" => Some("Blog posts are unavailable right now."),
        _ => None,
    }
}

// Ids that do not parse cannot resolve to a record.
fn parse_id(raw: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(raw).map_err(|_| StoreError::NotFound)
}

fn rejected(e: FormRejection, code: &str) -> PageError {
    PageError::redirect(LISTING, format!("unreadable blog form: {e}")).with_code(code)
}

async fn find(store: &DynBlogStore, raw: &str) -> Result<Blog, StoreError> {
    let id = parse_id(raw)?;
    store.get_by_id(id).await
}

pub async fn index(
    Extension(store): Extension<DynBlogStore>,
    Extension(views): Extension<Arc<Views>>,
    query: Option<Query<ListQuery>>,
) -> Result<Html<String>, PageError> {
    // A query string that does not parse just means no banner.
    let q = query.map(|Query(q)| q).unwrap_or_default();
    let mut flash = q.error.as_deref().and_then(flash_message);
    let blogs = match store.list_all().await {
        Ok(blogs) => blogs,
        Err(e) => {
            tracing::error!("listing blogs failed: {e}");
            flash = flash_message("store_unavailable");
            Vec::new()
        }
    };
    Ok(views.render("index.html", context! { blogs => blogs, flash => flash })?)
}

pub async fn new_form(Extension(views): Extension<Arc<Views>>) -> Result<Html<String>, PageError> {
    Ok(views.render("new.html", context! {})?)
}

pub async fn create(
    Extension(store): Extension<DynBlogStore>,
    form: Result<Form<BlogForm>, FormRejection>,
) -> Result<Redirect, PageError> {
    let Form(form) = form.map_err(|e| rejected(e, "create_failed"))?;
    let fields = form.sanitized();
    let blog = store
        .create(NewBlog::from(fields))
        .await
        .map_err(|e| PageError::from_store(e, LISTING, "create_failed"))?;
    tracing::info!(id = %blog.id, "blog created");
    Ok(Redirect::to(LISTING))
}

pub async fn show(
    Extension(store): Extension<DynBlogStore>,
    Extension(views): Extension<Arc<Views>>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let blog = find(&store, &id)
        .await
        .map_err(|e| PageError::from_store(e, LISTING, "store_unavailable"))?;
    Ok(views.render("show.html", context! { blog => blog })?)
}

pub async fn edit_form(
    Extension(store): Extension<DynBlogStore>,
    Extension(views): Extension<Arc<Views>>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let blog = find(&store, &id)
        .await
        .map_err(|e| PageError::from_store(e, LISTING, "store_unavailable"))?;
    Ok(views.render("edit.html", context! { blog => blog })?)
}

pub async fn update(
    Extension(store): Extension<DynBlogStore>,
    Path(id): Path<String>,
    form: Result<Form<BlogForm>, FormRejection>,
) -> Result<Redirect, PageError> {
    let Form(form) = form.map_err(|e| rejected(e, "update_failed"))?;
    let fields = form.sanitized();
    let id = parse_id(&id).map_err(|e| PageError::from_store(e, LISTING, "update_failed"))?;
    let blog = store
        .update_by_id(id, fields)
        .await
        .map_err(|e| PageError::from_store(e, LISTING, "update_failed"))?;
    tracing::info!(id = %blog.id, "blog updated");
    Ok(Redirect::to(&format!("{LISTING}/{}", blog.id)))
}

pub async fn destroy(
    Extension(store): Extension<DynBlogStore>,
    Path(id): Path<String>,
) -> Result<Redirect, PageError> {
    let id = parse_id(&id).map_err(|e| PageError::from_store(e, LISTING, "delete_failed"))?;
    store
        .delete_by_id(id)
        .await
        .map_err(|e| PageError::from_store(e, LISTING, "delete_failed"))?;
    tracing::info!(%id, "blog deleted");
    Ok(Redirect::to(LISTING))
}
