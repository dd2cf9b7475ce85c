//! Example publishing workflow.
//!
//! A soft-deletable `Post` declares a custom `publishing` / `published` event
//! pair. The workflow fires them around the save that flips the post's
//! status, so before/after hooks can guard and audit publication the same way
//! they do standard lifecycle events.

use bookend_model::prelude::*;
use serde_json::Value;

/// Model class of blog posts.
pub struct Post;

impl ModelClass for Post {
    const TABLE: &'static str = "posts";
    const SOFT_DELETES: bool = true;
    const EVENTS: &'static [&'static str] = &["publishing", "published"];

    fn boot() {
        Model::<Self>::before_saving(|post: &mut Model<Self>| {
            if let Some(title) = post.get_str("title") {
                let slug = slugify(title);
                post.set("slug", slug);
            }
        });
    }
}

/// Records of blog posts.
pub type PostModel = Model<Post>;

/// Status of a post that went through [`publish`].
pub const PUBLISHED: &str = "published";

/// Turns a title into a URL slug.
#[must_use]
pub fn slugify(title: &str) -> String {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Guards publication: posts without a body never publish.
pub fn register_publication_hooks() {
    PostModel::before_event("publishing", |post: &mut PostModel| {
        let has_body = post
            .get_str("body")
            .is_some_and(|body| !body.trim().is_empty());
        if !has_body {
            tracing::warn!(title = ?post.get_str("title"), "refusing to publish post without body");
        }
        has_body
    });

    PostModel::after_event("published", |post: &mut PostModel| {
        tracing::info!(id = ?post.id(), slug = ?post.get_str("slug"), "post published");
    });
}

/// Publishes `post`.
///
/// Returns `false` when a `publishing` listener vetoed or the save did not go
/// through.
///
/// # Errors
///
/// Propagates listener errors.
pub fn publish(post: &mut PostModel, store: &MemoryStore) -> Result<bool, ModelError> {
    if post.fire_event("publishing", true)?.is_stop() {
        return Ok(false);
    }

    post.set("status", PUBLISHED);
    if !post.save(store)? {
        return Ok(false);
    }

    post.fire_event("published", false)?;
    Ok(true)
}

/// Checks whether `post` has been published.
#[must_use]
pub fn is_published(post: &PostModel) -> bool {
    post.get("status") == Some(&Value::from(PUBLISHED))
}
