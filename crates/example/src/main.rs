//! Example publishing CLI.
//!
//! Creates one post per argument and tries to publish each. Arguments take
//! the form `title` or `title=body`; posts without a body are refused by the
//! `beforePublishing` hook.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=debug publish "Hello World=First post" "Draft"
//! ```

use bookend_core::TracingSetup;
use bookend_model::prelude::*;
use example::{PostModel, publish, register_publication_hooks};
use serde_json::json;

fn main() {
    let _ = dotenvy::dotenv();
    TracingSetup::from_env().init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        args = vec!["Hello World=First post".to_string(), "Draft".to_string()];
    }

    register_publication_hooks();
    let store = MemoryStore::new();

    for arg in &args {
        let (title, body) = arg.split_once('=').unwrap_or((arg.as_str(), ""));

        let result = PostModel::create(&store, [("title", json!(title)), ("body", json!(body))])
            .and_then(|mut post| publish(&mut post, &store).map(|published| (post, published)));

        match result {
            Ok((post, true)) => {
                tracing::info!(id = ?post.id(), title, "published");
            }
            Ok((_, false)) => tracing::warn!(title, "not published"),
            Err(err) => {
                tracing::error!(title, error = %err, "publishing failed");
                std::process::exit(1);
            }
        }
    }

    tracing::info!(posts = PostModel::count(&store), "done");
}
