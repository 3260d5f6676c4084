//! Pass-through delivery of the dashboard page and its static files.
//!
//! Nothing is bundled into the binary. The page lives in a directory on
//! disk:
//!
//! ```text
//! assets/
//! ├── index.html        ← served at `/`, `{{ .Title }}` replaced
//! └── static/
//!     ├── app.js        ← served at `/static/app.js`
//!     └── style.css
//! ```

use std::path::{Component, Path, PathBuf};

use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};

/// Placeholder in `index.html` that is replaced with the page title.
const TITLE_PLACEHOLDER: &str = "{{ .Title }}";

/// Where the dashboard page lives and what title it shows.
#[derive(Debug, Clone)]
pub struct AssetConfig {
    /// Directory holding `index.html` and `static/`.
    pub dir: PathBuf,

    /// Substituted for `{{ .Title }}` in `index.html`.
    pub title: String,
}

pub(crate) async fn index(assets: Option<&AssetConfig>) -> Response {
    let Some(assets) = assets else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match tokio::fs::read_to_string(assets.dir.join("index.html")).await {
        Ok(page) => {
            Html(page.replace(TITLE_PLACEHOLDER, &escape_html(&assets.title)))
                .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "index.html unavailable");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

pub(crate) async fn static_file(
    assets: Option<&AssetConfig>,
    file: &str,
) -> Response {
    let Some(assets) = assets else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let Some(relative) = safe_relative(file) else {
        tracing::debug!(file, "rejected static path");
        return StatusCode::NOT_FOUND.into_response();
    };

    let path = assets.dir.join("static").join(relative);
    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.to_string())], bytes).into_response()
        }
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Accepts only plain relative paths: no `..`, no root, no drive prefix.
fn safe_relative(file: &str) -> Option<&Path> {
    let path = Path::new(file);
    let mut components = path.components().peekable();
    components.peek()?;
    components
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        .then_some(path)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
