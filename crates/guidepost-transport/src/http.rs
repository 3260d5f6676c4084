//! Route table and request handlers.
//!
//! Handlers are deliberately thin: pull the path parameter or body out of
//! the request, call the [`Dispatch`] method, wrap the reply in `Json`.
//!
//! Extractors are taken as `Result` so that a rejected path segment or
//! body still answers with an envelope instead of axum's plain-text
//! 400/413.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use guidepost_protocol::{
    Codec, JsonCodec, LoginGrant, LoginRequest, NavigationDocument, Reply,
};

use crate::Dispatch;
use crate::assets::{self, AssetConfig};

/// Envelope code for a body that isn't valid JSON of the right shape.
const CODE_BAD_REQUEST: u16 = 400;

/// Envelope code for a credential or token that can't be matched.
const CODE_UNAUTHORIZED: u16 = 401;

/// Shared state handed to every handler.
///
/// Hand-written `Clone` because `D` itself needn't be `Clone`; only the
/// `Arc` is cloned.
pub(crate) struct HttpState<D> {
    pub(crate) dispatch: Arc<D>,
    pub(crate) assets: Option<Arc<AssetConfig>>,
}

impl<D> Clone for HttpState<D> {
    fn clone(&self) -> Self {
        Self {
            dispatch: Arc::clone(&self.dispatch),
            assets: self.assets.clone(),
        }
    }
}

/// Builds the full route table over `dispatch`.
///
/// Pass `None` for `assets` to run API-only; `/` and `/static/*` then
/// answer 404.
pub fn router<D: Dispatch>(
    dispatch: Arc<D>,
    assets: Option<AssetConfig>,
) -> Router {
    let state = HttpState {
        dispatch,
        assets: assets.map(Arc::new),
    };

    Router::new()
        .route("/", get(index::<D>))
        .route("/static/{*file}", get(static_file::<D>))
        .route("/home", get(home::<D>))
        .route("/login", post(login_body::<D>))
        .route("/login/{credential}", get(login_path::<D>))
        .route("/save", post(save_without_token::<D>))
        .route("/save/", post(save_without_token::<D>))
        .route("/save/{token}", post(save::<D>))
        .with_state(state)
}

async fn home<D: Dispatch>(
    State(state): State<HttpState<D>>,
) -> Json<Reply<NavigationDocument>> {
    Json(state.dispatch.home().await)
}

/// A credential that isn't valid UTF-8 can't equal the password.
async fn login_path<D: Dispatch>(
    State(state): State<HttpState<D>>,
    credential: Result<Path<String>, PathRejection>,
) -> Json<Reply<LoginGrant>> {
    match credential {
        Ok(Path(credential)) => Json(state.dispatch.login(&credential).await),
        Err(e) => {
            tracing::warn!(error = %e, "login rejected: unreadable credential");
            Json(Reply::failure(CODE_UNAUTHORIZED, "wrong password"))
        }
    }
}

async fn login_body<D: Dispatch>(
    State(state): State<HttpState<D>>,
    body: Result<Bytes, BytesRejection>,
) -> Json<Reply<LoginGrant>> {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(error = %e, "unreadable login body");
            return Json(Reply::failure(CODE_BAD_REQUEST, "invalid request body"));
        }
    };
    match JsonCodec.decode::<LoginRequest>(&body) {
        Ok(req) => Json(state.dispatch.login(&req.password).await),
        Err(e) => {
            tracing::debug!(error = %e, "malformed login body");
            Json(Reply::failure(CODE_BAD_REQUEST, "invalid request body"))
        }
    }
}

async fn save<D: Dispatch>(
    State(state): State<HttpState<D>>,
    token: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Json<Reply<NavigationDocument>> {
    let Ok(Path(token)) = token else {
        tracing::warn!("save rejected: unreadable token");
        return Json(Reply::failure(
            CODE_UNAUTHORIZED,
            "session expired, please log in again",
        ));
    };
    Json(state.dispatch.save(&token, &readable(body)).await)
}

/// `POST /save` with no token segment is an absent token, which the core
/// rejects like any other wrong token.
async fn save_without_token<D: Dispatch>(
    State(state): State<HttpState<D>>,
    body: Result<Bytes, BytesRejection>,
) -> Json<Reply<NavigationDocument>> {
    Json(state.dispatch.save("", &readable(body)).await)
}

/// An unreadable body (too large, aborted) is passed on as empty. The core
/// still checks the token first and then rejects the empty body as
/// malformed.
fn readable(body: Result<Bytes, BytesRejection>) -> Bytes {
    body.unwrap_or_else(|e| {
        tracing::debug!(error = %e, "unreadable save body");
        Bytes::new()
    })
}

async fn index<D: Dispatch>(State(state): State<HttpState<D>>) -> Response {
    assets::index(state.assets.as_deref()).await
}

async fn static_file<D: Dispatch>(
    State(state): State<HttpState<D>>,
    file: Result<Path<String>, PathRejection>,
) -> Response {
    match file {
        Ok(Path(file)) => assets::static_file(state.assets.as_deref(), &file).await,
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}
