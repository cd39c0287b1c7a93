use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, DefaultBodyLimit, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use shared::{
    domain::RecipeForm,
    error::{ApiError, ErrorCode},
    validation::validate_form,
};
use tracing::{debug, info, warn};

mod app_state;
mod config;
mod render;
mod session;
mod temp_data;

use app_state::AppState;
use config::load_settings;
use render::{render_recipe_page, RecipePage};
use session::SessionId;
use temp_data::{TempDataStore, MESSAGE_KEY};

pub(crate) const RECIPES_ROUTE: &str = "/recipes";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings();
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();

    let state = AppState {
        temp_data: TempDataStore::new(settings.temp_data_ttl()?),
        max_body_bytes: settings.max_body_bytes,
    };
    let app = build_router(Arc::new(state));

    let addr = settings.bind_addr()?;
    info!(%addr, "recipe server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let max_body_bytes = state.max_body_bytes;
    Router::new()
        .route("/healthz", get(healthz))
        .route(RECIPES_ROUTE, get(show_recipe_form).post(submit_recipe))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn show_recipe_form(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Html<String> {
    let message = SessionId::from_headers(&headers)
        .and_then(|session| state.temp_data.take(session, MESSAGE_KEY));

    Html(render_recipe_page(&RecipePage {
        message: message.as_deref(),
        ..RecipePage::default()
    }))
}

async fn submit_recipe(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    form: Result<Form<RecipeForm>, FormRejection>,
) -> Result<Response, (StatusCode, Json<ApiError>)> {
    let Form(form) = form.map_err(|rejection| {
        warn!(%rejection, "rejected recipe form body");
        (
            rejection.status(),
            Json(ApiError::new(ErrorCode::Validation, rejection.body_text())),
        )
    })?;

    let recipe = match validate_form(&form) {
        Ok(recipe) => recipe,
        Err(outcome) => {
            debug!(failed_fields = outcome.errors().len(), "recipe form redisplayed");
            let page = render_recipe_page(&RecipePage {
                form: Some(&form),
                outcome: Some(&outcome),
                message: None,
            });
            return Ok(Html(page).into_response());
        }
    };

    let existing_session = SessionId::from_headers(&headers);
    let session = existing_session.unwrap_or_else(SessionId::generate);
    state
        .temp_data
        .put(session, MESSAGE_KEY, recipe.success_message());
    info!(
        name = %recipe.name,
        pending_messages = state.temp_data.len(),
        "recipe accepted"
    );

    let mut response = (StatusCode::FOUND, [(header::LOCATION, RECIPES_ROUTE)]).into_response();
    if existing_session.is_none() {
        match session.set_cookie() {
            Some(cookie) => {
                response.headers_mut().insert(header::SET_COOKIE, cookie);
            }
            None => warn!("could not build session cookie; message will not be shown"),
        }
    }
    Ok(response)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
