//! Home dashboard.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use rand::seq::SliceRandom;

use super::ApiResult;
use super::error::storage_failure;
use super::guard::CurrentUser;
use super::session::SessionContext;
use super::state::HttpState;
use super::views::{Page, respond};

/// `GET /`: the caller's goals, one of their quotes at random and the time.
pub async fn show(
    user: CurrentUser,
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let goals = state
        .goals
        .list_for(user.id())
        .await
        .map_err(|err| storage_failure("goal", "list", err))?;
    let quotes = state
        .quotes
        .list_for(user.id())
        .await
        .map_err(|err| storage_failure("quote", "list", err))?;

    let mut data = state.page_data(&session, "Home", "Welcome")?;
    data.goals = goals;
    data.random_quote = quotes.choose(&mut rand::thread_rng()).cloned();
    data.current_time = Some(state.clock.utc());
    respond(state.renderer.as_ref(), StatusCode::OK, Page::Home, &data)
}
