use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use common::types::Message;
use serde::Deserialize;
use service::member::domain::{AddMemberInput, DashboardCounts, MemberView, SearchPage, SearchParams, UpdateMemberInput};
use tracing::info;

use crate::{errors::JsonApiError, state::ServerState};

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQueryParams {
    /// Case-insensitive substring of name or phone
    pub q: Option<String>,
    /// `all`, `active` or `expired`; anything else means `all`
    pub status: Option<String>,
    /// 1-based page number, default 1
    pub page: Option<String>,
    /// Results per page, default 8
    pub page_size: Option<String>,
}

impl From<SearchQueryParams> for SearchParams {
    fn from(p: SearchQueryParams) -> Self {
        SearchParams { q: p.q, status: p.status, page: p.page, page_size: p.page_size }
    }
}

#[utoipa::path(
    post, path = "/add/", tag = "members",
    request_body = crate::openapi::AddMemberRequest,
    responses(
        (status = 201, description = "Member Added", body = crate::openapi::MessageDoc),
        (status = 400, description = "Missing or invalid fields", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Unexpected failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn add_member(
    State(state): State<ServerState>,
    payload: Result<Json<AddMemberInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), JsonApiError> {
    let Json(input) = payload?;
    let m = state.members.create(input).await?;
    info!(id = m.id, "member added");
    Ok((StatusCode::CREATED, Json(Message::new("Member Added Successfully"))))
}

#[utoipa::path(
    get, path = "/list/", tag = "members",
    responses((status = 200, description = "All members, newest first", body = [crate::openapi::MemberViewDoc]))
)]
pub async fn list_members(State(state): State<ServerState>) -> Result<Json<Vec<MemberView>>, JsonApiError> {
    Ok(Json(state.members.list().await?))
}

#[utoipa::path(
    put, path = "/edit/{id}/", tag = "members",
    params(("id" = i32, Path, description = "Member id")),
    request_body = crate::openapi::UpdateMemberRequest,
    responses(
        (status = 200, description = "Member Updated", body = crate::openapi::MessageDoc),
        (status = 400, description = "Invalid fields", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Member not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn edit_member(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateMemberInput>, JsonRejection>,
) -> Result<Json<Message>, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    state.members.update(id, input).await?;
    Ok(Json(Message::new("Member Updated Successfully")))
}

#[utoipa::path(
    delete, path = "/delete/{id}/", tag = "members",
    params(("id" = i32, Path, description = "Member id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Member not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete_member(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Message>, JsonApiError> {
    let Path(id) = id?;
    state.members.delete(id).await?;
    Ok(Json(Message::new("Deleted successfully")))
}

#[utoipa::path(
    get, path = "/expired/", tag = "members",
    responses((status = 200, description = "Expired members, most overdue first", body = [crate::openapi::MemberViewDoc]))
)]
pub async fn expired_members(State(state): State<ServerState>) -> Result<Json<Vec<MemberView>>, JsonApiError> {
    Ok(Json(state.members.list_expired().await?))
}

#[utoipa::path(
    get, path = "/dashboard/", tag = "members",
    responses((status = 200, description = "Member counts", body = crate::openapi::DashboardDoc))
)]
pub async fn dashboard_counts(State(state): State<ServerState>) -> Result<Json<DashboardCounts>, JsonApiError> {
    Ok(Json(state.members.dashboard().await?))
}

#[utoipa::path(
    get, path = "/members/search/", tag = "members",
    params(SearchQueryParams),
    responses(
        (status = 200, description = "One page of matches", body = crate::openapi::SearchPageDoc),
        (status = 400, description = "Bad pagination parameters", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn search_members(
    State(state): State<ServerState>,
    query: Result<Query<SearchQueryParams>, QueryRejection>,
) -> Result<Json<SearchPage>, JsonApiError> {
    let Query(params) = query?;
    Ok(Json(state.members.search(params.into()).await?))
}
