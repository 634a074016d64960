use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use crate::{
    AppState,
    error::ApiError,
    models::Course,
    query::{CourseFilter, list_courses, similar_courses},
    validation::normalize_filter,
};

#[derive(Debug, Default, serde::Deserialize)]
pub struct CourseQuery {
    pub month: Option<String>,
    pub venue: Option<String>,
    #[serde(rename = "type")]
    pub session_type: Option<String>,
}

impl CourseQuery {
    fn into_filter(self) -> Result<CourseFilter, ApiError> {
        Ok(CourseFilter {
            month: normalize_filter("month", self.month)?,
            venue: normalize_filter("venue", self.venue)?,
            session_type: normalize_filter("type", self.session_type)?,
        })
    }
}

#[utoipa::path(get, path = "/", tag = "courses")]
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Course Finder API",
        "endpoints": {
            "/courses": "List courses, filtered by month, venue and type, with duplicate sessions merged",
            "/courses/similar": "List groups of courses sharing dates and venue"
        }
    }))
}

#[utoipa::path(get, path = "/healthz/live", tag = "courses")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(
    get,
    path = "/healthz/ready",
    responses(
        (status = 200, description = "Course data is available"),
        (status = 503, description = "Course data file is missing")
    ),
    tag = "courses"
)]
pub async fn healthz_ready(State(state): State<AppState>) -> impl IntoResponse {
    if state.store.is_available().await {
        (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({"status": "unavailable"})),
        )
    }
}

#[utoipa::path(
    get,
    path = "/courses",
    params(
        ("month" = Option<String>, Query, description = "Full month name of the start date, e.g. January"),
        ("venue" = Option<String>, Query, description = "Exact venue name"),
        ("type" = Option<String>, Query, description = "Monday to Friday, Day Release or Weekend; any other value matches nothing")
    ),
    responses(
        (status = 200, description = "Matching courses with duplicate sessions merged", body = [Course]),
        (status = 400, description = "Invalid filter value"),
        (status = 500, description = "Course data could not be loaded or parsed")
    ),
    tag = "courses"
)]
pub async fn get_courses(
    State(state): State<AppState>,
    axum::extract::Query(query): axum::extract::Query<CourseQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = query.into_filter()?;
    let courses = state.store.load().await?;
    let listed = list_courses(courses, &filter)?;

    info!(
        month = filter.month.as_deref(),
        venue = filter.venue.as_deref(),
        session_type = filter.session_type.as_deref(),
        count = listed.len(),
        "listed courses"
    );
    Ok(Json(listed))
}

#[utoipa::path(
    get,
    path = "/courses/similar",
    responses(
        (status = 200, description = "Groups of two or more courses sharing dates and venue", body = Vec<Vec<Course>>),
        (status = 500, description = "Course data could not be loaded")
    ),
    tag = "courses"
)]
pub async fn get_similar_courses(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let courses = state.store.load().await?;
    let groups = similar_courses(courses);

    info!(groups = groups.len(), "listed similar courses");
    Ok(Json(groups))
}
