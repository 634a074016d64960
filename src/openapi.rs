use utoipa::OpenApi;

use crate::models::{Course, SessionDay, Venue};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz_live,
        crate::handlers::healthz_ready,
        crate::handlers::get_courses,
        crate::handlers::get_similar_courses
    ),
    components(schemas(Course, Venue, SessionDay)),
    tags(
        (name = "courses", description = "Course session queries")
    ),
)]
pub struct ApiDoc;
