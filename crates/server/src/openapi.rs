use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String }

/// `plan_months` may also be sent as a numeric string.
#[derive(ToSchema)]
pub struct AddMemberRequest {
    pub name: String,
    pub phone: String,
    #[schema(example = 2)]
    pub plan_months: i32,
    #[schema(example = "2024-01-01")]
    pub join_date: String,
}

#[derive(ToSchema)]
pub struct UpdateMemberRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(ToSchema)]
pub struct MemberViewDoc {
    pub id: i32,
    pub name: String,
    pub phone: String,
    #[schema(example = "2024-01-01")]
    pub join_date: String,
    pub plan: i32,
    pub amount: i32,
    #[schema(example = "2024-03-01")]
    pub expiry_date: String,
    pub late_days: i64,
}

#[derive(ToSchema)]
pub struct SearchPageDoc {
    pub results: Vec<MemberViewDoc>,
    pub current_page: u32,
    pub total_pages: u64,
    pub total_members: u64,
}

#[derive(ToSchema)]
pub struct DashboardDoc {
    pub total: u64,
    pub active: u64,
    pub expired: u64,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::home,
        crate::routes::members::add_member,
        crate::routes::members::list_members,
        crate::routes::members::edit_member,
        crate::routes::members::delete_member,
        crate::routes::members::expired_members,
        crate::routes::members::dashboard_counts,
        crate::routes::members::search_members,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            ErrorDoc,
            AddMemberRequest,
            UpdateMemberRequest,
            MemberViewDoc,
            SearchPageDoc,
            DashboardDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "members")
    )
)]
pub struct ApiDoc;
