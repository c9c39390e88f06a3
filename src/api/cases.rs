//! Case API handlers.

use actix_web::{web, HttpResponse};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::auth::CallerIdentity;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    case::parse_deadline, CaseListResponse, CaseOptionsResponse, CaseResponse, CaseStatsResponse,
    CreateCaseRequest, ListCasesQuery, Pagination, SearchCasesQuery, SearchCasesResponse,
    UpdateCaseRequest,
};

/// Response wrapping a single case.
#[derive(Debug, Serialize, ToSchema)]
pub struct CaseDetailResponse {
    pub case: CaseResponse,
}

/// Response for create/update operations.
#[derive(Debug, Serialize, ToSchema)]
pub struct CaseMessageResponse {
    pub message: String,
    pub case: CaseResponse,
}

/// Acknowledgement for deletes.
#[derive(Debug, Serialize, ToSchema)]
pub struct AckResponse {
    pub message: String,
}

/// Resolve the documents_count column for a batch of case models.
async fn to_responses(
    pool: &DbPool,
    cases: Vec<crate::entity::case::Model>,
) -> AppResult<Vec<CaseResponse>> {
    let ids: Vec<i32> = cases.iter().map(|c| c.id).collect();
    let counts = pool.count_documents_batch(&ids).await?;

    Ok(cases
        .into_iter()
        .map(|c| {
            let documents_count = counts.get(&c.id).copied().unwrap_or(0);
            CaseResponse::from_model(c, documents_count)
        })
        .collect())
}

/// List cases with pagination and filtering.
#[utoipa::path(
    get,
    path = "/api/cases",
    tag = "Cases",
    params(
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("priority" = Option<String>, Query, description = "Filter by priority"),
        ("search" = Option<String>, Query, description = "Substring match on title, number, organ, description"),
        ("page" = Option<u64>, Query, description = "Page number (default 1)"),
        ("per_page" = Option<u64>, Query, description = "Results per page (default 10, max 100)")
    ),
    responses(
        (status = 200, description = "List of cases", body = CaseListResponse),
    )
)]
pub async fn list_cases(
    pool: web::Data<DbPool>,
    query: web::Query<ListCasesQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let (cases, total) = pool.list_cases(&query).await?;
    let cases = to_responses(&pool, cases).await?;

    let response = CaseListResponse {
        cases,
        pagination: Pagination::new(query.page(), query.per_page(), total),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Create a new case.
#[utoipa::path(
    post,
    path = "/api/cases",
    tag = "Cases",
    request_body = CreateCaseRequest,
    responses(
        (status = 201, description = "Case created", body = CaseMessageResponse),
        (status = 400, description = "Missing or invalid fields", body = crate::error::ErrorResponse),
        (status = 409, description = "Business number already exists", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_case(
    pool: web::Data<DbPool>,
    caller: CallerIdentity,
    body: web::Json<CreateCaseRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.number.trim().is_empty() {
        return Err(AppError::InvalidInput("campo number é obrigatório".to_string()));
    }
    if req.title.trim().is_empty() {
        return Err(AppError::InvalidInput("campo title é obrigatório".to_string()));
    }

    let deadline = match req.deadline.as_deref() {
        Some(raw) => Some(parse_deadline(raw)?),
        None => None,
    };

    let case = pool.insert_case(&req, deadline, caller.user_id).await?;

    info!("Case created: id={}, number={}", case.id, case.number);

    let response = CaseMessageResponse {
        message: "Caso criado com sucesso".to_string(),
        case: CaseResponse::from_model(case, 0),
    };

    Ok(HttpResponse::Created().json(response))
}

/// Get a single case.
#[utoipa::path(
    get,
    path = "/api/cases/{case_id}",
    tag = "Cases",
    params(("case_id" = i32, Path, description = "Case id")),
    responses(
        (status = 200, description = "Case details", body = CaseDetailResponse),
        (status = 404, description = "Case not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_case(pool: web::Data<DbPool>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let case_id = path.into_inner();

    let case = pool
        .get_case_by_id(case_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Caso".to_string()))?;

    let counts = pool.count_documents_batch(&[case_id]).await?;
    let documents_count = counts.get(&case_id).copied().unwrap_or(0);

    Ok(HttpResponse::Ok().json(CaseDetailResponse {
        case: CaseResponse::from_model(case, documents_count),
    }))
}

/// Partially update a case.
#[utoipa::path(
    put,
    path = "/api/cases/{case_id}",
    tag = "Cases",
    params(("case_id" = i32, Path, description = "Case id")),
    request_body = UpdateCaseRequest,
    responses(
        (status = 200, description = "Case updated", body = CaseMessageResponse),
        (status = 400, description = "Invalid deadline", body = crate::error::ErrorResponse),
        (status = 404, description = "Case not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_case(
    pool: web::Data<DbPool>,
    _caller: CallerIdentity,
    path: web::Path<i32>,
    body: web::Json<UpdateCaseRequest>,
) -> AppResult<HttpResponse> {
    let case_id = path.into_inner();
    let req = body.into_inner();

    let deadline = match req.deadline.as_deref() {
        Some(raw) if !raw.is_empty() => Some(parse_deadline(raw)?),
        _ => None,
    };

    let case = pool.update_case(case_id, &req, deadline).await?;

    info!("Case updated: id={}", case.id);

    let counts = pool.count_documents_batch(&[case_id]).await?;
    let documents_count = counts.get(&case_id).copied().unwrap_or(0);

    Ok(HttpResponse::Ok().json(CaseMessageResponse {
        message: "Caso atualizado com sucesso".to_string(),
        case: CaseResponse::from_model(case, documents_count),
    }))
}

/// Delete a case and all its documents.
#[utoipa::path(
    delete,
    path = "/api/cases/{case_id}",
    tag = "Cases",
    params(("case_id" = i32, Path, description = "Case id")),
    responses(
        (status = 200, description = "Case deleted", body = AckResponse),
        (status = 404, description = "Case not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_case(
    pool: web::Data<DbPool>,
    _caller: CallerIdentity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let case_id = path.into_inner();

    pool.delete_case(case_id).await?;

    info!("Case deleted: id={}", case_id);

    Ok(HttpResponse::Ok().json(AckResponse {
        message: "Caso deletado com sucesso".to_string(),
    }))
}

/// Aggregated case statistics.
#[utoipa::path(
    get,
    path = "/api/cases/stats",
    tag = "Cases",
    responses(
        (status = 200, description = "Case statistics", body = CaseStatsResponse),
    )
)]
pub async fn case_stats(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let stats = pool.case_stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}

/// Search cases by term.
#[utoipa::path(
    get,
    path = "/api/cases/search",
    tag = "Cases",
    params(
        ("q" = String, Query, description = "Search term"),
        ("limit" = Option<u64>, Query, description = "Maximum results (default 20)")
    ),
    responses(
        (status = 200, description = "Matching cases", body = SearchCasesResponse),
        (status = 400, description = "Missing search term", body = crate::error::ErrorResponse),
    )
)]
pub async fn search_cases(
    pool: web::Data<DbPool>,
    query: web::Query<SearchCasesQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();

    let term = match query.q.as_deref() {
        Some(t) if !t.is_empty() => t,
        _ => {
            return Err(AppError::InvalidInput(
                "termo de busca é obrigatório".to_string(),
            ))
        }
    };

    let limit = query.limit.clamp(1, 100);
    let cases = pool.search_cases(term, limit).await?;
    let cases = to_responses(&pool, cases).await?;

    let count = cases.len();
    Ok(HttpResponse::Ok().json(SearchCasesResponse { cases, count }))
}

/// Static options for case forms.
#[utoipa::path(
    get,
    path = "/api/cases/options",
    tag = "Cases",
    responses(
        (status = 200, description = "Status, priority and modality options", body = CaseOptionsResponse),
    )
)]
pub async fn case_options() -> HttpResponse {
    HttpResponse::Ok().json(CaseOptionsResponse::current())
}

/// Configure case routes. Literal paths are registered before the
/// parameterized one so `/cases/stats` is never captured as an id.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/cases")
            .route(web::get().to(list_cases))
            .route(web::post().to(create_case)),
    )
    .service(web::resource("/cases/stats").route(web::get().to(case_stats)))
    .service(web::resource("/cases/search").route(web::get().to(search_cases)))
    .service(web::resource("/cases/options").route(web::get().to(case_options)))
    .service(
        web::resource("/cases/{case_id}")
            .route(web::get().to(get_case))
            .route(web::put().to(update_case))
            .route(web::delete().to(delete_case)),
    );
}
