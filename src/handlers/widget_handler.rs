use std::sync::Arc;

use actix_web::{get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::{
        domain::{MultipleChoiceParams, SortingParams, WidgetKind},
        dto::request::{MoveItemRequest, SelectOptionRequest},
    },
    services::WidgetSessionService,
};

#[post("/api/widgets/sorting")]
pub async fn create_sorting_widget(
    state: web::Data<Arc<AppState>>,
    request: web::Json<SortingParams>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .widget_service
        .create_sorting(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(response))
}

#[post("/api/widgets/multiple-choice")]
pub async fn create_multiple_choice_widget(
    state: web::Data<Arc<AppState>>,
    request: web::Json<MultipleChoiceParams>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .widget_service
        .create_multiple_choice(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(response))
}

#[get("/api/widgets/schema/{kind}")]
pub async fn get_parameter_schema(kind: web::Path<WidgetKind>) -> Result<HttpResponse, AppError> {
    let schema = WidgetSessionService::parameter_schema(kind.into_inner())?;
    Ok(HttpResponse::Ok().json(schema))
}

#[get("/api/widgets/{id}")]
pub async fn get_widget(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = state.widget_service.get_view(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[put("/api/widgets/{id}/sorting-params")]
pub async fn update_sorting_params(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    request: web::Json<SortingParams>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .widget_service
        .update_sorting_params(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/widgets/{id}/moves")]
pub async fn move_item(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    request: web::Json<MoveItemRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .widget_service
        .move_item(&id, request.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/widgets/{id}/selection")]
pub async fn select_option(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    request: web::Json<SelectOptionRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .widget_service
        .select_option(&id, request.into_inner().selected)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/widgets/{id}/submit")]
pub async fn submit_widget(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = state.widget_service.submit(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Registers every widget route on an actix `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(create_sorting_widget)
        .service(create_multiple_choice_widget)
        .service(get_parameter_schema)
        .service(get_widget)
        .service(update_sorting_params)
        .service(move_item)
        .service(select_option)
        .service(submit_widget);
}
