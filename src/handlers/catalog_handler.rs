use actix_web::{get, web, HttpResponse};

use crate::{
    models::dto::request::{CollegeSearchParams, ScholarshipSearchParams},
    services::catalog_service::{search_colleges, search_scholarships},
};

#[get("/colleges")]
pub async fn list_colleges(query: web::Query<CollegeSearchParams>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "colleges": search_colleges(&query) }))
}

#[get("/scholarships")]
pub async fn list_scholarships(query: web::Query<ScholarshipSearchParams>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "scholarships": search_scholarships(&query) }))
}
