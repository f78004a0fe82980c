use crate::api::service::{self, AppState};
use actix_web::{error::ErrorInternalServerError, get, post, put, web, HttpResponse, Responder};
use wallet_inspector::types::{LookupRequest, TokenList};

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

#[post("/accountInfo")]
async fn account_info(
    state: web::Data<AppState>,
    body: web::Json<LookupRequest>,
) -> impl Responder {
    log::info!("account_info - {:?}", body);
    web::Json(service::account_info(&state, &body.address).await)
}

#[get("/state")]
async fn view_state(state: web::Data<AppState>) -> impl Responder {
    web::Json(service::view_state(&state))
}

#[get("/tokens")]
async fn tokens(state: web::Data<AppState>) -> actix_web::Result<web::Json<TokenList>> {
    service::tokens(&state)
        .map(web::Json)
        .map_err(ErrorInternalServerError)
}

#[put("/tokens")]
async fn replace_tokens(
    state: web::Data<AppState>,
    body: web::Json<TokenList>,
) -> actix_web::Result<web::Json<TokenList>> {
    log::info!("replace_tokens - {:?}", body);
    service::replace_tokens(&state, body.into_inner())
        .map(web::Json)
        .map_err(ErrorInternalServerError)
}
