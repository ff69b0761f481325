use crate::csrf::{CsrfToken, CsrfValidation};
use crate::entities::todo::{self, Priority};
use crate::errors::AppError;
use crate::guards::auth::AuthenticatedUser;
use crate::services::todo_service::{TodoService, TodoStats};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct CreateTodoRequest {
    pub text: String,
    pub priority: Option<Priority>,
}

#[derive(Deserialize)]
pub struct UpdateTextRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: i32,
}

/// TODO一覧 (新しい順)。
/// 未認証の場合はエラーではなく空の一覧を返します。
#[get("/")]
pub async fn list(
    db: &State<DatabaseConnection>,
    user: Option<AuthenticatedUser>,
    _csrf: CsrfToken,
) -> Result<Json<Vec<todo::Model>>, AppError> {
    match user {
        Some(user) => Ok(Json(TodoService::list(db.inner(), user.user.id).await?)),
        None => Ok(Json(Vec::new())),
    }
}

/// TODOの件数集計。未認証の場合はすべてゼロを返します。
#[get("/stats")]
pub async fn stats(
    db: &State<DatabaseConnection>,
    user: Option<AuthenticatedUser>,
    _csrf: CsrfToken,
) -> Result<Json<TodoStats>, AppError> {
    match user {
        Some(user) => Ok(Json(TodoService::stats(db.inner(), user.user.id).await?)),
        None => Ok(Json(TodoStats {
            total: 0,
            completed: 0,
            pending: 0,
        })),
    }
}

/// TODO作成。作成したTODOのIDを返します。
#[post("/", data = "<req>")]
pub async fn create(
    db: &State<DatabaseConnection>,
    user: AuthenticatedUser,
    _csrf: CsrfValidation,
    req: Json<CreateTodoRequest>,
) -> Result<Json<CreatedResponse>, AppError> {
    let created =
        TodoService::create(db.inner(), user.user.id, &req.text, req.priority).await?;
    Ok(Json(CreatedResponse { id: created.id }))
}

/// 完了/未完了の切り替え。
#[post("/<id>/toggle")]
pub async fn toggle(
    db: &State<DatabaseConnection>,
    user: AuthenticatedUser,
    _csrf: CsrfValidation,
    id: i32,
) -> Result<Status, AppError> {
    TodoService::toggle(db.inner(), user.user.id, id).await?;
    Ok(Status::NoContent)
}

/// 本文の書き換え。
#[put("/<id>/text", data = "<req>")]
pub async fn update_text(
    db: &State<DatabaseConnection>,
    user: AuthenticatedUser,
    _csrf: CsrfValidation,
    id: i32,
    req: Json<UpdateTextRequest>,
) -> Result<Status, AppError> {
    TodoService::update_text(db.inner(), user.user.id, id, &req.text).await?;
    Ok(Status::NoContent)
}

/// TODOの削除。
#[delete("/<id>")]
pub async fn remove(
    db: &State<DatabaseConnection>,
    user: AuthenticatedUser,
    _csrf: CsrfValidation,
    id: i32,
) -> Result<Status, AppError> {
    TodoService::remove(db.inner(), user.user.id, id).await?;
    Ok(Status::NoContent)
}

pub fn routes() -> Vec<rocket::Route> {
    routes![list, stats, create, toggle, update_text, remove]
}
