use rocket::http::{ContentType, Status};
use rocket::response::{self, Responder, Response};
use rocket::serde::json::serde_json;
use rocket::Request;
use sea_orm::DbErr;
use std::io::Cursor;

/// アプリケーション全体で使用するエラー型。
/// API呼び出し側には `{"error": "..."}` のJSONとして返されます。
#[derive(Debug)]
pub enum AppError {
    /// データベースエラー
    Database(DbErr),
    /// 認証されていない (401 Unauthorized)
    NotAuthenticated,
    /// リソースが存在しない、または他ユーザーの所有 (404 Not Found)
    NotFound,
    /// 入力値の検証エラー (400 Bad Request)
    Validation(String),
    /// 内部エラー (500 Internal Server Error)
    Internal(String),
}

impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        // 5xx系は詳細をログにのみ残し、レスポンスには汎用メッセージを返す
        let (status, message) = match &self {
            AppError::NotAuthenticated => (Status::Unauthorized, "Not authenticated".to_string()),
            AppError::NotFound => (Status::NotFound, "Not found".to_string()),
            AppError::Validation(msg) => (Status::BadRequest, msg.clone()),
            AppError::Database(e) => {
                log::error!("database error: {}", e);
                (Status::InternalServerError, "Database error".to_string())
            }
            AppError::Internal(msg) => {
                log::error!("internal error: {}", msg);
                (Status::InternalServerError, "Internal error".to_string())
            }
        };

        let body = serde_json::json!({ "error": message }).to_string();

        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}

impl From<DbErr> for AppError {
    fn from(e: DbErr) -> Self {
        AppError::Database(e)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Database(e) => write!(f, "Database error: {}", e),
            AppError::NotAuthenticated => write!(f, "Not authenticated"),
            AppError::NotFound => write!(f, "Not found"),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
