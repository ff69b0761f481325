use crate::entities::{prelude::*, user};
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};
use rocket::State;
use sea_orm::*;

/// セッションクッキーを運ぶクッキー名
pub const SESSION_COOKIE: &str = "user_id";

/// 認証済みユーザーを表すリクエストガード。
/// ハンドラの引数に含めるだけで認証チェックが行われます。
/// 未認証でも成功させたい読み取り系では `Option<AuthenticatedUser>` を使います。
pub struct AuthenticatedUser {
    pub user: user::Model,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let db = match request.guard::<&State<DatabaseConnection>>().await {
            Outcome::Success(db) => db,
            _ => return Outcome::Error((Status::InternalServerError, ())),
        };

        // 暗号化クッキーからユーザーIDを取り出す
        let user_id = request
            .cookies()
            .get_private(SESSION_COOKIE)
            .and_then(|c| c.value().parse::<i32>().ok());

        match user_id {
            Some(id) => match User::find_by_id(id).one(db.inner()).await {
                Ok(Some(user)) => Outcome::Success(AuthenticatedUser { user }),
                _ => Outcome::Error((Status::Unauthorized, ())),
            },
            None => Outcome::Error((Status::Unauthorized, ())),
        }
    }
}
