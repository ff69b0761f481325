use crate::csrf::CsrfToken;
use crate::entities::user;
use crate::errors::AppError;
use crate::guards::auth::{AuthenticatedUser, SESSION_COOKIE};
use crate::services::user_service::UserService;
use rocket::http::{Cookie, CookieJar};
use rocket::serde::json::Json;
use rocket::State;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// セッション確立後にクライアントへ返すユーザー情報
#[derive(Serialize)]
pub struct SessionResponse {
    pub id: i32,
    pub username: String,
    pub guest: bool,
}

impl From<user::Model> for SessionResponse {
    fn from(user: user::Model) -> Self {
        SessionResponse {
            id: user.id,
            username: user.username,
            guest: user.is_guest,
        }
    }
}

/// セッションクッキー (暗号化) をセットする
fn start_session(cookies: &CookieJar<'_>, user: &user::Model) {
    cookies.add_private(Cookie::new(SESSION_COOKIE, user.id.to_string()));
}

/// アカウント登録。成功時はそのままログイン状態になります。
#[post("/register", data = "<req>")]
pub async fn register(
    db: &State<DatabaseConnection>,
    cookies: &CookieJar<'_>,
    _csrf: CsrfToken,
    req: Json<CredentialsRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let user = UserService::register(db.inner(), &req.username, &req.password).await?;
    start_session(cookies, &user);
    Ok(Json(user.into()))
}

/// パスワードログイン。
/// 資格情報の誤りはどれも 401 の汎用メッセージになります。
#[post("/login", data = "<req>")]
pub async fn login(
    db: &State<DatabaseConnection>,
    cookies: &CookieJar<'_>,
    _csrf: CsrfToken,
    req: Json<CredentialsRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let user = UserService::authenticate(db.inner(), &req.username, &req.password).await?;
    start_session(cookies, &user);
    Ok(Json(user.into()))
}

/// ゲストログイン。使い捨てのゲストアカウントを作ってセッションを開始します。
#[post("/guest")]
pub async fn guest(
    db: &State<DatabaseConnection>,
    cookies: &CookieJar<'_>,
    _csrf: CsrfToken,
) -> Result<Json<SessionResponse>, AppError> {
    let user = UserService::create_guest(db.inner()).await?;
    start_session(cookies, &user);
    Ok(Json(user.into()))
}

/// ログアウト。セッションクッキーを破棄します。
#[post("/logout")]
pub fn logout(cookies: &CookieJar<'_>) {
    cookies.remove_private(Cookie::from(SESSION_COOKIE));
}

/// 現在のセッション状態。
/// 未認証でもエラーにせず null を返します (クライアントのサインイン判定用)。
#[get("/me")]
pub fn me(user: Option<AuthenticatedUser>, _csrf: CsrfToken) -> Json<Option<SessionResponse>> {
    Json(user.map(|u| u.user.into()))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![register, login, guest, logout, me]
}
