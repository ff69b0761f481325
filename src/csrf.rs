use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::Rng;
use rocket::http::{Cookie, SameSite, Status};
use rocket::request::{FromRequest, Outcome, Request};
use std::time::{SystemTime, UNIX_EPOCH};

/// CSRFトークンの有効期限（秒）
const CSRF_TOKEN_EXPIRY: u64 = 3600;

/// CSRFトークンを保持するクッキー名
pub const CSRF_COOKIE: &str = "csrf_token";

/// 変更系リクエストでトークンを運ぶヘッダー名
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// CSRFトークン。
/// 先頭8バイトに発行時刻 (エポック秒) を埋め込み、有効期限を判定します。
#[derive(Debug, Clone)]
pub struct CsrfToken(pub String);

impl CsrfToken {
    /// 新しいCSRFトークンを生成します。
    pub fn generate() -> Self {
        let random_bytes: [u8; 32] = rand::thread_rng().gen();
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let mut token_data = timestamp.to_be_bytes().to_vec();
        token_data.extend_from_slice(&random_bytes);

        CsrfToken(URL_SAFE_NO_PAD.encode(&token_data))
    }

    /// 提出されたトークンを検証します。
    /// 値が一致し、かつ有効期限内であることを確認します。
    pub fn verify(&self, submitted: &str) -> bool {
        if self.0 != submitted {
            return false;
        }

        let Ok(decoded) = URL_SAFE_NO_PAD.decode(&self.0) else {
            return false;
        };
        if decoded.len() < 8 {
            return false;
        }

        let timestamp_bytes: [u8; 8] = decoded[..8].try_into().unwrap_or([0; 8]);
        let token_time = u64::from_be_bytes(timestamp_bytes);
        let current_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        current_time.saturating_sub(token_time) < CSRF_TOKEN_EXPIRY
    }

    /// トークン文字列を取得
    pub fn token(&self) -> &str {
        &self.0
    }
}

/// リクエストからCSRFトークンを取得するガード。
/// クッキーに既存のトークンがあればそれを使い、なければ新規発行してクッキーに載せます。
#[rocket::async_trait]
impl<'r> FromRequest<'r> for CsrfToken {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let cookies = request.cookies();

        let token = if let Some(cookie) = cookies.get(CSRF_COOKIE) {
            CsrfToken(cookie.value().to_string())
        } else {
            let new_token = CsrfToken::generate();

            // クライアント側スクリプトがヘッダーに載せ替えられるよう HttpOnly にはしない
            let cookie = Cookie::build((CSRF_COOKIE, new_token.0.clone()))
                .path("/")
                .same_site(SameSite::Strict)
                .http_only(false);

            cookies.add(cookie);
            new_token
        };

        Outcome::Success(token)
    }
}

/// 変更系エンドポイントのCSRF検証ガード。
/// `X-CSRF-Token` ヘッダーの値がクッキーのトークンと一致しなければ 403 を返します。
pub struct CsrfValidation;

#[rocket::async_trait]
impl<'r> FromRequest<'r> for CsrfValidation {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let cookie_token = match request.cookies().get(CSRF_COOKIE) {
            Some(c) => c.value().to_string(),
            None => return Outcome::Error((Status::Forbidden, ())),
        };

        let header_token = match request.headers().get_one(CSRF_HEADER) {
            Some(t) => t.to_string(),
            None => return Outcome::Error((Status::Forbidden, ())),
        };

        if CsrfToken(cookie_token).verify(&header_token) {
            Outcome::Success(CsrfValidation)
        } else {
            Outcome::Error((Status::Forbidden, ()))
        }
    }
}
