use migration::{Migrator, MigratorTrait};
use pixel_todo::build_rocket;
use rocket::http::{ContentType, Header, Status};
use rocket::local::blocking::Client;
use sea_orm::Database;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Once;

static INIT: Once = Once::new();
static COUNTER: AtomicU32 = AtomicU32::new(0);

/// テスト用クライアントを構築します。
/// DATABASE_URL が未設定の場合は一時ディレクトリのSQLiteファイルを使います。
/// マイグレーションは最初の呼び出しで一度だけ流し、以降の起動時の実行は no-op になります。
pub fn setup() -> Client {
    INIT.call_once(|| {
        dotenvy::dotenv().ok();

        if std::env::var("DATABASE_URL").is_err() {
            let path = std::env::temp_dir()
                .join(format!("pixel_todo_test_{}.sqlite", std::process::id()));
            std::env::set_var(
                "DATABASE_URL",
                format!("sqlite://{}?mode=rwc", path.display()),
            );
        }

        // 並列テストがマイグレーションを同時に流さないよう、ここで先に適用しておく
        rocket::tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(async {
                let url = std::env::var("DATABASE_URL").unwrap();
                let db = Database::connect(url).await.expect("test db connect");
                Migrator::up(&db, None).await.expect("test migrations");
            });
    });

    let rocket = rocket::async_test(async { build_rocket().await });

    Client::tracked(rocket).expect("valid rocket instance")
}

/// プロセス内で一意なユーザー名を生成します。
/// テストは共有DB上で動くため、ユーザーごとの所有スコープで分離します。
pub fn unique_username(prefix: &str) -> String {
    format!(
        "{}_{}_{}",
        prefix,
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    )
}

/// アカウントを登録してログイン状態のセッションを開始します。
pub fn register_user(client: &Client, username: &str) {
    let response = client
        .post("/auth/register")
        .header(ContentType::JSON)
        .body(format!(
            r#"{{"username":"{}","password":"password123"}}"#,
            username
        ))
        .dispatch();

    assert_eq!(response.status(), Status::Ok);
}

/// クッキー上のCSRFトークンを変更系リクエスト用のヘッダーに載せ替えます。
pub fn csrf_header(client: &Client) -> Header<'static> {
    let token = client
        .cookies()
        .get("csrf_token")
        .expect("csrf cookie should be set after any request")
        .value()
        .to_string();

    Header::new("X-CSRF-Token", token)
}

/// TODOを1件作成してIDを返します。
pub fn create_todo(client: &Client, body: &str) -> i32 {
    let response = client
        .post("/api/todos")
        .header(ContentType::JSON)
        .header(csrf_header(client))
        .body(body.to_string())
        .dispatch();

    assert_eq!(response.status(), Status::Ok);
    let json: serde_json::Value = response.into_json().expect("json body");
    json["id"].as_i64().expect("created id") as i32
}
