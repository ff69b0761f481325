#[macro_use]
extern crate rocket;

use migration::{Migrator, MigratorTrait};
use rocket::serde::json::{serde_json, Value};
use rocket::Build;

pub mod auth_utils;
pub mod controllers;
pub mod csrf;
pub mod db;
pub mod entities;
pub mod errors;
pub mod guards;
pub mod services;
pub mod validation;

/// Rocketインスタンスを構築する関数。
/// テスト時にも利用できるように分離しています。
pub async fn build_rocket() -> rocket::Rocket<Build> {
    // .envファイルを読み込む (環境変数の読み込み)
    dotenvy::dotenv().ok();

    // 1. データベース接続
    let db = db::set_up_db().await.expect("Failed to connect to DB");

    // 2. マイグレーションの実行 (起動時に自動でテーブルを作成)
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    // 3. Rocketインスタンスの構築
    rocket::build()
        .manage(db)
        .mount("/", routes![index])
        .mount("/auth", controllers::auth::routes())
        .mount("/api/todos", controllers::todos::routes())
}

#[get("/")]
fn index() -> Value {
    serde_json::json!({
        "name": "pixel-todo",
        "version": env!("CARGO_PKG_VERSION"),
    })
}
