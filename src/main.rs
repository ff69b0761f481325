#[macro_use]
extern crate rocket;

use pixel_todo::build_rocket;

/// アプリケーションのメインエントリーポイント。
#[launch]
async fn rocket() -> _ {
    build_rocket().await
}
