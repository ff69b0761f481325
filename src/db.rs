use sea_orm::{Database, DatabaseConnection, DbErr};
use std::env;

/// データベース接続をセットアップします。
/// 接続先は `DATABASE_URL` 環境変数で指定します (`.env` からも読み込まれます)。
pub async fn set_up_db() -> Result<DatabaseConnection, DbErr> {
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    // Database::connect は内部で接続プールを作成します。
    let db = Database::connect(db_url).await?;

    Ok(db)
}
