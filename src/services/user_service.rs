use crate::auth_utils::{hash_password, verify_password};
use crate::entities::{prelude::*, user};
use crate::errors::AppError;
use crate::validation::CredentialsValidation;
use rand::distributions::Alphanumeric;
use rand::Rng;
use sea_orm::*;

/// ユーザー関連のビジネスロジックを集約するサービス。
pub struct UserService;

impl UserService {
    /// IDでユーザーを検索
    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<user::Model>, AppError> {
        User::find_by_id(id).one(db).await.map_err(AppError::Database)
    }

    /// ユーザー名で検索
    pub async fn find_by_username(
        db: &DatabaseConnection,
        username: &str,
    ) -> Result<Option<user::Model>, AppError> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(db)
            .await
            .map_err(AppError::Database)
    }

    /// アカウント登録。
    /// 入力を検証し、パスワードをハッシュ化して保存します。
    pub async fn register(
        db: &DatabaseConnection,
        username: &str,
        password: &str,
    ) -> Result<user::Model, AppError> {
        CredentialsValidation::new(username, password)
            .validate_form()
            .map_err(|msgs| AppError::Validation(msgs.join(", ")))?;

        if Self::find_by_username(db, username).await?.is_some() {
            return Err(AppError::Validation(
                "このユーザー名は既に使用されています".to_string(),
            ));
        }

        let password_hash = hash_password(password)?;

        let new_user = user::ActiveModel {
            username: Set(username.to_owned()),
            password_hash: Set(Some(password_hash)),
            is_guest: Set(false),
            ..Default::default()
        };

        new_user.insert(db).await.map_err(AppError::Database)
    }

    /// 認証処理。
    /// 資格情報の誤りはすべて NotAuthenticated に丸め、詳細は返しません。
    pub async fn authenticate(
        db: &DatabaseConnection,
        username: &str,
        password: &str,
    ) -> Result<user::Model, AppError> {
        let user = Self::find_by_username(db, username)
            .await?
            .ok_or(AppError::NotAuthenticated)?;

        // ゲストアカウントはパスワードを持たない
        let hash = user
            .password_hash
            .as_deref()
            .ok_or(AppError::NotAuthenticated)?;

        if !verify_password(password, hash) {
            return Err(AppError::NotAuthenticated);
        }

        Ok(user)
    }

    /// ゲストアカウントを作成します。
    /// ユーザー名はランダム生成で、パスワードログインはできません。
    pub async fn create_guest(db: &DatabaseConnection) -> Result<user::Model, AppError> {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(12)
            .map(char::from)
            .collect();

        let new_user = user::ActiveModel {
            username: Set(format!("guest_{}", suffix)),
            password_hash: Set(None),
            is_guest: Set(true),
            ..Default::default()
        };

        new_user.insert(db).await.map_err(AppError::Database)
    }
}
