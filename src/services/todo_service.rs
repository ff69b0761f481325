use crate::entities::todo::{self, Priority};
use crate::entities::prelude::*;
use crate::errors::AppError;
use crate::validation::TodoTextValidation;
use chrono::Utc;
use sea_orm::*;
use serde::Serialize;

/// TODOの集計結果。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TodoStats {
    pub total: u64,
    pub completed: u64,
    pub pending: u64,
}

/// TODO関連のビジネスロジックを集約するサービス。
/// すべての操作は呼び出し元ユーザーのIDで絞り込まれます。
/// 他ユーザーのTODOを指した変更操作は、存在を漏らさないよう NotFound として扱います。
pub struct TodoService;

impl TodoService {
    /// 呼び出し元ユーザーのTODO一覧を新しい順で取得
    pub async fn list(
        db: &DatabaseConnection,
        user_id: i32,
    ) -> Result<Vec<todo::Model>, AppError> {
        Todo::find()
            .filter(todo::Column::UserId.eq(user_id))
            .order_by_desc(todo::Column::CreatedAt)
            .order_by_desc(todo::Column::Id)
            .all(db)
            .await
            .map_err(AppError::Database)
    }

    /// TODOを作成。優先度を省略した場合は medium になります
    pub async fn create(
        db: &DatabaseConnection,
        user_id: i32,
        text: &str,
        priority: Option<Priority>,
    ) -> Result<todo::Model, AppError> {
        let text = text.trim();
        TodoTextValidation::new(text)
            .validate_form()
            .map_err(|msgs| AppError::Validation(msgs.join(", ")))?;

        let new_todo = todo::ActiveModel {
            text: Set(text.to_owned()),
            completed: Set(false),
            priority: Set(priority.unwrap_or_default()),
            user_id: Set(user_id),
            created_at: Set(Utc::now().timestamp_millis()),
            ..Default::default()
        };

        new_todo.insert(db).await.map_err(AppError::Database)
    }

    /// 完了/未完了を反転
    pub async fn toggle(db: &DatabaseConnection, user_id: i32, id: i32) -> Result<(), AppError> {
        let existing = Self::find_owned(db, user_id, id).await?;

        let mut active_model: todo::ActiveModel = existing.clone().into();
        active_model.completed = Set(!existing.completed);
        active_model.update(db).await?;

        Ok(())
    }

    /// 本文を書き換え
    pub async fn update_text(
        db: &DatabaseConnection,
        user_id: i32,
        id: i32,
        text: &str,
    ) -> Result<(), AppError> {
        let existing = Self::find_owned(db, user_id, id).await?;

        let text = text.trim();
        TodoTextValidation::new(text)
            .validate_form()
            .map_err(|msgs| AppError::Validation(msgs.join(", ")))?;

        let mut active_model: todo::ActiveModel = existing.into();
        active_model.text = Set(text.to_owned());
        active_model.update(db).await?;

        Ok(())
    }

    /// TODOを削除
    pub async fn remove(db: &DatabaseConnection, user_id: i32, id: i32) -> Result<(), AppError> {
        let result = Todo::delete_many()
            .filter(todo::Column::Id.eq(id))
            .filter(todo::Column::UserId.eq(user_id))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    /// 件数を集計。total = completed + pending が常に成り立ちます
    pub async fn stats(db: &DatabaseConnection, user_id: i32) -> Result<TodoStats, AppError> {
        let todos = Self::list(db, user_id).await?;
        let completed = todos.iter().filter(|t| t.completed).count() as u64;
        let total = todos.len() as u64;

        Ok(TodoStats {
            total,
            completed,
            pending: total - completed,
        })
    }

    /// 呼び出し元が所有するTODOを1件取得。
    /// 存在しない場合も、他ユーザーの所有だった場合も NotFound になります
    async fn find_owned(
        db: &DatabaseConnection,
        user_id: i32,
        id: i32,
    ) -> Result<todo::Model, AppError> {
        Todo::find_by_id(id)
            .filter(todo::Column::UserId.eq(user_id))
            .one(db)
            .await?
            .ok_or(AppError::NotFound)
    }
}
