use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// TODOの優先度。DBには "low" / "medium" / "high" の文字列で保存されます。
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[sea_orm(string_value = "low")]
    Low,
    #[default]
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
}

/// TODOモデル。
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "todo")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// 本文 (必須、最大500文字)
    pub text: String,

    /// 完了状態
    pub completed: bool,

    /// 優先度 (省略時は medium)
    pub priority: Priority,

    /// 所有者のユーザーID (外部キー)。作成時に固定され、以後変更されない
    pub user_id: i32,

    /// 作成日時 (エポックミリ秒)。新しい順の並び替えキー
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
