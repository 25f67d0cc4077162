// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "post_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub task_id: i32,
    pub note_url: String,
    pub note_id: String,
    pub title: String,
    pub posted_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::scraping_task::Entity",
        from = "Column::TaskId",
        to = "super::scraping_task::Column::Id"
    )]
    ScrapingTask,
}

impl Related<super::scraping_task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScrapingTask.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
