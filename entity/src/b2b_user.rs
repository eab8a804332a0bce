use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

/// Links a user account to the B2B company it books rides for,
/// a user has at most one active company association
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, ToSchema)]
#[schema(as = B2bUser)]
#[sea_orm(table_name = "b2b_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(unique)]
    pub user_id: i32,

    pub company_id: i32,
    pub is_primary: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::b2b_company::Entity",
        from = "Column::CompanyId",
        to = "super::b2b_company::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    B2bCompany,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::b2b_company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::B2bCompany.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
