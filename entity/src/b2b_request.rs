use super::enums::RequestStatus;
use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, ToSchema)]
#[schema(as = B2bRequest)]
#[sea_orm(table_name = "b2b_request")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeWithTimeZone,

    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub company_name: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub message: Option<String>,

    pub status: RequestStatus,

    /// the company the request resolved to on approval
    pub company_id: Option<i32>,

    #[sea_orm(column_type = "Text", nullable)]
    pub admin_notes: Option<String>,

    pub reviewed_by: Option<i32>,
    pub reviewed_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::b2b_company::Entity",
        from = "Column::CompanyId",
        to = "super::b2b_company::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    B2bCompany,
}

impl Related<super::b2b_company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::B2bCompany.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
