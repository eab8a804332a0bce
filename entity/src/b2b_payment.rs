use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

/// Append only ledger of payments received from a company,
/// never updated or deleted
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, ToSchema)]
#[schema(as = B2bPayment)]
#[sea_orm(table_name = "b2b_payment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub company_id: i32,
    pub amount: f64,
    pub payment_mode: String,
    pub reference_no: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,

    pub paid_at: DateTimeWithTimeZone,

    /// admin that recorded the payment
    pub created_by: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::b2b_company::Entity",
        from = "Column::CompanyId",
        to = "super::b2b_company::Column::Id",
        on_update = "Cascade",
        on_delete = "NoAction"
    )]
    B2bCompany,
}

impl Related<super::b2b_company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::B2bCompany.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
