use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, ToSchema)]
#[schema(as = B2bCompany)]
#[sea_orm(table_name = "b2b_company")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeWithTimeZone,

    pub company_name: String,

    #[sea_orm(unique)]
    pub company_email: String,

    pub company_phone: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::b2b_user::Entity")]
    B2bUser,
    #[sea_orm(has_many = "super::b2b_booking::Entity")]
    B2bBooking,
    #[sea_orm(has_many = "super::b2b_payment::Entity")]
    B2bPayment,
    #[sea_orm(has_many = "super::company_fleet::Entity")]
    CompanyFleet,
}

impl Related<super::b2b_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::B2bUser.def()
    }
}

impl Related<super::b2b_booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::B2bBooking.def()
    }
}

impl Related<super::b2b_payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::B2bPayment.def()
    }
}

impl Related<super::company_fleet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompanyFleet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
