use super::enums::AuditAction;
use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

/// Append only trail of mutating admin actions, rows are never
/// updated or deleted
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, ToSchema)]
#[schema(as = AuditLogEntry)]
#[sea_orm(table_name = "audit_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeWithTimeZone,

    /// entity kind the action was performed on, eg: DRIVER, PRICING, BOOKING
    pub entity_type: String,
    pub entity_id: i32,

    pub action: AuditAction,

    /// JSON snapshot of the entity before the action
    pub old_value: Option<Json>,

    /// JSON snapshot of the entity after the action
    pub new_value: Option<Json>,

    pub admin_id: Option<i32>,
    pub reason: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
