use anyhow::Result;
use entity::{audit_log, enums::AuditAction};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde::Serialize;
use serde_json::Value;

/// Serializes a entity into a JSON snapshot for the audit trail
pub fn snapshot<T: Serialize>(value: &T) -> Option<Value> {
    serde_json::to_value(value).ok()
}

/// Appends a entry to the audit trail
///
/// snapshots are stored as JSON so they stay readable after the entity
/// itself changes shape or the row is deleted
pub async fn record(
    db: &DatabaseConnection,
    entity_type: &str,
    entity_id: i32,
    action: AuditAction,
    old_value: Option<Value>,
    new_value: Option<Value>,
    admin_id: i32,
    reason: &str,
) -> Result<()> {
    audit_log::ActiveModel {
        entity_type: Set(String::from(entity_type)),
        entity_id: Set(entity_id),
        action: Set(action),
        old_value: Set(old_value),
        new_value: Set(new_value),
        admin_id: Set(Some(admin_id)),
        reason: Set(Some(String::from(reason))),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(())
}
