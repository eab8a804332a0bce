use entity::{pricing_settings, role, user};
use sea_orm_migration::{
    sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, Set},
    DbErr,
};

/// Hash a password with bcrypt using the default cost
fn hash_password(plain: &str) -> String {
    bcrypt::hash(plain, bcrypt::DEFAULT_COST).unwrap()
}

/// creates the role if a row with its name does not exist yet
async fn role_by_name(tx: &DatabaseTransaction, name: &str) -> Result<role::Model, DbErr> {
    let existing = role::Entity::find()
        .filter(role::Column::Name.eq(name))
        .one(tx)
        .await?;

    if let Some(r) = existing {
        return Ok(r);
    }

    role::ActiveModel {
        name: Set(String::from(name)),
        ..Default::default()
    }
    .insert(tx)
    .await
}

/// seeds the three fixed roles: customer, admin and b2b_user
pub async fn fixed_roles(tx: &DatabaseTransaction) -> Result<(), DbErr> {
    for name in [role::CUSTOMER, role::ADMIN, role::B2B_USER] {
        role_by_name(tx, name).await?;
    }

    Ok(())
}

/// seeds the global pricing settings row with its defaults
pub async fn default_pricing_settings(tx: &DatabaseTransaction) -> Result<(), DbErr> {
    let existing = pricing_settings::Entity::find().one(tx).await?;

    if existing.is_none() {
        pricing_settings::ActiveModel {
            min_km_threshold: Set(100.0),
            min_km_airport_apply: Set(false),
            min_km_oneway_apply: Set(false),
            min_km_roundtrip_apply: Set(false),
            ..Default::default()
        }
        .insert(tx)
        .await?;
    }

    Ok(())
}

/// seeds the bootstrap admin account so the dispatch panel is
/// reachable on a fresh database
pub async fn bootstrap_admin(tx: &DatabaseTransaction) -> Result<(), DbErr> {
    let admin_role = role_by_name(tx, role::ADMIN).await?;

    let existing = user::Entity::find()
        .filter(user::Column::Email.eq("admin@urbancabz.local"))
        .one(tx)
        .await?;

    if existing.is_none() {
        user::ActiveModel {
            email: Set(String::from("admin@urbancabz.local")),
            password_hash: Set(Some(hash_password("ChangeMe@123"))),
            name: Set(Some(String::from("Admin"))),
            role_id: Set(admin_role.id),
            is_first_login: Set(false),
            is_verified: Set(true),
            ..Default::default()
        }
        .insert(tx)
        .await?;
    }

    Ok(())
}
