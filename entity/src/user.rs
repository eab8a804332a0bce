use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, ToSchema)]
#[schema(as = User)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(unique)]
    pub email: String,

    /// bcrypt hash, `None` for accounts that never set a password
    /// (eg: B2B accounts created by a approval before their first login)
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    pub name: Option<String>,
    pub phone: Option<String>,
    pub role_id: i32,

    /// marks a account whose password is the system assigned default,
    /// forcing a password set step before normal login succeeds
    pub is_first_login: bool,

    pub is_verified: bool,
    pub last_login_at: Option<DateTimeWithTimeZone>,

    /// JWT to be used to reset the user password
    ///
    /// note: this is stored in the database because this token needs to be one time
    /// use only and a simple solution is to clear this column after the token is used
    #[serde(skip_serializing)]
    #[sea_orm(column_type = "Text", nullable, unique)]
    pub reset_password_token: Option<String>,

    /// one time code sent to the user phone to verify it
    #[serde(skip_serializing)]
    pub phone_otp: Option<String>,

    #[serde(skip_serializing)]
    pub phone_otp_expires_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id",
        on_update = "Cascade",
        on_delete = "NoAction"
    )]
    Role,
    #[sea_orm(has_many = "super::booking::Entity")]
    Booking,
    #[sea_orm(has_many = "super::b2b_user::Entity")]
    B2bUser,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booking.def()
    }
}

impl Related<super::b2b_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::B2bUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
