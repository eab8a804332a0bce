use super::dto::{ApprovalOutcome, ApprovedUser};
use crate::config::app_config;
use bcrypt::{hash, DEFAULT_COST};
use chrono::Utc;
use entity::{b2b_company, b2b_request, b2b_user, enums::RequestStatus, role, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, TransactionError, TransactionTrait,
};

pub enum ApproveError {
    RequestNotFound,
    AlreadyApproved,
    Internal,
}

impl From<DbErr> for ApproveError {
    fn from(_: DbErr) -> Self {
        ApproveError::Internal
    }
}

async fn find_or_create_company<C: ConnectionTrait>(
    tx: &C,
    request: &b2b_request::Model,
) -> Result<b2b_company::Model, DbErr> {
    let existing = b2b_company::Entity::find()
        .filter(b2b_company::Column::CompanyEmail.eq(&request.contact_email))
        .one(tx)
        .await?;

    if let Some(company) = existing {
        return Ok(company);
    }

    b2b_company::ActiveModel {
        company_name: Set(request.company_name.clone()),
        company_email: Set(request.contact_email.clone()),
        company_phone: Set(Some(request.contact_phone.clone())),
        ..Default::default()
    }
    .insert(tx)
    .await
}

async fn find_or_create_b2b_role<C: ConnectionTrait>(tx: &C) -> Result<role::Model, DbErr> {
    let existing = role::Entity::find()
        .filter(role::Column::Name.eq(role::B2B_USER))
        .one(tx)
        .await?;

    if let Some(r) = existing {
        return Ok(r);
    }

    role::ActiveModel {
        name: Set(String::from(role::B2B_USER)),
        ..Default::default()
    }
    .insert(tx)
    .await
}

/// finds or creates the user account for the request contact
///
/// fresh accounts get the system assigned default password and the first
/// login flag, accounts that already hold a password keep it
async fn find_or_create_account<C: ConnectionTrait>(
    tx: &C,
    request: &b2b_request::Model,
    role_id: i32,
    default_password_hash: String,
) -> Result<user::Model, DbErr> {
    let existing = user::Entity::find()
        .filter(user::Column::Email.eq(&request.contact_email))
        .one(tx)
        .await?;

    if let Some(found) = existing {
        let has_password = found.password_hash.is_some();

        let mut account: user::ActiveModel = found.into();
        account.role_id = Set(role_id);

        if !has_password {
            account.password_hash = Set(Some(default_password_hash));
            account.is_first_login = Set(true);
        }

        return account.update(tx).await;
    }

    user::ActiveModel {
        email: Set(request.contact_email.clone()),
        password_hash: Set(Some(default_password_hash)),
        name: Set(Some(request.contact_name.clone())),
        phone: Set(Some(request.contact_phone.clone())),
        role_id: Set(role_id),
        is_first_login: Set(true),
        is_verified: Set(false),
        ..Default::default()
    }
    .insert(tx)
    .await
}

async fn link_user_to_company<C: ConnectionTrait>(
    tx: &C,
    user_id: i32,
    company_id: i32,
) -> Result<(), DbErr> {
    let existing = b2b_user::Entity::find()
        .filter(b2b_user::Column::UserId.eq(user_id))
        .one(tx)
        .await?;

    if existing.is_some() {
        return Ok(());
    }

    b2b_user::ActiveModel {
        user_id: Set(user_id),
        company_id: Set(company_id),
        is_primary: Set(true),
        ..Default::default()
    }
    .insert(tx)
    .await?;

    Ok(())
}

/// Approves a onboarding request in a single transaction: resolves the
/// company, the user account (default password + first login for new
/// accounts), the company link and flips the request to APPROVED
pub async fn approve_request(
    db: &DatabaseConnection,
    request_id: i32,
    admin_id: i32,
    admin_notes: Option<String>,
) -> Result<ApprovalOutcome, ApproveError> {
    let request = b2b_request::Entity::find_by_id(request_id)
        .one(db)
        .await?
        .ok_or(ApproveError::RequestNotFound)?;

    if request.status == RequestStatus::Approved {
        return Err(ApproveError::AlreadyApproved);
    }

    // hash outside the transaction, bcrypt is slow on purpose
    let default_password_hash = hash(&app_config().b2b_default_password, DEFAULT_COST)
        .or(Err(ApproveError::Internal))?;

    let outcome = db
        .transaction::<_, ApprovalOutcome, DbErr>(|tx| {
            Box::pin(async move {
                let company = find_or_create_company(tx, &request).await?;
                let b2b_role = find_or_create_b2b_role(tx).await?;

                let account =
                    find_or_create_account(tx, &request, b2b_role.id, default_password_hash)
                        .await?;

                link_user_to_company(tx, account.id, company.id).await?;

                let mut reviewed: b2b_request::ActiveModel = request.into();
                reviewed.status = Set(RequestStatus::Approved);
                reviewed.company_id = Set(Some(company.id));
                reviewed.admin_notes = Set(admin_notes);
                reviewed.reviewed_by = Set(Some(admin_id));
                reviewed.reviewed_at = Set(Some(Utc::now().into()));
                reviewed.update(tx).await?;

                Ok(ApprovalOutcome {
                    company,
                    user: ApprovedUser {
                        id: account.id,
                        email: account.email,
                        name: account.name,
                    },
                })
            })
        })
        .await
        .map_err(|e| match e {
            TransactionError::Connection(_) => ApproveError::Internal,
            TransactionError::Transaction(_) => ApproveError::Internal,
        })?;

    Ok(outcome)
}

/// Rejects a onboarding request, recording the reviewer and its notes
pub async fn reject_request(
    db: &DatabaseConnection,
    request_id: i32,
    admin_id: i32,
    admin_notes: Option<String>,
) -> Result<Option<b2b_request::Model>, DbErr> {
    let request = b2b_request::Entity::find_by_id(request_id).one(db).await?;

    let Some(request) = request else {
        return Ok(None);
    };

    let mut reviewed: b2b_request::ActiveModel = request.into();
    reviewed.status = Set(RequestStatus::Rejected);
    reviewed.admin_notes = Set(admin_notes);
    reviewed.reviewed_by = Set(Some(admin_id));
    reviewed.reviewed_at = Set(Some(Utc::now().into()));

    Ok(Some(reviewed.update(db).await?))
}
