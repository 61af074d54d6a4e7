pub mod entity;
pub mod mapper;
pub mod migrations;

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use entity::{profile, user};

/// Load a user together with its profile in one joined query.
///
/// A user row without a profile row violates the registration invariant, so
/// it is surfaced as an error rather than silently dropped.
pub async fn find_account<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<(user::Model, profile::Model)>, DbErr> {
    match user::Entity::find_by_id(id)
        .find_also_related(profile::Entity)
        .one(db)
        .await?
    {
        None => Ok(None),
        Some((u, Some(p))) => Ok(Some((u, p))),
        Some((u, None)) => Err(DbErr::Custom(format!(
            "user {} has no profile row",
            u.id
        ))),
    }
}

/// All doctor-role users whose profile is verified, with profiles joined.
pub async fn list_verified_doctors<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<(user::Model, profile::Model)>, DbErr> {
    let rows = user::Entity::find()
        .filter(user::Column::Role.eq(auth::Role::Doctor.as_str()))
        .find_also_related(profile::Entity)
        .filter(profile::Column::IsVerified.eq(true))
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(u, p)| p.map(|p| (u, p)))
        .collect())
}
