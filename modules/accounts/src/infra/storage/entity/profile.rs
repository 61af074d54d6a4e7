use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, EntityTrait, Set};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
    pub full_name: String,
    pub phone_number: String,
    pub specialty: Option<String>,
    pub medical_license_number: Option<String>,
    pub is_verified: bool,
    pub clinic_address: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Data for creating a profile row alongside its user.
pub struct NewProfileEntity {
    pub user_id: Uuid,
    pub full_name: String,
    pub phone_number: String,
    pub specialty: Option<String>,
    pub medical_license_number: Option<String>,
    pub clinic_address: Option<String>,
}

/// Flip the verification flag. Returns false when no such profile exists.
/// Verification itself is an operator action, not a REST surface.
pub async fn set_verified<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    verified: bool,
) -> Result<bool, DbErr> {
    let Some(model) = Entity::find_by_id(user_id).one(db).await? else {
        return Ok(false);
    };
    let mut active: ActiveModel = model.into();
    active.is_verified = Set(verified);
    active.update(db).await?;
    Ok(true)
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    new_profile: NewProfileEntity,
) -> Result<Model, DbErr> {
    let active_model = ActiveModel {
        user_id: Set(new_profile.user_id),
        full_name: Set(new_profile.full_name),
        phone_number: Set(new_profile.phone_number),
        specialty: Set(new_profile.specialty),
        medical_license_number: Set(new_profile.medical_license_number),
        is_verified: Set(false),
        clinic_address: Set(new_profile.clinic_address),
    };

    active_model.insert(db).await
}
