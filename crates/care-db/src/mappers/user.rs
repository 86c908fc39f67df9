//! User entity <-> model mapper

use care_core::entities::User;
use care_core::error::DomainError;

use crate::models::UserModel;

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        Ok(User {
            id: model.id,
            email: model.email,
            role: model.role.parse()?,
            status: model.status.parse()?,
            needs_password_change: model.needs_password_change,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
