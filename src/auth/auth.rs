use crate::{error::AppError, models::Claims};
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use futures::future::{Ready, ready};

/// The caller's session, attached to the request by the auth middleware.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: u64,
    pub display_name: String,
    pub email: String,
    pub is_hr_admin: bool,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            display_name: claims.display_name,
            email: claims.email,
            is_hr_admin: claims.is_hr_admin,
        }
    }
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user = req.extensions().get::<AuthUser>().cloned();
        ready(user.ok_or_else(|| AppError::Unauthorized("Missing session".into())))
    }
}

impl AuthUser {
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_hr_admin {
            Ok(())
        } else {
            Err(AppError::Forbidden("HR Admin only".into()))
        }
    }
}
