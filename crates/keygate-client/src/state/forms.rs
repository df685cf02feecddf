use keygate_protocol::{LoginRequest, RegisterRequest};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in all fields")]
    MissingFields,
}

#[derive(Debug, Default, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn request(&self) -> Result<LoginRequest, FormError> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(FormError::MissingFields);
        }

        Ok(LoginRequest {
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Default, Clone)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn request(&self) -> Result<RegisterRequest, FormError> {
        if self.username.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return Err(FormError::MissingFields);
        }

        Ok(RegisterRequest {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
