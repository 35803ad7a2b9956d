//! User operations
//!
//! Registration, login and account management for teachers and students.

use tracing::{info, warn};
use crate::error::{ExamError, Result};
use crate::database::{queries, Role, User, UserFilter, UserKey};
use crate::database::queries::StoredUser;
use crate::crypto;
use crate::utils::{generate_salt, generate_uuid};
use crate::{CLASS_NAME_MAX_BYTES, NAME_MAX_BYTES, USERNAME_MAX_LENGTH, USERNAME_MIN_LENGTH};
use super::classroom::Classroom;

/// Check a login name: 3-24 ASCII letters and digits
pub fn validate_username(username: &str) -> Result<()> {
    if username.len() < USERNAME_MIN_LENGTH {
        return Err(ExamError::Validation(format!("Username {} is too short", username)));
    }
    if username.len() > USERNAME_MAX_LENGTH {
        return Err(ExamError::Validation(format!("Username {} is too long", username)));
    }
    if let Some(c) = username.chars().find(|c| !c.is_ascii_alphanumeric()) {
        return Err(ExamError::Validation(format!(
            "Username {} contains invalid character {:?}",
            username, c
        )));
    }
    Ok(())
}

/// Check a student or staff number and narrow it to `u32`
pub fn validate_number(number: u64) -> Result<u32> {
    match u32::try_from(number) {
        Ok(0) => Err(ExamError::Validation("Number must be positive".to_string())),
        Ok(n) => Ok(n),
        Err(_) => Err(ExamError::Validation(format!("Number {} is out of range", number))),
    }
}

/// Check a real name: non-empty, at most 45 bytes
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ExamError::Validation("Name is empty".to_string()));
    }
    if name.len() > NAME_MAX_BYTES {
        return Err(ExamError::Validation(format!("Name {} is too long", name)));
    }
    Ok(())
}

fn validate_profile(user: &User) -> Result<()> {
    validate_username(&user.username)?;
    validate_name(&user.name)?;
    validate_number(u64::from(user.number))?;
    if user.class_name.len() > CLASS_NAME_MAX_BYTES {
        return Err(ExamError::Validation(format!("Class name {} is too long", user.class_name)));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(ExamError::Validation("Password is empty".to_string()));
    }
    Ok(())
}

impl Classroom {
    /// Get the first user whose `key` column equals `content`
    pub fn get_user(&self, key: UserKey, content: &str) -> Result<Option<User>> {
        queries::get_user_by(self.user_conn()?, key, content)
    }

    /// Like [`Classroom::get_user`] with the key given by column name
    pub fn find_user(&self, key: &str, content: &str) -> Result<Option<User>> {
        self.get_user(key.parse()?, content)
    }

    /// List users matching `filter`
    pub fn list_users(&self, filter: &UserFilter, limit: usize) -> Result<Vec<User>> {
        queries::query_users(self.user_conn()?, filter, limit)
    }

    /// Store a new user with a freshly salted password hash
    pub fn insert_user(&self, user: &User, password: &str) -> Result<()> {
        validate_profile(user)?;
        validate_password(password)?;

        let conn = self.user_conn()?;
        if queries::get_user_by(conn, UserKey::Username, &user.username)?.is_some() {
            return Err(ExamError::UsernameTaken(user.username.clone()));
        }

        let salt = generate_salt();
        let stored = StoredUser {
            user: user.clone(),
            hashpass: crypto::hash_password(&salt, password),
            salt,
        };
        queries::insert_user(conn, &stored)?;
        info!("[Classroom] Added user {} ({:?})", user.username, user.role);
        Ok(())
    }

    /// Update a user's profile
    pub fn edit_user(&self, user: &User) -> Result<()> {
        validate_profile(user)?;

        let conn = self.user_conn()?;
        if let Some(owner) = queries::get_user_by(conn, UserKey::Username, &user.username)? {
            if owner.id != user.id {
                return Err(ExamError::UsernameTaken(user.username.clone()));
            }
        }
        queries::update_user(conn, user)?;
        info!("[Classroom] Updated user {}", user.id);
        Ok(())
    }

    /// Delete a user
    pub fn delete_user(&self, user_id: &str) -> Result<()> {
        queries::delete_user(self.user_conn()?, user_id)?;
        info!("[Classroom] Deleted user {}", user_id);
        Ok(())
    }

    /// Register a teacher account
    pub fn register_teacher(&self, name: &str, number: u64, username: &str, password: &str) -> Result<User> {
        let user = User {
            id: generate_uuid(),
            username: username.to_string(),
            role: Role::Teacher,
            name: name.to_string(),
            class_name: String::new(),
            number: validate_number(number)?,
            belong_to: String::new(),
        };
        self.insert_user(&user, password)?;
        Ok(user)
    }

    /// Add a student owned by `teacher_id`
    pub fn add_student(
        &self,
        teacher_id: &str,
        name: &str,
        class_name: &str,
        number: u64,
        username: &str,
        password: &str,
    ) -> Result<User> {
        let teacher = self.get_user(UserKey::Id, teacher_id)?
            .ok_or_else(|| ExamError::UserNotFound(teacher_id.to_string()))?;
        if !teacher.permission().manage_student {
            return Err(ExamError::PermissionDenied(format!(
                "{} may not manage students",
                teacher.username
            )));
        }

        let user = User {
            id: generate_uuid(),
            username: username.to_string(),
            role: Role::Student,
            name: name.to_string(),
            class_name: class_name.to_string(),
            number: validate_number(number)?,
            belong_to: teacher.id,
        };
        self.insert_user(&user, password)?;
        Ok(user)
    }

    /// Check credentials and return the matching user
    ///
    /// An unknown username and a wrong password fail the same way.
    pub fn login(&self, username: &str, password: &str) -> Result<User> {
        let stored = queries::get_stored_user(self.user_conn()?, UserKey::Username, username)?;

        match stored {
            Some(stored) if crypto::verify_password(&stored.salt, password, &stored.hashpass) => {
                info!("[Classroom] User {} logged in", username);
                Ok(stored.user)
            }
            _ => {
                warn!("[Classroom] Failed login for {}", username);
                Err(ExamError::InvalidCredentials)
            }
        }
    }

    /// Replace a user's password after checking the current one
    pub fn change_password(&self, user_id: &str, old_password: &str, new_password: &str) -> Result<()> {
        validate_password(new_password)?;

        let conn = self.user_conn()?;
        let stored = queries::get_stored_user(conn, UserKey::Id, user_id)?
            .ok_or_else(|| ExamError::UserNotFound(user_id.to_string()))?;

        if !crypto::verify_password(&stored.salt, old_password, &stored.hashpass) {
            warn!("[Classroom] Wrong current password for {}", user_id);
            return Err(ExamError::InvalidCredentials);
        }

        let salt = generate_salt();
        let hashpass = crypto::hash_password(&salt, new_password);
        queries::update_user_password(conn, user_id, &hashpass, &salt)?;
        info!("[Classroom] Changed password of {}", user_id);
        Ok(())
    }
}
