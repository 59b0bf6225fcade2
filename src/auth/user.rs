//! The registered users, kept in memory for the lifetime of the server.

use crate::{Error, auth::PasswordHash};

pub type UserId = u32;

/// A registered user.
///
/// The username is the email address when one was given, otherwise the phone number.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub chama_name: String,
    pub chama_type: String,
    pub password_hash: PasswordHash,
}

/// The details of a user that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub chama_name: String,
    pub chama_type: String,
    pub password_hash: PasswordHash,
}

#[derive(Debug, Default)]
pub struct UserStore {
    users: Vec<User>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn get_by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|user| user.username == username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Store `new_user` and assign it the next ID.
    ///
    /// # Errors
    ///
    /// Returns [Error::DuplicateUsername] if the username is taken.
    pub fn insert(&mut self, new_user: NewUser) -> Result<&User, Error> {
        if self.get_by_username(&new_user.username).is_some() {
            return Err(Error::DuplicateUsername);
        }

        let id = self.users.iter().map(|user| user.id).max().unwrap_or(0) + 1;

        self.users.push(User {
            id,
            username: new_user.username,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
            phone: new_user.phone,
            chama_name: new_user.chama_name,
            chama_type: new_user.chama_type,
            password_hash: new_user.password_hash,
        });

        self.users.last().ok_or(Error::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, auth::PasswordHash};

    use super::{NewUser, UserStore};

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_owned(),
            first_name: "Faith".to_owned(),
            last_name: String::new(),
            email: String::new(),
            phone: "0712345678".to_owned(),
            chama_name: String::new(),
            chama_type: String::new(),
            password_hash: PasswordHash::new_unchecked("hunter2"),
        }
    }

    #[test]
    fn insert_assigns_increasing_ids() {
        let mut store = UserStore::new();

        let first = store.insert(new_user("0712345678")).unwrap().id;
        let second = store.insert(new_user("faith@example.com")).unwrap().id;

        assert_eq!((first, second), (1, 2));
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.get_by_username("faith@example.com").map(|user| user.id),
            Some(2)
        );
    }

    #[test]
    fn insert_rejects_duplicate_username() {
        let mut store = UserStore::new();
        store.insert(new_user("0712345678")).unwrap();

        let result = store.insert(new_user("0712345678"));

        assert_eq!(result.err(), Some(Error::DuplicateUsername));
        assert_eq!(store.len(), 1);
    }
}
