use serde::{Deserialize, Serialize};

/// A user as returned by the users endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
    pub email: String,
}

impl User {
    /// One-line label used by the list view
    pub fn display_line(&self) -> String {
        match &self.username {
            Some(username) => format!("{} (@{}) <{}>", self.name, username, self.email),
            None => format!("{} <{}>", self.name, self.email),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_ignores_extra_fields() {
        let json = r#"[{"id":1,"name":"Leanne Graham","username":"Bret","email":"Sincere@april.biz","phone":"1-770"}]"#;
        let users: Vec<User> = serde_json::from_str(json).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].display_line(), "Leanne Graham (@Bret) <Sincere@april.biz>");
    }

    #[test]
    fn test_username_is_optional() {
        let user: User = serde_json::from_str(r#"{"id":2,"name":"Ervin","email":"e@x.io"}"#).unwrap();
        assert_eq!(user.username, None);
        assert_eq!(user.display_line(), "Ervin <e@x.io>");
    }
}
