use everify_lib::users::{EMAIL_VERIFIED_ATTR, is_verified_value};
use everify_lib::User;
use serde::{Serialize, Deserialize};

/// a single name/value attribute as the directory reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Value", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Attribute {
    pub fn new<N, V>(name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        Attribute {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

/// raw user record returned by the directory.
///
/// `admin-get-user` names the attribute list `UserAttributes` while
/// `list-users` names it `Attributes`, both decode into the same field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserRecord {
    pub username: String,

    #[serde(rename = "UserAttributes", alias = "Attributes", default)]
    pub attributes: Vec<Attribute>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_status: Option<String>,
}

impl UserRecord {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter()
            .find(|attr| attr.name == name)
            .and_then(|attr| attr.value.as_deref())
    }

    pub fn is_email_verified(&self) -> bool {
        is_verified_value(self.attribute(EMAIL_VERIFIED_ATTR))
    }
}

impl From<&UserRecord> for User {
    fn from(record: &UserRecord) -> Self {
        User::new(record.username.clone(), record.is_email_verified())
    }
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        let email_verified = record.is_email_verified();

        User::new(record.username, email_verified)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersResponse {
    #[serde(rename = "Users", default)]
    pub users: Vec<UserRecord>,

    #[serde(rename = "PaginationToken", default, skip_serializing_if = "Option::is_none")]
    pub pagination_token: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn admin_get_user_payload() {
        let json = serde_json::json!({
            "Username": "Cognito_foo-bar.com",
            "UserAttributes": [
                {"Name": "sub", "Value": "b1c5"},
                {"Name": "email_verified", "Value": "true"},
                {"Name": "email", "Value": "foo@bar.com"}
            ],
            "UserCreateDate": "2021-03-01T10:00:00.000000+00:00",
            "Enabled": true,
            "UserStatus": "EXTERNAL_PROVIDER"
        });

        let record: UserRecord = serde_json::from_value(json).unwrap();

        assert_eq!(record.username, "Cognito_foo-bar.com");
        assert_eq!(record.attribute("email"), Some("foo@bar.com"));
        assert_eq!(record.enabled, Some(true));
        assert!(record.is_email_verified());
    }

    #[test]
    fn list_users_payload() {
        let json = serde_json::json!({
            "Users": [
                {
                    "Username": "Cognito_a-b.com",
                    "Attributes": [{"Name": "email_verified", "Value": "false"}]
                },
                {
                    "Username": "Cognito_c-d.com",
                    "Attributes": []
                }
            ],
            "PaginationToken": "next-1"
        });

        let response: ListUsersResponse = serde_json::from_value(json).unwrap();

        assert_eq!(response.users.len(), 2);
        assert_eq!(response.pagination_token.as_deref(), Some("next-1"));

        let users: Vec<User> = response.users.iter().map(User::from).collect();

        assert_eq!(users, vec![
            User::new("Cognito_a-b.com", false),
            User::new("Cognito_c-d.com", false),
        ]);
    }

    #[test]
    fn missing_verified_attribute_is_unverified() {
        let record = UserRecord {
            username: "Cognito_x-y.com".into(),
            attributes: vec![Attribute::new("email", "x@y.com")],
            enabled: None,
            user_status: None,
        };

        assert!(!record.is_email_verified());
    }
}
