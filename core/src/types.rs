//! Domain DTOs for the licensing console.
//!
//! # Design
//! The types mirror the backend's camelCase schema. Ids are opaque strings
//! assigned by the backend; an empty id means "not yet created" and is left
//! out of request bodies. Unknown fields are ignored and optional fields
//! default, since the backend's responses vary between endpoints.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::catalog::ResourceName;

/// A record stored in a named REST collection.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    const RESOURCE: ResourceName;

    fn id(&self) -> &str;
}

fn default_true() -> bool {
    true
}

/// Console operator or dealer employee.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dealer_id: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Reseller that distributes licenses to customers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Dealer {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct App {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub app_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Installable product belonging to an [`App`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub program_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Right to run a [`Program`], issued to a dealer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct License {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub license_key: String,
    pub program_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dealer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Grants a user a role on a program.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

macro_rules! impl_entity {
    ($($ty:ty => $resource:ident),* $(,)?) => {
        $(
            impl Entity for $ty {
                const RESOURCE: ResourceName = ResourceName::$resource;

                fn id(&self) -> &str {
                    &self.id
                }
            }
        )*
    };
}

impl_entity! {
    User => USERS,
    Dealer => DEALERS,
    App => APPS,
    Program => PROGRAMS,
    License => LICENSES,
    Authorization => AUTHORIZATIONS,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn app_decodes_minimal_backend_shape() {
        let app: App = serde_json::from_value(json!({"id": "1", "appName": "X"})).unwrap();
        assert_eq!(app.id, "1");
        assert_eq!(app.app_name, "X");
        assert!(app.is_active);
        assert!(app.description.is_none());
    }

    #[test]
    fn empty_id_is_not_serialized() {
        let dealer = Dealer {
            name: "Merkez Bayi".to_string(),
            ..Default::default()
        };
        let body = serde_json::to_value(&dealer).unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["name"], "Merkez Bayi");
        assert!(body.get("taxNumber").is_none());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let license: License = serde_json::from_value(json!({
            "id": "l-1",
            "licenseKey": "AAAA-BBBB",
            "programId": "p-1",
            "createdAt": "2024-01-01T00:00:00Z",
            "isActive": false
        }))
        .unwrap();
        assert_eq!(license.license_key, "AAAA-BBBB");
        assert!(!license.is_active);
    }

    #[test]
    fn entities_name_their_resource() {
        assert_eq!(App::RESOURCE, ResourceName::APPS);
        assert_eq!(Authorization::RESOURCE.as_str(), "authorizations");
        let user = User {
            id: "u-1".to_string(),
            user_name: "admin".to_string(),
            ..Default::default()
        };
        assert_eq!(user.id(), "u-1");
    }
}
