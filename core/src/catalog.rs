//! Resource names and their per-operation fallback messages.
//!
//! Fallback messages are shown when the backend rejects a request without
//! saying why. Each resource/operation pair has its own text so a failure can
//! be traced back to its call site from the message alone.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// Key of a REST collection. Doubles as URL path segment and cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceName(Cow<'static, str>);

impl ResourceName {
    pub const USERS: ResourceName = ResourceName::from_static("users");
    pub const DEALERS: ResourceName = ResourceName::from_static("dealers");
    pub const APPS: ResourceName = ResourceName::from_static("apps");
    pub const PROGRAMS: ResourceName = ResourceName::from_static("programs");
    pub const LICENSES: ResourceName = ResourceName::from_static("licenses");
    pub const AUTHORIZATIONS: ResourceName = ResourceName::from_static("authorizations");

    pub const fn from_static(name: &'static str) -> Self {
        ResourceName(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        ResourceName(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceName {
    fn from(name: &str) -> Self {
        ResourceName::new(name)
    }
}

/// Operation performed against a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

/// Fallback text per operation for one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackMessages {
    pub list: String,
    pub get: String,
    pub create: String,
    pub update: String,
    pub delete: String,
}

impl FallbackMessages {
    /// Builds the table from the plural and singular display nouns, e.g.
    /// `("Uygulamalar", "Uygulama")`.
    pub fn from_nouns(plural: &str, singular: &str) -> Self {
        Self {
            list: format!("{plural} alınamadı"),
            get: format!("{singular} alınamadı"),
            create: format!("{singular} oluşturulamadı"),
            update: format!("{singular} güncellenemedi"),
            delete: format!("{singular} silinemedi"),
        }
    }

    /// Table for a resource the catalog has no entry for.
    pub fn generic(resource: &ResourceName) -> Self {
        Self {
            list: format!("{resource} listesi alınamadı"),
            get: format!("{resource} kaydı alınamadı"),
            create: format!("{resource} kaydı oluşturulamadı"),
            update: format!("{resource} kaydı güncellenemedi"),
            delete: format!("{resource} kaydı silinemedi"),
        }
    }

    pub fn for_operation(&self, operation: Operation) -> &str {
        match operation {
            Operation::List => &self.list,
            Operation::Get => &self.get,
            Operation::Create => &self.create,
            Operation::Update => &self.update,
            Operation::Delete => &self.delete,
        }
    }
}

/// Configuration table `{ resource: { list, get, create, update, delete } }`.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    entries: HashMap<ResourceName, FallbackMessages>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        let mut catalog = Self::empty();
        catalog.insert(ResourceName::USERS, FallbackMessages::from_nouns("Kullanıcılar", "Kullanıcı"));
        catalog.insert(ResourceName::DEALERS, FallbackMessages::from_nouns("Bayiler", "Bayi"));
        catalog.insert(ResourceName::APPS, FallbackMessages::from_nouns("Uygulamalar", "Uygulama"));
        catalog.insert(ResourceName::PROGRAMS, FallbackMessages::from_nouns("Programlar", "Program"));
        catalog.insert(ResourceName::LICENSES, FallbackMessages::from_nouns("Lisanslar", "Lisans"));
        catalog.insert(ResourceName::AUTHORIZATIONS, FallbackMessages::from_nouns("Yetkiler", "Yetki"));
        catalog
    }
}

impl MessageCatalog {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, resource: ResourceName, messages: FallbackMessages) {
        self.entries.insert(resource, messages);
    }

    /// Messages for `resource`, generated when the catalog has no entry.
    pub fn messages(&self, resource: &ResourceName) -> FallbackMessages {
        self.entries
            .get(resource)
            .cloned()
            .unwrap_or_else(|| FallbackMessages::generic(resource))
    }

    pub fn fallback(&self, resource: &ResourceName, operation: Operation) -> String {
        self.messages(resource).for_operation(operation).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_covers_known_resources() {
        let catalog = MessageCatalog::default();
        assert_eq!(catalog.fallback(&ResourceName::APPS, Operation::List), "Uygulamalar alınamadı");
        assert_eq!(catalog.fallback(&ResourceName::APPS, Operation::Get), "Uygulama alınamadı");
        assert_eq!(catalog.fallback(&ResourceName::DEALERS, Operation::Delete), "Bayi silinemedi");
        assert_eq!(
            catalog.fallback(&ResourceName::LICENSES, Operation::Update),
            "Lisans güncellenemedi"
        );
    }

    #[test]
    fn fallbacks_are_distinct_per_resource_and_operation() {
        let catalog = MessageCatalog::default();
        let operations = [
            Operation::List,
            Operation::Get,
            Operation::Create,
            Operation::Update,
            Operation::Delete,
        ];
        let resources = [
            ResourceName::USERS,
            ResourceName::DEALERS,
            ResourceName::APPS,
            ResourceName::PROGRAMS,
            ResourceName::LICENSES,
            ResourceName::AUTHORIZATIONS,
        ];
        let mut seen = std::collections::HashSet::new();
        for resource in &resources {
            for operation in operations {
                assert!(seen.insert(catalog.fallback(resource, operation)));
            }
        }
    }

    #[test]
    fn unknown_resource_gets_generated_messages() {
        let catalog = MessageCatalog::default();
        let name = ResourceName::from("invoices");
        assert_eq!(catalog.fallback(&name, Operation::Create), "invoices kaydı oluşturulamadı");
    }

    #[test]
    fn static_and_owned_names_compare_equal() {
        assert_eq!(ResourceName::new("apps"), ResourceName::APPS);
        assert_eq!(ResourceName::APPS.to_string(), "apps");
    }
}
