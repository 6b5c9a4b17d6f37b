//! Role and permission entities and the per-account role graph.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A named permission attached to one or more roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Permission {
    /// Unique permission identifier.
    pub id: Uuid,
    /// Permission name, embedded verbatim in token scopes.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
}

/// A named role referencing its permissions by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Unique role identifier.
    pub id: Uuid,
    /// Role name without the `ROLE_` prefix.
    pub name: String,
    /// Ids of the permissions granted by this role, in attachment order.
    pub permission_ids: Vec<Uuid>,
}

/// An account's roles and every permission they reference, loaded together.
///
/// Roles keep the order they were loaded in; permissions are resolved by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleGraph {
    roles: Vec<Role>,
    permissions: HashMap<Uuid, Permission>,
}

impl RoleGraph {
    /// Build a graph from loaded roles and permissions.
    pub fn new(roles: Vec<Role>, permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            roles,
            permissions: permissions.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    /// The account's roles in load order.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Resolve a role's permissions. Ids missing from the graph are skipped.
    pub fn permissions_of<'a>(&'a self, role: &'a Role) -> impl Iterator<Item = &'a Permission> {
        role.permission_ids
            .iter()
            .filter_map(|id| self.permissions.get(id))
    }

    /// Whether the account holds any role other than `plain_role`.
    pub fn has_role_other_than(&self, plain_role: &str) -> bool {
        self.roles.iter().any(|r| r.name != plain_role)
    }

    /// Whether the account holds no roles.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permission(name: &str) -> Permission {
        Permission {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
        }
    }

    #[test]
    fn test_permissions_resolved_in_attachment_order() {
        let read = permission("BOOK_READ");
        let write = permission("BOOK_WRITE");
        let role = Role {
            id: Uuid::new_v4(),
            name: "LIBRARIAN".to_string(),
            permission_ids: vec![write.id, read.id],
        };
        let graph = RoleGraph::new(vec![role.clone()], vec![read, write]);

        let names: Vec<&str> = graph
            .permissions_of(&graph.roles()[0])
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["BOOK_WRITE", "BOOK_READ"]);
    }

    #[test]
    fn test_dangling_permission_id_skipped() {
        let role = Role {
            id: Uuid::new_v4(),
            name: "USER".to_string(),
            permission_ids: vec![Uuid::new_v4()],
        };
        let graph = RoleGraph::new(vec![role], Vec::new());
        assert_eq!(graph.permissions_of(&graph.roles()[0]).count(), 0);
    }

    #[test]
    fn test_has_role_other_than() {
        let user = Role {
            id: Uuid::new_v4(),
            name: "USER".to_string(),
            permission_ids: vec![],
        };
        let admin = Role {
            name: "ADMIN".to_string(),
            id: Uuid::new_v4(),
            permission_ids: vec![],
        };
        assert!(!RoleGraph::new(vec![user.clone()], vec![]).has_role_other_than("USER"));
        assert!(RoleGraph::new(vec![user, admin], vec![]).has_role_other_than("USER"));
        assert!(!RoleGraph::default().has_role_other_than("USER"));
    }
}
