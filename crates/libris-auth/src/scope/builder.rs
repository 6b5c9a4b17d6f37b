//! Flattens a role/permission graph into the `scope` token claim.

use libris_entity::account::RoleGraph;

/// Prefix prepended to every role name in a scope string.
pub const ROLE_PREFIX: &str = "ROLE_";

/// Derives the scope string embedded in issued tokens.
///
/// For each role, in graph order, emits `ROLE_<name>` followed by the names of
/// the role's permissions. Segments are concatenated without a separator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeBuilder;

impl ScopeBuilder {
    /// Creates a new scope builder.
    pub fn new() -> Self {
        Self
    }

    /// Builds the scope for a loaded role graph. An empty graph yields `""`.
    pub fn build(&self, graph: &RoleGraph) -> String {
        let mut scope = String::new();
        for role in graph.roles() {
            scope.push_str(ROLE_PREFIX);
            scope.push_str(&role.name);
            for permission in graph.permissions_of(role) {
                scope.push_str(&permission.name);
            }
        }
        scope
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_entity::account::{Permission, Role};
    use uuid::Uuid;

    fn permission(name: &str) -> Permission {
        Permission {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: Some(format!("{name} permission")),
        }
    }

    fn role(name: &str, permissions: &[&Permission]) -> Role {
        Role {
            id: Uuid::new_v4(),
            name: name.to_string(),
            permission_ids: permissions.iter().map(|p| p.id).collect(),
        }
    }

    #[test]
    fn test_empty_graph_yields_empty_scope() {
        assert_eq!(ScopeBuilder::new().build(&RoleGraph::default()), "");
    }

    #[test]
    fn test_roles_and_permissions_concatenated() {
        let borrow = permission("BOOK_BORROW");
        let manage = permission("BOOK_MANAGE");
        let graph = RoleGraph::new(
            vec![
                role("USER", &[&borrow]),
                role("LIBRARIAN", &[&borrow, &manage]),
            ],
            vec![borrow.clone(), manage.clone()],
        );

        assert_eq!(
            ScopeBuilder::new().build(&graph),
            "ROLE_USERBOOK_BORROWROLE_LIBRARIANBOOK_BORROWBOOK_MANAGE"
        );
    }

    #[test]
    fn test_role_without_permissions() {
        let graph = RoleGraph::new(vec![role("ADMIN", &[])], Vec::new());
        assert_eq!(ScopeBuilder::new().build(&graph), "ROLE_ADMIN");
    }

    #[test]
    fn test_build_is_deterministic() {
        let read = permission("CATALOG_READ");
        let graph = RoleGraph::new(vec![role("USER", &[&read])], vec![read.clone()]);
        let builder = ScopeBuilder::new();
        assert_eq!(builder.build(&graph), builder.build(&graph));
    }
}
