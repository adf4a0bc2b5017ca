use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgHasArrayType, PgTypeInfo};

/// The closed set of platform roles. Stored as TEXT[] on users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase", no_pg_array)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Author,
    Reviewer,
    Coordinator,
}

impl PgHasArrayType for Role {
    fn array_type_info() -> PgTypeInfo {
        <&str as PgHasArrayType>::array_type_info()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Author => "author",
            Role::Reviewer => "reviewer",
            Role::Coordinator => "coordinator",
        };
        f.write_str(s)
    }
}

/// Pure allow-list check: does the identity hold at least one permitted role?
pub fn permitted(user_roles: &[Role], allowed: &[Role]) -> bool {
    user_roles.iter().any(|r| allowed.contains(r))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permitted_on_intersection() {
        assert!(permitted(
            &[Role::Author, Role::Reviewer],
            &[Role::Reviewer, Role::Coordinator]
        ));
    }

    #[test]
    fn denied_without_intersection() {
        assert!(!permitted(&[Role::Author], &[Role::Coordinator]));
    }

    #[test]
    fn denied_with_empty_role_set() {
        assert!(!permitted(&[], &[Role::Author]));
        assert!(!permitted(&[Role::Author], &[]));
    }
}
