//! Flat column-name generation for nested paths.

use std::collections::HashMap;

use crate::error::NameCollisionError;
use crate::path::NestedPath;

/// Policy turning a nested path into a flat column identifier.
///
/// Implementations must be deterministic: the same path always produces
/// the same name. Collision detection across a full path set happens in
/// [`assign_flat_names`], not in the policy itself.
pub trait NamePolicy: Send + Sync {
    /// Flat column name for the given path.
    fn flat_name(&self, path: &NestedPath) -> String;
}

/// Default policy: join path segments with `_`.
///
/// `profile.contact.email` becomes `profile_contact_email`; a depth-1 path
/// keeps its column name unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnderscorePolicy;

impl NamePolicy for UnderscorePolicy {
    fn flat_name(&self, path: &NestedPath) -> String {
        path.segments().join("_")
    }
}

/// Apply a naming policy to an ordered path set.
///
/// Returns one flat name per input path, in input order. Fails if two
/// distinct paths map to the same name, naming both offenders: a schema
/// with a leaf column `a_b` next to a nested path `a.b` is rejected here
/// rather than producing an ambiguous projection later.
pub fn assign_flat_names(
    paths: &[NestedPath],
    policy: &dyn NamePolicy,
) -> Result<Vec<String>, NameCollisionError> {
    let mut seen: HashMap<String, &NestedPath> = HashMap::with_capacity(paths.len());
    let mut names = Vec::with_capacity(paths.len());

    for path in paths {
        let name = policy.flat_name(path);
        if let Some(first) = seen.get(&name) {
            return Err(NameCollisionError {
                column: name,
                first: first.to_string(),
                second: path.to_string(),
            });
        }
        seen.insert(name.clone(), path);
        names.push(name);
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underscore_policy() {
        let policy = UnderscorePolicy;
        assert_eq!(
            policy.flat_name(&NestedPath::parse("profile.contact.email")),
            "profile_contact_email"
        );
        assert_eq!(policy.flat_name(&NestedPath::new("name")), "name");
    }

    #[test]
    fn test_assign_preserves_order() {
        let paths = vec![
            NestedPath::new("id"),
            NestedPath::parse("person.name"),
            NestedPath::parse("person.age"),
        ];
        let names = assign_flat_names(&paths, &UnderscorePolicy).unwrap();
        assert_eq!(names, vec!["id", "person_name", "person_age"]);
    }

    #[test]
    fn test_collision_names_both_paths() {
        let paths = vec![NestedPath::new("a_b"), NestedPath::parse("a.b")];
        let err = assign_flat_names(&paths, &UnderscorePolicy).unwrap_err();
        assert_eq!(err.column, "a_b");
        assert_eq!(err.first, "a_b");
        assert_eq!(err.second, "a.b");
    }

    #[test]
    fn test_determinism() {
        let paths = vec![
            NestedPath::parse("x.y"),
            NestedPath::parse("x.z"),
            NestedPath::new("w"),
        ];
        let first = assign_flat_names(&paths, &UnderscorePolicy).unwrap();
        let second = assign_flat_names(&paths, &UnderscorePolicy).unwrap();
        assert_eq!(first, second);
    }
}
