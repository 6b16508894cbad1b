//! Application services - orchestrate ports to carry out use cases.

mod posts;

pub use posts::PostService;

use uuid::Uuid;

use crate::error::DomainError;

/// Parse an id taken from a request path.
///
/// A blank segment means the id is missing altogether; anything else that is
/// not a UUID is malformed. Both are client errors.
pub fn parse_id(entity_type: &'static str, raw: &str) -> Result<Uuid, DomainError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DomainError::BadRequest(format!("{entity_type} not found")));
    }
    Uuid::parse_str(raw)
        .map_err(|_| DomainError::BadRequest(format!("Invalid {entity_type} id: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id("Post", &id.to_string()).unwrap(), id);
        assert!(matches!(
            parse_id("Post", "  "),
            Err(DomainError::BadRequest(_))
        ));
        assert!(matches!(
            parse_id("Post", "65f1c0ffee"),
            Err(DomainError::BadRequest(_))
        ));
    }
}
