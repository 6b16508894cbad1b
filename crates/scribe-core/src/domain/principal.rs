use uuid::Uuid;

/// The authenticated caller of a mutating operation.
///
/// Handed to the service explicitly by the HTTP layer; the service never
/// looks up "the current user" on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
}

impl Principal {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}
