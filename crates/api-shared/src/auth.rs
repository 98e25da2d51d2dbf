/// Reasons an API key check fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No key is configured, so the dashboard is closed.
    #[error("dashboard access is disabled")]
    Disabled,
    #[error("missing API key")]
    Missing,
    #[error("invalid API key")]
    Invalid,
}

/// Validates the provided API key against the key resolved at startup.
///
/// An empty `expected_key` disables access entirely rather than accepting an empty key.
pub fn validate_api_key(provided_key: Option<&str>, expected_key: &str) -> Result<(), AuthError> {
    if expected_key.is_empty() {
        return Err(AuthError::Disabled);
    }
    let provided_key = provided_key.ok_or(AuthError::Missing)?;

    if constant_time_eq(provided_key.as_bytes(), expected_key.as_bytes()) {
        Ok(())
    } else {
        Err(AuthError::Invalid)
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
