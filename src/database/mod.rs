pub mod manager;
pub mod models;
pub mod store;

use uuid::Uuid;

use self::manager::DatabaseError;

/// Parse a path identifier, surfacing malformed ids as their own failure
/// cause so the classifier can fold them into "not found".
pub fn parse_id(raw: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(raw).map_err(|_| DatabaseError::MalformedId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_rejects_malformed() {
        assert!(matches!(parse_id("not-a-uuid"), Err(DatabaseError::MalformedId(_))));
        assert!(parse_id("7d3e1a52-0b54-4a7e-9e37-5f2b1f6d9c01").is_ok());
    }
}
