//! Id parsing and author lookup.

use crate::model::{float_to_id, RawId, Usuario};
use crate::store::Store;

/// Parse a path or body id. Integral values only (`"3"`, `" 3 "`, `"3.0"`); anything else is `None`.
pub fn parse_id(raw: &str) -> Option<i32> {
    let s = raw.trim();
    if let Ok(n) = s.parse::<i32>() {
        return Some(n);
    }
    s.parse::<f64>().ok().and_then(float_to_id)
}

/// Resolve the user an id refers to. Never fails: an unconvertible id and a store
/// failure both come back as `None`, the same as a missing user.
pub async fn validate_user_reference(store: &dyn Store, raw: &RawId) -> Option<Usuario> {
    let id = raw.to_id()?;
    match store.find_usuario(id).await {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!(id, error = %e, "user lookup failed; treating as absent");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewUsuario;
    use crate::store::MemoryStore;

    #[test]
    fn parse_id_accepts_integral_input() {
        assert_eq!(parse_id("7"), Some(7));
        assert_eq!(parse_id(" 7 "), Some(7));
        assert_eq!(parse_id("7.0"), Some(7));
        assert_eq!(parse_id("-2"), Some(-2));
    }

    #[test]
    fn parse_id_rejects_everything_else() {
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("7.5"), None);
        assert_eq!(parse_id("NaN"), None);
        assert_eq!(parse_id("inf"), None);
        assert_eq!(parse_id("99999999999"), None);
        assert_eq!(parse_id(""), None);
    }

    #[tokio::test]
    async fn reference_resolves_existing_user() {
        let store = MemoryStore::new();
        let created = store
            .create_usuario(NewUsuario {
                email: "a@x.com".into(),
                name: "A".into(),
            })
            .await
            .unwrap();
        let found = validate_user_reference(&store, &RawId::Text(created.id.to_string())).await;
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn reference_is_absent_for_missing_or_invalid_ids() {
        let store = MemoryStore::new();
        assert_eq!(validate_user_reference(&store, &RawId::Int(999)).await, None);
        assert_eq!(validate_user_reference(&store, &RawId::Text("x".into())).await, None);
    }

    #[tokio::test]
    async fn reference_is_absent_when_store_fails() {
        let store = MemoryStore::new();
        store
            .create_usuario(NewUsuario {
                email: "a@x.com".into(),
                name: "A".into(),
            })
            .await
            .unwrap();
        store.set_unavailable(true);
        assert_eq!(validate_user_reference(&store, &RawId::Int(1)).await, None);
    }
}
