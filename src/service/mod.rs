//! Entity validators run by handlers before calling the store.

mod date;
mod validation;
pub use date::normalize_create_at;
pub use validation::{parse_id, validate_user_reference};
