//! Identifier generation for profiles and sessions
//!
//! Identifiers only namespace data between devices; they are not secrets.

use chrono::Utc;
use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect()
}

/// New per-device identifier: `user_<unix millis>_<9 base36 chars>`
pub fn new_user_id() -> String {
    format!("user_{}_{}", Utc::now().timestamp_millis(), random_suffix())
}

/// New session identifier scoped to a profile
///
/// Format: `<user_id>_<unix millis>_<9 base36 chars>`.
pub fn new_session_id(user_id: &str) -> String {
    format!(
        "{}_{}_{}",
        user_id,
        Utc::now().timestamp_millis(),
        random_suffix()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_shape() {
        let id = new_user_id();
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "user");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_session_id_is_prefixed_by_owner() {
        let id = new_session_id("user_1_abcdefghi");
        assert!(id.starts_with("user_1_abcdefghi_"));
    }

    #[test]
    fn test_ids_do_not_repeat() {
        let ids: std::collections::HashSet<String> = (0..200).map(|_| new_user_id()).collect();
        assert_eq!(ids.len(), 200);
    }
}
