//! Generated identifiers for coerced content.
//!
//! The model is asked to supply its own node/option/objective ids, but it
//! frequently omits or duplicates them. Missing ids are replaced with
//! `prefix_<base36 millis>_<base36 random>` values. Collision probability
//! is negligible at the scale this service targets; these are not
//! cryptographic identifiers.

use chrono::Utc;
use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_SUFFIX_LEN: usize = 6;

/// Generates an id of the form `prefix_kx3f9a_8b2c1d`.
pub fn generate_id(prefix: &str) -> String {
    let timestamp = to_base36(Utc::now().timestamp_millis().max(0) as u64);
    let mut rng = rand::thread_rng();
    let random: String = (0..RANDOM_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{prefix}_{timestamp}_{random}")
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn uses_requested_prefix() {
        let id = generate_id("node");
        assert!(id.starts_with("node_"));
        assert_eq!(id.split('_').count(), 3);
    }

    #[test]
    fn ids_are_unique_in_practice() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_id("opt")).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn base36_round_trip_samples() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1234567890), "kf12oi");
    }
}
