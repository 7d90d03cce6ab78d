//! Shared object-key derivation.
//!
//! Key format: `YYYY/MM/DD/<suffix>-<sanitized-filename>`, with the date
//! segments reflecting UTC at authorization time. The key is generated once,
//! by the upload authorizer, and is the sole identifier threaded through
//! upload and retrieval.

use chrono::{DateTime, Datelike, Utc};
use rand::Rng;

const SUFFIX_LEN: usize = 8;
const SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Replace every character outside `[a-zA-Z0-9._-]` with `_`.
///
/// Total (any input maps to a valid name) and idempotent (sanitizing twice
/// equals sanitizing once).
pub fn sanitize_file_name(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Derive an object key for `file_name` at time `now`.
///
/// The suffix is 8 characters of `[a-z0-9]` from a non-cryptographic RNG:
/// it makes keys unguessable-in-practice and collisions negligible, but
/// neither property is guaranteed. Issued keys are not recorded, so reuse of
/// a colliding key would overwrite silently. Accepted trade-off.
pub fn object_key(now: DateTime<Utc>, file_name: &str) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| SUFFIX_CHARSET[rng.random_range(0..SUFFIX_CHARSET.len())] as char)
        .collect();

    format!(
        "{:04}/{:02}/{:02}/{}-{}",
        now.year(),
        now.month(),
        now.day(),
        suffix,
        sanitize_file_name(file_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn assert_key_shape(key: &str) {
        let parts: Vec<&str> = key.split('/').collect();
        assert_eq!(parts.len(), 4, "expected 4 segments in {}", key);
        assert_eq!(parts[0].len(), 4);
        assert_eq!(parts[1].len(), 2);
        assert_eq!(parts[2].len(), 2);
        assert!(parts[..3].iter().all(|p| p.bytes().all(|b| b.is_ascii_digit())));

        let (suffix, name) = parts[3].split_once('-').expect("suffix-name separator");
        assert_eq!(suffix.len(), 8);
        assert!(suffix
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
        assert!(!name.is_empty());
    }

    #[test]
    fn test_key_matches_documented_pattern() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let key = object_key(now, "clip.mp4");
        assert_key_shape(&key);
        assert!(key.starts_with("2024/05/01/"));
        assert!(key.ends_with("-clip.mp4"));
    }

    #[test]
    fn test_date_segments_are_zero_padded() {
        let now = Utc.with_ymd_and_hms(2026, 1, 9, 0, 0, 0).unwrap();
        let key = object_key(now, "a.wav");
        assert!(key.starts_with("2026/01/09/"));
    }

    #[test]
    fn test_sanitize_replaces_disallowed_characters() {
        assert_eq!(
            sanitize_file_name("réunion du 5 mai.mp4"),
            "r_union_du_5_mai.mp4"
        );
        assert_eq!(sanitize_file_name("a/b\\c:d.bin"), "a_b_c_d.bin");
    }

    #[test]
    fn test_sanitize_keeps_allowed_characters() {
        let name = "Clip_01.final-v2.mp4";
        assert_eq!(sanitize_file_name(name), name);
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let once = sanitize_file_name("été à Paris (2).mov");
        let twice = sanitize_file_name(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_keys_differ_across_calls() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let a = object_key(now, "clip.mp4");
        let b = object_key(now, "clip.mp4");
        // Suffixes are random; two draws colliding is ~1 in 36^8.
        assert_ne!(a, b);
    }
}
