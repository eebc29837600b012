use blake2::digest::{Update, VariableOutput};
use blake2::Blake2bVar;
use data_encoding::{Encoding, Specification};
use once_cell::sync::Lazy;

use crate::error::{Result, RosterError};

/// Base-32 alphabet for identifiers. The standard alphabet is remapped onto
/// digits plus the letters that survive dropping visually ambiguous ones
/// (a, i, o, u), so tokens stay easy to read aloud and transcribe.
pub const ID_ALPHABET: &str = "0123456789bcdefghjklmnpqrstvwxyz";

static ID_ENCODING: Lazy<Encoding> = Lazy::new(|| {
    let mut spec = Specification::new();
    spec.symbols.push_str(ID_ALPHABET);
    spec.encoding()
        .expect("identifier alphabet is a valid base-32 symbol set")
});

/// Builds the canonical hash input: the optional prefix (taken as-is, skipped
/// when empty) followed by each value trimmed and lower-cased, joined with
/// `|`. The pipe is reserved; field values are not expected to contain it.
pub fn canonical_hash_input(prefix: Option<&str>, values: &[&str]) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(values.len() + 1);
    if let Some(prefix) = prefix.filter(|p| !p.is_empty()) {
        parts.push(prefix.to_string());
    }
    parts.extend(values.iter().map(|v| v.trim().to_lowercase()));
    parts.join("|")
}

/// Computes the identifier for one tuple of raw field values: blake2b over
/// the canonical input, truncated to `digest_bytes`, re-encoded in the custom
/// alphabet with no padding. Identical normalized inputs always produce
/// identical identifiers. Digest sizes outside 1..=64 bytes are rejected.
pub fn generate(prefix: Option<&str>, values: &[&str], digest_bytes: usize) -> Result<String> {
    // Blake2bVar::new accepts a zero output size, which would yield an empty
    // token, so the range is checked here.
    if digest_bytes == 0 || digest_bytes > 64 {
        return Err(RosterError::Schema(format!(
            "digest size {digest_bytes} out of range (expected 1..=64 bytes)"
        )));
    }

    let input = canonical_hash_input(prefix, values);
    let mut hasher = Blake2bVar::new(digest_bytes).map_err(|_| {
        RosterError::Schema(format!("digest size {digest_bytes} rejected by blake2b"))
    })?;
    hasher.update(input.as_bytes());

    let mut digest = vec![0u8; digest_bytes];
    hasher
        .finalize_variable(&mut digest)
        .map_err(|_| RosterError::Schema(format!("digest buffer size {digest_bytes} invalid")))?;

    Ok(ID_ENCODING.encode(&digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUTH: &[&str] = &["Ruth", "Babe", "1895", "2", "6"];

    #[test]
    fn canonical_input_normalizes_values_but_not_prefix() {
        assert_eq!(
            canonical_hash_input(None, &["  Ruth ", "BABE", "1895"]),
            "ruth|babe|1895"
        );
        assert_eq!(
            canonical_hash_input(Some("MLB"), &["Ruth"]),
            "MLB|ruth"
        );
    }

    #[test]
    fn empty_prefix_is_treated_as_absent() {
        assert_eq!(
            canonical_hash_input(Some(""), RUTH),
            canonical_hash_input(None, RUTH)
        );
    }

    #[test]
    fn known_vector_ruth() {
        // blake2b("ruth|babe|1895|2|6", digest_size=6) through the custom
        // alphabet, independently computed.
        assert_eq!(generate(None, RUTH, 6).unwrap(), "hqmes4e568");
    }

    #[test]
    fn prefix_namespaces_the_identifier() {
        assert_eq!(generate(Some("mlb"), RUTH, 6).unwrap(), "p2z780yxm8");
        assert_ne!(
            generate(Some("mlb"), RUTH, 6).unwrap(),
            generate(None, RUTH, 6).unwrap()
        );
    }

    #[test]
    fn generation_is_deterministic() {
        let first = generate(None, RUTH, 6).unwrap();
        for _ in 0..10 {
            assert_eq!(generate(None, RUTH, 6).unwrap(), first);
        }
        // Normalization makes case/whitespace variants collide on purpose.
        assert_eq!(
            generate(None, &["  ruth", "BABE ", "1895", "2", "6"], 6).unwrap(),
            first
        );
    }

    #[test]
    fn empty_values_hash_as_empty_strings() {
        assert_eq!(
            generate(None, &["ruth", "babe", "", "1895", "2", "6"], 6).unwrap(),
            "wwh9cgtwdw"
        );
    }

    #[test]
    fn digest_size_controls_token_length() {
        // ceil(8n / 5) characters for an n-byte digest, no padding.
        assert_eq!(generate(None, RUTH, 4).unwrap(), "xchn1j0");
        assert_eq!(generate(None, RUTH, 8).unwrap(), "vnzy0tmljqcd0");
        assert_eq!(generate(None, RUTH, 6).unwrap().len(), 10);
    }

    #[test]
    fn tokens_use_only_the_custom_alphabet() {
        for digest_bytes in [1, 3, 6, 12, 32] {
            let token = generate(Some("x"), RUTH, digest_bytes).unwrap();
            assert!(
                token.chars().all(|c| ID_ALPHABET.contains(c)),
                "unexpected character in {token}"
            );
            assert!(!token.contains('='));
        }
    }

    #[test]
    fn out_of_range_digest_size_is_rejected() {
        assert!(matches!(
            generate(None, RUTH, 0),
            Err(RosterError::Schema(_))
        ));
        assert!(matches!(
            generate(None, RUTH, 65),
            Err(RosterError::Schema(_))
        ));
    }
}
