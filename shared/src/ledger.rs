//! Ledger digests
//!
//! Every ledger record is hashed over its canonical JSON form:
//! - object keys sorted lexicographically
//! - no whitespace
//! - numbers and strings exactly as `serde_json` writes them
//!
//! The digest covers a single record only. Entries are NOT linked to the
//! previous entry's digest, so reordering, deletion or insertion of whole
//! entries cannot be detected; only in-place edits of one entry can.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Serialize a value to canonical JSON (sorted keys, compact)
pub fn canonical_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let value = serde_json::to_value(value)?;
    let mut out = String::new();
    write_canonical(&value, &mut out)?;
    Ok(out)
}

fn write_canonical(value: &serde_json::Value, out: &mut String) -> serde_json::Result<()> {
    use serde_json::Value;

    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&serde_json::to_string(key)?);
                out.push(':');
                write_canonical(&map[key], out)?;
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out)?;
            }
            out.push(']');
        }
        scalar => out.push_str(&serde_json::to_string(scalar)?),
    }
    Ok(())
}

/// Lower-case hex SHA-256 of the canonical JSON of `value`
pub fn digest<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let canonical = canonical_json(value)?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_json_sorts_nested_keys() {
        let value = json!({
            "b": 1,
            "a": {"z": true, "m": [3, {"y": null, "x": "s"}]},
        });
        assert_eq!(
            canonical_json(&value).unwrap(),
            r#"{"a":{"m":[3,{"x":"s","y":null}],"z":true},"b":1}"#
        );
    }

    #[test]
    fn test_canonical_json_is_independent_of_field_order() {
        #[derive(Serialize)]
        struct Forward {
            qty: u32,
            product: &'static str,
        }
        #[derive(Serialize)]
        struct Backward {
            product: &'static str,
            qty: u32,
        }

        let a = Forward { qty: 2, product: "tomato" };
        let b = Backward { product: "tomato", qty: 2 };
        assert_eq!(canonical_json(&a).unwrap(), canonical_json(&b).unwrap());
        assert_eq!(digest(&a).unwrap(), digest(&b).unwrap());
    }

    #[test]
    fn test_digest_is_deterministic_hex() {
        let record = json!({"order_id": 1001, "masp": 10.0});
        let first = digest(&record).unwrap();
        let second = digest(&record).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_digest_matches_known_vector() {
        // sha256(b"{}")
        assert_eq!(
            digest(&json!({})).unwrap(),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn test_digest_changes_with_any_field() {
        let base = json!({"order_id": 1001, "qty": 2});
        let edited = json!({"order_id": 1001, "qty": 3});
        assert_ne!(digest(&base).unwrap(), digest(&edited).unwrap());
    }
}
