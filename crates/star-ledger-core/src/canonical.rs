//! Canonical CBOR encoding of block state for hashing.
//!
//! The hashed state is a CBOR map with integer keys, encoded with the
//! RFC 8949 core deterministic rules:
//! - Map keys sorted by encoded byte comparison
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - No floats (block times are i64 milliseconds)
//!
//! A block's own `hash` is never part of its hashed state, so recomputing
//! the digest of an untouched block always reproduces the stored value.

use ciborium::value::Value;

use crate::block::Block;
use crate::error::CoreError;

/// Block state keys (keys 0-23 encode as single bytes).
mod keys {
    pub const HEIGHT: u64 = 0;
    pub const TIME: u64 = 1;
    pub const BODY: u64 = 2;
    pub const PREVIOUS_BLOCK_HASH: u64 = 3;
}

/// Encode the hashed state of a block to canonical CBOR bytes.
pub fn canonical_block_bytes(block: &Block) -> Result<Vec<u8>, CoreError> {
    let value = block_to_cbor_value(block);
    let mut buf = Vec::new();
    encode_value_to(&mut buf, &value)?;
    Ok(buf)
}

fn block_to_cbor_value(block: &Block) -> Value {
    let previous = match &block.previous_block_hash {
        Some(hash) => Value::Bytes(hash.0.to_vec()),
        None => Value::Null,
    };

    Value::Map(vec![
        (Value::Integer(keys::HEIGHT.into()), Value::Integer(block.height.into())),
        (Value::Integer(keys::TIME.into()), Value::Integer(block.time.into())),
        (Value::Integer(keys::BODY.into()), Value::Text(block.body.clone())),
        (Value::Integer(keys::PREVIOUS_BLOCK_HASH.into()), previous),
    ])
}

fn encode_value_to(buf: &mut Vec<u8>, value: &Value) -> Result<(), CoreError> {
    match value {
        Value::Integer(i) => encode_integer(buf, *i),
        Value::Bytes(b) => {
            encode_uint(buf, 2, b.len() as u64);
            buf.extend_from_slice(b);
        }
        Value::Text(s) => {
            encode_uint(buf, 3, s.len() as u64);
            buf.extend_from_slice(s.as_bytes());
        }
        Value::Array(arr) => {
            encode_uint(buf, 4, arr.len() as u64);
            for item in arr {
                encode_value_to(buf, item)?;
            }
        }
        Value::Map(entries) => encode_map_canonical(buf, entries)?,
        Value::Bool(b) => buf.push(if *b { 0xf5 } else { 0xf4 }),
        Value::Null => buf.push(0xf6),
        Value::Float(_) => {
            return Err(CoreError::Encoding(
                "floats are not allowed in hashed block state".into(),
            ))
        }
        other => {
            return Err(CoreError::Encoding(format!(
                "unsupported CBOR value in hashed block state: {:?}",
                other
            )))
        }
    }
    Ok(())
}

/// Major types 0 and 1.
fn encode_integer(buf: &mut Vec<u8>, i: ciborium::value::Integer) {
    let n: i128 = i.into();

    if n >= 0 {
        encode_uint(buf, 0, n as u64);
    } else {
        // CBOR encodes -1 as 0, -2 as 1, etc.
        encode_uint(buf, 1, (-1 - n) as u64);
    }
}

fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Major type 5, keys sorted by their encoded bytes.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(Value, Value)]) -> Result<(), CoreError> {
    let mut pairs = Vec::with_capacity(entries.len());
    for (k, v) in entries {
        let mut key_buf = Vec::new();
        encode_value_to(&mut key_buf, k)?;
        pairs.push((key_buf, v));
    }
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    encode_uint(buf, 5, pairs.len() as u64);
    for (key_bytes, value) in pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BlockHash;

    fn sample_block() -> Block {
        Block {
            hash: None,
            height: 3,
            body: "7b7d".to_string(),
            time: 1_736_870_400_000,
            previous_block_hash: Some(BlockHash::from_bytes([0x11; 32])),
        }
    }

    #[test]
    fn test_canonical_encoding_deterministic() {
        let block = sample_block();
        assert_eq!(
            canonical_block_bytes(&block).unwrap(),
            canonical_block_bytes(&block).unwrap()
        );
    }

    #[test]
    fn test_own_hash_not_encoded() {
        let mut block = sample_block();
        let before = canonical_block_bytes(&block).unwrap();
        block.hash = Some(BlockHash::from_bytes([0xff; 32]));
        assert_eq!(before, canonical_block_bytes(&block).unwrap());
    }

    #[test]
    fn test_genesis_link_encodes_as_null() {
        let mut block = sample_block();
        block.previous_block_hash = None;
        let bytes = canonical_block_bytes(&block).unwrap();
        assert_eq!(bytes.last(), Some(&0xf6));
    }

    #[test]
    fn test_map_layout() {
        let bytes = canonical_block_bytes(&sample_block()).unwrap();
        // Map header with 4 entries, then key 0 / height 3.
        assert_eq!(&bytes[..3], &[0xa4, 0x00, 0x03]);
        // Key 1 followed by an 8-byte unsigned time.
        assert_eq!(bytes[3], 0x01);
        assert_eq!(bytes[4], 0x1b);
    }

    #[test]
    fn test_integer_encoding() {
        let mut buf = Vec::new();
        encode_uint(&mut buf, 0, 23);
        assert_eq!(buf, vec![0x17]);

        buf.clear();
        encode_uint(&mut buf, 0, 24);
        assert_eq!(buf, vec![0x18, 24]);

        buf.clear();
        encode_uint(&mut buf, 0, 256);
        assert_eq!(buf, vec![0x19, 0x01, 0x00]);

        buf.clear();
        encode_integer(&mut buf, (-1i64).into());
        assert_eq!(buf, vec![0x20]);
    }

    #[test]
    fn test_float_rejected() {
        let mut buf = Vec::new();
        let result = encode_value_to(&mut buf, &Value::Float(1.5));
        assert!(matches!(result, Err(CoreError::Encoding(_))));
    }
}
