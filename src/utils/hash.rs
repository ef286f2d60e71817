//! Content digests for fingerprinted asset names.
//!
//! Uses blake3 so identical bytes always produce the identical name and any
//! change in content produces a new one.
//!
//! ```ignore
//! use crate::utils::hash;
//!
//! let digest = hash::digest(b"body{color:red}"); // -> ContentDigest
//! let name = digest.to_hex();                   // -> 64 lowercase hex chars
//! ```

use std::fmt;

/// A 256-bit content digest (blake3 output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Lowercase hex rendering used in file names.
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Compute the digest of byte data.
#[inline]
pub fn digest<T: AsRef<[u8]> + ?Sized>(data: &T) -> ContentDigest {
    ContentDigest(*blake3::hash(data.as_ref()).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_deterministic() {
        assert_eq!(digest("function f(){return 1}"), digest("function f(){return 1}"));
    }

    #[test]
    fn test_digest_content_sensitive() {
        let a = digest("body{color:red}");
        let b = digest("body{color:blue}");
        let c = digest(&[0u8, 1, 2][..]);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn test_hex_format() {
        let hex = digest(b"").to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(hex, blake3::hash(b"").to_hex().as_str());
    }
}
