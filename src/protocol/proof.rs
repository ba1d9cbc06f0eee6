//! The public proof pair `(r, P)`.

use core::fmt;
use core::str::FromStr;

use num_bigint::BigUint;

use super::GroupParameters;
use crate::{Error, Result};

/// Separator between `r` and `P` in the text form.
pub const PROOF_DELIMITER: char = '|';

/// Proof pair `r = g^k mod p`, `P = g^((Hs·k) mod (p-1)) mod p`.
///
/// The text form is `"<r hex>|<P hex>"` with lowercase digits and no leading zeros.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofPair {
    r: BigUint,
    big_p: BigUint,
}

impl ProofPair {
    /// Creates a proof pair from its components.
    pub fn new(r: BigUint, big_p: BigUint) -> Self {
        Self { r, big_p }
    }

    /// Returns `r`.
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// Returns `P`.
    pub fn big_p(&self) -> &BigUint {
        &self.big_p
    }

    /// Reports whether both components are reduced modulo `p`.
    pub fn in_range(&self, params: &GroupParameters) -> bool {
        &self.r < params.modulus() && &self.big_p < params.modulus()
    }

    /// Consumes the pair, returning `(r, P)`.
    pub fn into_parts(self) -> (BigUint, BigUint) {
        (self.r, self.big_p)
    }
}

impl fmt::Display for ProofPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}{}{:x}", self.r, PROOF_DELIMITER, self.big_p)
    }
}

impl FromStr for ProofPair {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (r, big_p) = s.split_once(PROOF_DELIMITER).ok_or_else(|| {
            Error::MalformedProof(format!("missing '{PROOF_DELIMITER}' delimiter"))
        })?;

        Ok(Self {
            r: parse_hex(r, "r")?,
            big_p: parse_hex(big_p, "P")?,
        })
    }
}

fn parse_hex(s: &str, name: &str) -> Result<BigUint> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::MalformedProof(format!(
            "{name} is not a hexadecimal integer"
        )));
    }
    BigUint::parse_bytes(s.as_bytes(), 16)
        .ok_or_else(|| Error::MalformedProof(format!("{name} is not a hexadecimal integer")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_form() {
        let proof = ProofPair::new(BigUint::from(0xabcu32), BigUint::from(0x1fu32));
        assert_eq!(proof.to_string(), "abc|1f");
        assert_eq!("abc|1f".parse::<ProofPair>().unwrap(), proof);
    }

    #[test]
    fn uppercase_hex_is_accepted() {
        let proof: ProofPair = "ABC|1F".parse().unwrap();
        assert_eq!(proof.r(), &BigUint::from(0xabcu32));
    }

    #[test]
    fn malformed_text_is_rejected() {
        for input in ["", "abc", "|1f", "abc|", "abc|1f|2", "xyz|1f", "a_b|1f", "+a|1f"] {
            assert!(
                matches!(input.parse::<ProofPair>(), Err(Error::MalformedProof(_))),
                "{input:?}"
            );
        }
    }
}
