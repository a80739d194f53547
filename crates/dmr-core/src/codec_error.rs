//! Structural codec errors.
//!
//! Distinct from FEC outcomes: a channel error is a value
//! ([`crate::FecResult`]), never an `Err`. `CodecErr` covers caller
//! misuse like handing a codec a wrongly sized buffer or a field value
//! that does not fit its width.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecErr {
    /// Input or output buffer has the wrong length for this codec.
    WrongLength { expected: usize, got: usize },
    /// A field value does not fit the wire width of its field.
    ValueOutOfRange { field: &'static str, value: u64 },
    /// The unit cannot be encoded as requested (e.g. no sync word is
    /// defined for this burst classification).
    NotEncodable { reason: &'static str },
}

pub fn expect_len(expected: usize, got: usize) -> Result<(), CodecErr> {
    if expected == got {
        Ok(())
    } else {
        Err(CodecErr::WrongLength { expected, got })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_len() {
        assert_eq!(expect_len(4, 4), Ok(()));
        assert_eq!(
            expect_len(4, 5),
            Err(CodecErr::WrongLength { expected: 4, got: 5 })
        );
    }
}
