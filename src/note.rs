//! The plaintext fields of a note: the witness a recipient needs to later
//! spend the coin it was minted into. A production wallet would encrypt
//! this to the recipient's public key before attaching it to an output;
//! this core attaches it directly and leaves that encryption to whatever
//! wallet layer sits above it.

use std::io::{self, Write};

use crate::curve::{FieldElem, Scalar};
use crate::serial::Encodable;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Note {
    pub serial: FieldElem,
    pub value: u64,
    pub token_id: FieldElem,
    pub coin_blind: FieldElem,
    pub value_blind: Scalar,
    pub token_blind: Scalar,
    pub depends: FieldElem,
    pub attrs: FieldElem,
}

impl Encodable for Note {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<usize> {
        let mut n = self.serial.encode(w)?;
        n += self.value.encode(w)?;
        n += self.token_id.encode(w)?;
        n += self.coin_blind.encode(w)?;
        n += self.value_blind.encode(w)?;
        n += self.token_blind.encode(w)?;
        n += self.depends.encode(w)?;
        n += self.attrs.encode(w)?;
        Ok(n)
    }
}
