//! Native-endian word I/O shared by the serializers.
//!
//! Every field is a fixed-width `u64` in host byte order; nothing is versioned
//! or length-prefixed beyond what each structure writes itself.

use std::io::{Read, Write};

use crate::error::{Error, Result};

pub(crate) fn write_u64<W: Write + ?Sized>(writer: &mut W, value: u64) -> Result<()> {
    writer.write_all(&value.to_ne_bytes())?;
    Ok(())
}

pub(crate) fn read_u64<R: Read + ?Sized>(reader: &mut R) -> Result<u64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    Ok(u64::from_ne_bytes(buf))
}

pub(crate) fn write_words<W: Write + ?Sized>(writer: &mut W, words: &[u64]) -> Result<()> {
    for &w in words {
        write_u64(writer, w)?;
    }
    Ok(())
}

pub(crate) fn read_words<R: Read + ?Sized>(reader: &mut R, words: &mut [u64]) -> Result<()> {
    for w in words.iter_mut() {
        *w = read_u64(reader)?;
    }
    Ok(())
}

/// Read a `u64` that must fit in `usize`.
pub(crate) fn read_len<R: Read + ?Sized>(reader: &mut R) -> Result<usize> {
    let v = read_u64(reader)?;
    usize::try_from(v).map_err(|_| Error::InvalidEncoding(format!("length {v} overflows usize")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_native_layout() {
        let mut out = Vec::new();
        write_words(&mut out, &[1, u64::MAX]).unwrap();
        assert_eq!(out.len(), 16);
        assert_eq!(&out[..8], &1u64.to_ne_bytes());

        let mut back = [0u64; 2];
        read_words(&mut out.as_slice(), &mut back).unwrap();
        assert_eq!(back, [1, u64::MAX]);
    }

    #[test]
    fn test_short_read_is_io_error() {
        let bytes = [0u8; 5];
        assert!(matches!(read_u64(&mut &bytes[..]), Err(Error::Io(_))));
    }
}
