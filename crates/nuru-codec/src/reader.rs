use std::io::{self, Read};

use nuru_core::error::Error;

/// Lit exactement `N` octets, en signalant un fichier tronqué.
pub(crate) fn read_bytes<R: Read, const N: usize>(
    r: &mut R,
    what: &'static str,
) -> Result<[u8; N], Error> {
    let mut buf = [0u8; N];
    r.read_exact(&mut buf).map_err(|e| truncated(e, what))?;
    Ok(buf)
}

pub(crate) fn read_u8<R: Read>(r: &mut R, what: &'static str) -> Result<u8, Error> {
    let buf: [u8; 1] = read_bytes(r, what)?;
    Ok(buf[0])
}

/// Les entiers multi-octets du format sont big-endian.
pub(crate) fn read_u16<R: Read>(r: &mut R, what: &'static str) -> Result<u16, Error> {
    let buf: [u8; 2] = read_bytes(r, what)?;
    Ok(u16::from_be_bytes(buf))
}

fn truncated(e: io::Error, what: &'static str) -> Error {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        Error::Truncated { what }
    } else {
        Error::Io(e)
    }
}
