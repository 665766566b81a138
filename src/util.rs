use std::io;
use byteorder::{ByteOrder, LittleEndian};
use Error;

pub const NOTES: &'static [&'static str] = &[
    "C-", "C#", "D-", "D#", "E-", "F-", "F#", "G-", "G#", "A-", "A#", "B-"
];

pub const C5_SPEED: u32 = 8363;


#[macro_export]
macro_rules! try_option {
    ( $a: expr ) => {
        match $a {
            Some(v) => v,
            None    => return,
        }
    }
}


pub trait BinaryRead {
    fn read_string(&self, ofs: usize, size: usize) -> Result<String, Error>;
    fn read32l(&self, ofs: usize) -> Result<u32, Error>;
    fn read16l(&self, ofs: usize) -> Result<u16, Error>;
    fn read8(&self, ofs: usize) -> Result<u8, Error>;
    fn slice(&self, start: usize, size: usize) -> Result<&[u8], Error>;
}

impl<'a> BinaryRead for &'a [u8] {
    fn read_string(&self, ofs: usize, size: usize) -> Result<String, Error> {
        check_buffer_size(self, ofs + size)?;
        Ok(asciiz(&self[ofs..ofs+size]))
    }

    fn read32l(&self, ofs: usize) -> Result<u32, Error> {
        check_buffer_size(self, ofs + 4)?;
        Ok(LittleEndian::read_u32(&self[ofs..ofs+4]))
    }

    fn read16l(&self, ofs: usize) -> Result<u16, Error> {
        check_buffer_size(self, ofs + 2)?;
        Ok(LittleEndian::read_u16(&self[ofs..ofs+2]))
    }

    fn read8(&self, ofs: usize) -> Result<u8, Error> {
        check_buffer_size(self, ofs + 1)?;
        Ok(self[ofs])
    }

    fn slice(&self, start: usize, size: usize) -> Result<&[u8], Error> {
        check_buffer_size(self, start + size)?;
        Ok(&self[start..start + size])
    }
}

fn check_buffer_size(b: &[u8], size: usize) -> Result<(), Error> {
    if size > b.len() {
        return Err(Error::Io(io::Error::new(io::ErrorKind::UnexpectedEof, "short read")))
    }
    Ok(())
}

/// Convert a fixed-size character field to text, stopping at the first NUL.
/// Fields that use every byte have an implicit terminator after the last one.
pub fn asciiz(b: &[u8]) -> String {
    let end = b.iter().position(|&x| x == 0).unwrap_or(b.len());
    b[..end].iter().map(|&x| x as char).collect()
}

/// Truncate `s` to at most `max` characters.
pub fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
