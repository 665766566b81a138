use std::io::{self, Read, Seek, SeekFrom};
use Error;

/// Forward-reading cursor over a module image.
///
/// Reads past the end of the data fail with `UnexpectedEof` instead of
/// returning short counts, and seeking beyond the end is an I/O error.
#[derive(Debug)]
pub struct Stream<'a> {
    data: &'a [u8],
    pos : usize,
}

impl<'a> Stream<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Stream {
            data,
            pos: 0,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The unread part of the stream.
    pub fn remaining(&self) -> &'a [u8] {
        let data = self.data;
        &data[self.pos..]
    }

    pub fn getc(&mut self) -> Result<u8, Error> {
        match self.data.get(self.pos) {
            Some(&b) => { self.pos += 1; Ok(b) }
            None     => Err(eof()),
        }
    }

    /// Fill `buf` completely from the stream.
    pub fn read_into(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        let b = self.take(buf.len())?;
        buf.copy_from_slice(b);
        Ok(())
    }

    /// Borrow the next `size` bytes and advance past them.
    pub fn take(&mut self, size: usize) -> Result<&'a [u8], Error> {
        if size > self.data.len() - self.pos {
            return Err(eof())
        }
        let data = self.data;
        self.pos += size;
        Ok(&data[self.pos - size..self.pos])
    }

    /// Relative forward seek.
    pub fn skip(&mut self, size: usize) -> Result<(), Error> {
        if size > self.data.len() - self.pos {
            return Err(eof())
        }
        self.pos += size;
        Ok(())
    }
}

fn eof() -> Error {
    Error::Io(io::Error::new(io::ErrorKind::UnexpectedEof, "unexpected end of stream"))
}

impl<'a> Read for Stream<'a> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut rest = &self.data[self.pos..];
        let n = rest.read(buf)?;
        self.pos += n;
        Ok(n)
    }
}

impl<'a> Seek for Stream<'a> {
    fn seek(&mut self, from: SeekFrom) -> io::Result<u64> {
        let target = match from {
            SeekFrom::Start(n)   => n as i64,
            SeekFrom::End(n)     => self.data.len() as i64 + n,
            SeekFrom::Current(n) => self.pos as i64 + n,
        };
        if target < 0 || target > self.data.len() as i64 {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "seek out of range"))
        }
        self.pos = target as usize;
        Ok(self.pos as u64)
    }
}
