extern crate byteorder;
#[macro_use]
extern crate log;

#[macro_use]
mod util;

pub mod format;
pub mod module;
pub mod stream;

pub use format::{LoadOptions, ProbeInfo};
pub use module::Song;
pub use stream::Stream;

use std::error;
use std::fmt;
use std::io;

pub const MAX_CHANNELS: usize = 64;
pub const MAX_ORDERS  : usize = 256;
pub const MAX_PATTERNS: usize = 240;

// order list end marker
pub const ORDER_LAST  : u8 = 0xff;


/// Identify a module from an in-memory buffer without decoding it.
pub fn probe(b: &[u8]) -> Result<ProbeInfo, Error> {
    format::probe(b)
}

/// Fully decode a module from an in-memory buffer.
pub fn load(b: &[u8], opts: &LoadOptions) -> Result<Song, Error> {
    format::load(b, opts)
}


#[derive(Debug)]
pub enum Error {
    Format(String),
    Load(String),
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Format(ref descr) => write!(f, "{}", descr),
            Error::Load(ref descr)   => write!(f, "{}", descr),
            Error::Io(ref err)       => write!(f, "{}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            _                  => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}
