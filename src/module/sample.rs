use std::cmp;
use byteorder::{ByteOrder, BigEndian, LittleEndian};
use Error;

#[derive(Debug, Clone, PartialEq)]
pub enum SampleData {
    Empty,
    Pcm8(Vec<i8>),
    Pcm16(Vec<i16>),
}

impl SampleData {
    pub fn len(&self) -> usize {
        match *self {
            SampleData::Empty        => 0,
            SampleData::Pcm8(ref d)  => d.len(),
            SampleData::Pcm16(ref d) => d.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}


#[derive(Debug, Clone)]
pub struct Sample {
    pub name         : String,
    pub filename     : String,
    pub length       : u32,
    pub loop_start   : u32,
    pub loop_end     : u32,
    pub has_loop     : bool,
    pub c5speed      : u32,
    pub volume       : u32,   // 0-256
    pub global_volume: u32,   // 0-64
    pub vib_type     : u8,
    pub vib_rate     : u8,
    pub vib_depth    : u8,
    pub vib_speed    : u8,
    pub data         : SampleData,
}

impl Sample {
    pub fn new() -> Sample {
        Sample {
            name         : "".to_owned(),
            filename     : "".to_owned(),
            length       : 0,
            loop_start   : 0,
            loop_end     : 0,
            has_loop     : false,
            c5speed      : 8363,
            volume       : 256,
            global_volume: 64,
            vib_type     : 0,
            vib_rate     : 0,
            vib_depth    : 0,
            vib_speed    : 0,
            data         : SampleData::Empty,
        }
    }

    /// Shrink the sample to `len` frames, keeping the loop inside it.
    fn truncate(&mut self, len: u32) {
        self.length = len;
        self.loop_end = cmp::min(self.loop_end, len);
        self.loop_start = cmp::min(self.loop_start, self.loop_end);
        if self.loop_start >= self.loop_end {
            self.has_loop = false;
            self.loop_end = 0;
            self.loop_start = 0;
        }
    }
}

impl Default for Sample {
    fn default() -> Self {
        Sample::new()
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Signed,
    Unsigned,
}

/// Layout of raw sample data in the module file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleFormat {
    pub endian  : Endian,
    pub stereo  : bool,
    pub encoding: Encoding,
    pub bits    : u8,
}

impl SampleFormat {
    pub fn bytes_per_frame(&self) -> usize {
        let b = self.bits as usize / 8;
        if self.stereo { b * 2 } else { b }
    }
}


/// Converts raw sample bytes into the sample's PCM data.
pub trait SampleDecoder {
    /// Decode `smp.length` frames from the start of `b`, returning the
    /// number of bytes consumed.
    fn read_sample(&self, smp: &mut Sample, fmt: SampleFormat, b: &[u8]) -> Result<usize, Error>;
}

/// Default decoder for mono 8 and 16 bit PCM.
pub struct PcmDecoder;

impl SampleDecoder for PcmDecoder {
    fn read_sample(&self, smp: &mut Sample, fmt: SampleFormat, b: &[u8]) -> Result<usize, Error> {
        if fmt.stereo || (fmt.bits != 8 && fmt.bits != 16) {
            return Err(Error::Load(format!("unsupported sample format {:?}", fmt)))
        }

        let bpf = fmt.bytes_per_frame();
        let avail = (b.len() / bpf) as u32;
        if avail < smp.length {
            debug!("sample {:?} truncated from {} to {} frames", smp.name, smp.length, avail);
            smp.truncate(avail);
        }

        let size = smp.length as usize * bpf;
        let raw = &b[..size];

        smp.data = match fmt.bits {
            8 => SampleData::Pcm8(raw.iter().map(|&x| match fmt.encoding {
                     Encoding::Signed   => x as i8,
                     Encoding::Unsigned => (x ^ 0x80) as i8,
                 }).collect()),
            _ => SampleData::Pcm16(raw.chunks(2).map(|x| {
                     let v = match fmt.endian {
                         Endian::Little => LittleEndian::read_u16(x),
                         Endian::Big    => BigEndian::read_u16(x),
                     };
                     match fmt.encoding {
                         Encoding::Signed   => v as i16,
                         Encoding::Unsigned => (v ^ 0x8000) as i16,
                     }
                 }).collect()),
        };

        Ok(size)
    }
}
