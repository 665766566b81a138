use byteorder::{LittleEndian, ReadBytesExt};
use format::{Format, Loader, LoadOptions, ProbeInfo};
use format::m669::*;
use format::m669::pattern::load_pattern;
use module::{Song, Sample, SongFlags};
use module::sample::{SampleDecoder, SampleFormat, Endian, Encoding};
use stream::Stream;
use util::{self, BinaryRead, C5_SPEED};
use Error;

const TITLE_LENGTH: usize = 25;

const SAMPLE_FORMAT: SampleFormat = SampleFormat {
    endian  : Endian::Little,
    stereo  : false,
    encoding: Encoding::Unsigned,
    bits    : 8,
};


/// Composer 669 / UNIS 669 module loader
pub struct M669Loader;

impl M669Loader {
    fn load_sample(&self, s: &mut Stream, i: usize) -> Result<Sample, Error> {
        let mut smp = Sample::new();

        // names may use all 13 bytes, the filename only has room for 12
        let name = s.take(13)?;
        smp.name = util::asciiz(name);
        smp.filename = util::asciiz(&name[..12]);

        smp.length = s.read_u32::<LittleEndian>()?;
        smp.loop_start = s.read_u32::<LittleEndian>()?;
        let loop_end = s.read_u32::<LittleEndian>()?;
        if loop_end > smp.length {
            smp.loop_end = 0;
        } else {
            smp.loop_end = loop_end;
            smp.has_loop = true;
        }

        smp.c5speed = C5_SPEED;
        smp.volume = 60 * 4;
        smp.global_volume = 64;

        trace!("sample {:2}: {:13} {:6} {:6} {:6} {}", i, smp.name, smp.length,
            smp.loop_start, smp.loop_end, if smp.has_loop { 'L' } else { ' ' });

        Ok(smp)
    }
}

impl Loader for M669Loader {
    fn name(&self) -> &'static str {
        "Composer 669"
    }

    fn probe(&self, b: &[u8]) -> Result<ProbeInfo, Error> {
        if b.len() < HEADER_SIZE {
            return Err(Error::Format(format!("file too short ({})", b.len())));
        }

        let magic = b.read16l(0)?;
        let dialect = match Dialect::from_magic(magic) {
            Some(d) => d,
            None    => return Err(Error::Format(format!("bad magic {:04x}", magic))),
        };

        check_header(b.read8(0x6e)?, b.read8(0x6f)?, b.read8(0x70)?)?;
        check_breaks(b.slice(0x171, 128)?)?;

        Ok(ProbeInfo{
            format     : match dialect {
                             Dialect::Composer => Format::Composer669,
                             Dialect::Unis     => Format::Extended669,
                         },
            description: dialect.description(),
            title      : b.read_string(2, LINE_LENGTH)?,
        })
    }

    fn load(&self, s: &mut Stream, opts: &LoadOptions, dec: &dyn SampleDecoder) -> Result<Song, Error> {
        let magic = s.read_u16::<LittleEndian>()?;
        let dialect = match Dialect::from_magic(magic) {
            Some(d) => d,
            None    => return Err(Error::Format("unsupported format".to_owned())),
        };

        let message = read_lined_message(s, MESSAGE_SIZE, LINE_LENGTH)?;

        let nsmp = s.getc()?;
        let npat = s.getc()?;
        let restart = s.getc()?;
        check_header(nsmp, npat, restart)?;

        let mut orders = [0; 128];
        let mut speeds = [0; 128];
        let mut breaks = [0; 128];
        s.read_into(&mut orders)?;
        s.read_into(&mut speeds)?;
        s.read_into(&mut breaks)?;
        check_breaks(&breaks)?;

        debug!("{}: {} samples, {} patterns, restart {}", dialect.tracker_id(), nsmp, npat, restart);

        let mut song = Song::new();
        song.title = title_from_message(&message);
        song.message = message;
        song.tracker_id = dialect.tracker_id().to_owned();
        song.orderlist[..128].copy_from_slice(&orders);

        // Load sample headers
        for i in 1..nsmp as usize + 1 {
            let smp = self.load_sample(s, i)?;
            song.samples.push(smp);
        }

        // Load patterns
        for i in 0..npat as usize {
            let pat = load_pattern(s, i, speeds[i], breaks[i])?;
            trace!("pattern {}: {} rows", i, pat.rows());
            song.patterns[i] = Some(pat);
        }

        song.insert_restart_pos(restart as usize);

        // Load samples
        if !opts.no_samples {
            for smp in song.samples.iter_mut().skip(1) {
                if smp.length == 0 {
                    continue
                }
                let size = dec.read_sample(smp, SAMPLE_FORMAT, s.remaining())?;
                trace!("sample {:?}: {} bytes at {:#x}", smp.name, size, s.pos());
                s.skip(size)?;
            }
        }

        song.initial_speed = 4;
        song.initial_tempo = 78;
        song.flags = SongFlags {
            old_effects  : true,
            linear_slides: true,
        };

        song.pan_separation = 64;
        for (i, chn) in song.channels.iter_mut().enumerate() {
            if i < CHANNELS {
                chn.panning = if i & 1 != 0 { 256 } else { 0 };
            } else {
                chn.muted = true;
            }
        }

        Ok(song)
    }
}

fn check_header(nsmp: u8, npat: u8, restart: u8) -> Result<(), Error> {
    if nsmp == 0 || nsmp > MAX_SAMPLES {
        return Err(Error::Format(format!("invalid number of samples ({})", nsmp)));
    }
    if npat == 0 || npat > MAX_PATTERNS {
        return Err(Error::Format(format!("invalid number of patterns ({})", npat)));
    }
    if restart > MAX_RESTART {
        return Err(Error::Format(format!("invalid restart position ({})", restart)));
    }
    Ok(())
}

fn check_breaks(breaks: &[u8]) -> Result<(), Error> {
    match breaks.iter().position(|&x| x > MAX_BREAK) {
        Some(i) => Err(Error::Format(format!("invalid break row {} in pattern {}", breaks[i], i))),
        None    => Ok(()),
    }
}

/// Read `size` bytes of text split in lines of `line_len` characters. Each line ends
/// at its first NUL and is followed by a newline.
fn read_lined_message(s: &mut Stream, size: usize, line_len: usize) -> Result<String, Error> {
    let mut msg = String::new();
    let mut left = size;
    while left > 0 {
        let len = if left < line_len { left } else { line_len };
        msg += &util::asciiz(s.take(len)?);
        msg.push('\n');
        left -= len;
    }
    Ok(msg)
}

/// The format has no title field, use the first line of the song message.
fn title_from_message(msg: &str) -> String {
    let first: String = msg.chars().take(LINE_LENGTH).collect();
    let line = match first.find(|c: char| c == '\r' || c == '\n') {
        Some(i) => &first[..i],
        None    => &first[..],
    };
    util::truncate(line.trim_matches(is_space), TITLE_LENGTH)
}

// bytes above 0x7f are CP437 letters, not whitespace
fn is_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lined_message() {
        let mut data = vec![b' '; MESSAGE_SIZE];
        data[..5].copy_from_slice(b"hello");
        data[5] = 0;
        data[36..41].copy_from_slice(b"world");
        let mut s = Stream::new(&data);
        let msg = read_lined_message(&mut s, MESSAGE_SIZE, LINE_LENGTH).unwrap();
        assert_eq!(s.pos(), MESSAGE_SIZE);
        let lines: Vec<&str> = msg.split('\n').collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "hello");
        assert_eq!(lines[1].trim(), "world");
        assert_eq!(lines[1].len(), 36);
        assert_eq!(lines[3], "");
    }

    #[test]
    fn test_title_from_message() {
        assert_eq!(title_from_message("  a song  \nsecond line\n"), "a song");
        assert_eq!(title_from_message("abc\rdef\n"), "abc");
        assert_eq!(title_from_message("0123456789012345678901234567890123456789\n"),
                   "0123456789012345678901234");
        assert_eq!(title_from_message(""), "");
    }

    #[test]
    fn test_title_keeps_high_bytes() {
        let msg = util::asciiz(b"\xa0la mode\x85\x0b\n");
        let title = title_from_message(&msg);
        assert_eq!(title.chars().count(), 9);
        assert_eq!(title, "\u{a0}la mode\u{85}");
        assert_eq!(title_from_message("\t\x0c a song \x0b\n"), "a song");
    }

    #[test]
    fn test_title_is_deterministic() {
        let msg = "  The Ultimate Tracker Song Title  \n\n\n";
        assert_eq!(title_from_message(msg), title_from_message(msg));
        assert_eq!(title_from_message(msg), "The Ultimate Tracker Song");
    }

    #[test]
    fn test_check_header_bounds() {
        assert!(check_header(1, 1, 0).is_ok());
        assert!(check_header(64, 128, 127).is_ok());
        assert!(check_header(0, 1, 0).is_err());
        assert!(check_header(65, 1, 0).is_err());
        assert!(check_header(1, 0, 0).is_err());
        assert!(check_header(1, 129, 0).is_err());
        assert!(check_header(1, 1, 128).is_err());
    }

    #[test]
    fn test_check_breaks() {
        let mut breaks = [0x3f; 128];
        assert!(check_breaks(&breaks).is_ok());
        breaks[100] = 0x40;
        assert!(check_breaks(&breaks).is_err());
    }

    #[test]
    fn test_sample_header() {
        let mut data = Vec::new();
        data.extend_from_slice(b"thirteenchars");
        data.extend_from_slice(&[100, 0, 0, 0, 10, 0, 0, 0, 90, 0, 0, 0]);
        data.extend_from_slice(b"short\0\0\0\0\0\0\0\0");
        data.extend_from_slice(&[100, 0, 0, 0, 0, 0, 0, 0, 200, 0, 0, 0]);
        let mut s = Stream::new(&data);

        let smp = M669Loader.load_sample(&mut s, 1).unwrap();
        assert_eq!(smp.name, "thirteenchars");
        assert_eq!(smp.filename, "thirteenchar");
        assert_eq!((smp.length, smp.loop_start, smp.loop_end), (100, 10, 90));
        assert!(smp.has_loop);
        assert_eq!(smp.c5speed, 8363);
        assert_eq!(smp.volume, 240);
        assert_eq!(smp.global_volume, 64);
        assert_eq!(smp.vib_depth, 0);

        let smp = M669Loader.load_sample(&mut s, 2).unwrap();
        assert_eq!(smp.name, "short");
        assert!(!smp.has_loop);
        assert_eq!(smp.loop_end, 0);
        assert_eq!(s.pos(), 2 * SAMPLE_SIZE);
    }
}
