use std::cmp;
use format::m669::{M669Event, CHANNELS, ROWS, MIN_ROWS, NO_EFFECT};
use module::{Note, Effect, Pattern};
use stream::Stream;
use Error;

const ROW_SIZE: usize = 3 * CHANNELS;

// Speed and break effects may also go into the first unused channel.
const INSERT_SLOTS: usize = CHANNELS + 1;


/// Decode one pattern. `brk` is the last row played, taken from the break list;
/// the file always stores all 64 rows.
pub fn load_pattern(s: &mut Stream, num: usize, speed: u8, brk: u8) -> Result<Pattern, Error> {
    let rows = cmp::min(brk as usize + 1, ROWS);
    let mut pat = Pattern::new(cmp::max(rows, MIN_ROWS));

    // effect memory only lasts for the pattern
    let mut memory = [NO_EFFECT; CHANNELS];

    for r in 0..rows {
        decode_row(s.take(ROW_SIZE)?, pat.row_mut(r), &mut memory);
    }

    if rows < ROWS {
        s.skip(ROW_SIZE * (ROWS - rows))?;
    }

    if insert_speed(pat.row_mut(0), speed) {
        trace!("pattern {}: speed {} inserted", num, speed);
    }

    if rows < MIN_ROWS && insert_break(pat.row_mut(rows - 1)) {
        trace!("pattern {}: break inserted at row {}", num, rows - 1);
    }

    Ok(pat)
}

fn decode_row(b: &[u8], row: &mut [Note], memory: &mut [u8; CHANNELS]) {
    for (chn, mem) in memory.iter_mut().enumerate() {
        row[chn] = M669Event::from_slice(&b[chn * 3..]).to_note(mem);
    }
}

/// Set the pattern speed in the first free slot unless the row already sets it.
fn insert_speed(row: &mut [Note], speed: u8) -> bool {
    let slots = &mut row[..INSERT_SLOTS];
    if slots.iter().any(|n| n.effect == Effect::Speed) {
        return false
    }
    match slots.iter_mut().find(|n| n.effect == Effect::None) {
        Some(n) => {
            n.effect = Effect::Speed;
            n.param = speed;
            true
        }
        None => false,
    }
}

/// Add a break to the next pattern in the first free slot.
fn insert_break(row: &mut [Note]) -> bool {
    for n in row[..INSERT_SLOTS].iter_mut() {
        if n.effect == Effect::None {
            n.effect = Effect::PatternBreak;
            n.param = 0;
            return true
        }
    }
    false
}


#[cfg(test)]
mod tests {
    use super::*;
    use module::VolEffect;

    fn empty_rows() -> Vec<u8> {
        vec![0xff; ROW_SIZE * ROWS]
    }

    fn set(b: &mut [u8], row: usize, chn: usize, cell: [u8; 3]) {
        let ofs = row * ROW_SIZE + chn * 3;
        b[ofs..ofs + 3].copy_from_slice(&cell);
    }

    #[test]
    fn test_full_pattern() {
        let mut data = empty_rows();
        set(&mut data, 0, 0, [0x00, 0x0f, 0xff]);
        set(&mut data, 63, 7, [0xfe, 0x02, 0x72]);
        data.push(0xaa);
        let mut s = Stream::new(&data);
        let p = load_pattern(&mut s, 0, 4, 63).unwrap();
        assert_eq!(p.rows(), 64);
        assert_eq!(s.pos(), ROW_SIZE * ROWS);
        assert_eq!(p.note(0, 0).note, 37);
        assert_eq!(p.note(0, 0).instrument, 1);
        assert_eq!((p.note(0, 0).effect, p.note(0, 0).param), (Effect::Speed, 4));
        let n = p.note(63, 7);
        assert_eq!(n.voleffect, VolEffect::Volume);
        assert_eq!(n.volparam, 8);
        assert_eq!((n.effect, n.param), (Effect::Retrig, 2));
        assert!(p.row(63)[..7].iter().all(|n| n.effect == Effect::None));
    }

    #[test]
    fn test_short_pattern_gets_break() {
        let mut data = empty_rows();
        set(&mut data, 21, 0, [0x00, 0x00, 0x00]);
        let mut s = Stream::new(&data);
        let p = load_pattern(&mut s, 0, 6, 20).unwrap();
        assert_eq!(p.rows(), 32);
        assert_eq!(s.pos(), ROW_SIZE * ROWS);
        assert!(p.row(21).iter().all(|n| n.is_empty()));
        assert_eq!((p.note(20, 0).effect, p.note(20, 0).param), (Effect::PatternBreak, 0));
    }

    #[test]
    fn test_medium_pattern_has_no_break() {
        let data = empty_rows();
        let mut s = Stream::new(&data);
        let p = load_pattern(&mut s, 0, 6, 40).unwrap();
        assert_eq!(p.rows(), 41);
        assert!(p.row(40).iter().all(|n| n.is_empty()));
    }

    #[test]
    fn test_memory_reset_between_patterns() {
        let mut data = empty_rows();
        set(&mut data, 0, 2, [0xff, 0x00, 0x13]);
        data.extend(empty_rows());
        let mut s = Stream::new(&data);
        let p = load_pattern(&mut s, 0, 6, 63).unwrap();
        assert_eq!(p.note(63, 2).effect, Effect::PortamentoDown);
        let p = load_pattern(&mut s, 1, 6, 63).unwrap();
        assert_eq!(p.note(1, 2).effect, Effect::None);
    }

    #[test]
    fn test_existing_speed_not_duplicated() {
        let mut data = empty_rows();
        set(&mut data, 0, 3, [0xff, 0x00, 0x58]);
        let mut s = Stream::new(&data);
        let p = load_pattern(&mut s, 0, 6, 63).unwrap();
        assert_eq!(p.row(0).iter().filter(|n| n.effect == Effect::Speed).count(), 1);
        assert_eq!(p.note(0, 3).param, 8);
    }

    #[test]
    fn test_speed_after_busy_channels() {
        let mut data = empty_rows();
        for chn in 0..CHANNELS {
            set(&mut data, 0, chn, [0xff, 0x00, 0x01]);
        }
        let mut s = Stream::new(&data);
        let p = load_pattern(&mut s, 0, 5, 63).unwrap();
        assert_eq!((p.note(0, 8).effect, p.note(0, 8).param), (Effect::Speed, 5));
    }

    #[test]
    fn test_insert_never_overwrites() {
        let mut row = vec![Note::new(); 64];
        for n in row[..INSERT_SLOTS].iter_mut() {
            n.effect = Effect::Vibrato;
        }
        assert!(!insert_speed(&mut row, 6));
        assert!(!insert_break(&mut row));
        assert!(row[..INSERT_SLOTS].iter().all(|n| n.effect == Effect::Vibrato));
        assert!(row[INSERT_SLOTS..].iter().all(|n| n.is_empty()));
    }

    #[test]
    fn test_truncated_pattern_data() {
        let data = vec![0xff; ROW_SIZE * 10];
        let mut s = Stream::new(&data);
        assert!(load_pattern(&mut s, 0, 6, 63).is_err());
    }
}
