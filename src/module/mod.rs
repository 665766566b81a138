pub mod event;
pub mod pattern;
pub mod sample;

pub use self::event::{Note, Effect, VolEffect};
pub use self::pattern::Pattern;
pub use self::sample::{Sample, SampleData};

use std::cmp;
use ::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SongFlags {
    pub old_effects  : bool,
    pub linear_slides: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel {
    pub panning: u32,   // 0-256
    pub volume : u32,   // 0-64
    pub muted  : bool,
}

impl Default for Channel {
    fn default() -> Self {
        Channel {
            panning: 128,
            volume : 64,
            muted  : false,
        }
    }
}


/// Generic in-memory song filled in by the format loaders.
#[derive(Debug)]
pub struct Song {
    pub title         : String,
    pub message       : String,
    pub tracker_id    : String,
    pub orderlist     : [u8; MAX_ORDERS],
    pub patterns      : Vec<Option<Pattern>>,
    pub samples       : Vec<Sample>,
    pub channels      : [Channel; MAX_CHANNELS],
    pub initial_speed : u32,
    pub initial_tempo : u32,
    pub flags         : SongFlags,
    pub pan_separation: u32,
}

impl Song {
    pub fn new() -> Self {
        Song {
            title         : "".to_owned(),
            message       : "".to_owned(),
            tracker_id    : "".to_owned(),
            orderlist     : [ORDER_LAST; MAX_ORDERS],
            patterns      : vec![None; MAX_PATTERNS],
            samples       : vec![Sample::new()],
            channels      : [Channel::default(); MAX_CHANNELS],
            initial_speed : 6,
            initial_tempo : 125,
            flags         : SongFlags::default(),
            pan_separation: 128,
        }
    }

    pub fn pattern(&self, num: usize) -> Option<&Pattern> {
        match self.patterns.get(num) {
            Some(&Some(ref p)) => Some(p),
            _                  => None,
        }
    }

    /// Number of patterns up to the last allocated one.
    pub fn num_patterns(&self) -> usize {
        self.patterns.iter().rposition(|p| p.is_some()).map_or(0, |x| x + 1)
    }

    /// Number of order list entries before the end marker.
    pub fn num_orders(&self) -> usize {
        self.orderlist.iter().position(|&x| x == ORDER_LAST).unwrap_or(MAX_ORDERS)
    }

    /// Make the song loop back to order `restart` by placing a position jump on the
    /// exit row of the last pattern in the order list. Only the exit row is changed:
    /// the first row with a pattern break, or the last row if there is none. Later
    /// breaks and the last row of a pattern that breaks early are left as they are.
    pub fn insert_restart_pos(&mut self, restart: usize) {
        if restart == 0 {
            return
        }

        // find the last order and the highest pattern number in use
        let mut ord = None;
        let mut max = 0;
        for (i, &p) in self.orderlist.iter().enumerate() {
            if p as usize >= MAX_PATTERNS {
                break
            }
            ord = Some(i);
            max = cmp::max(max, p as usize);
        }
        let ord = try_option!(ord);
        let mut pat = self.orderlist[ord] as usize;
        if self.pattern(pat).map_or(true, |p| p.rows() == 0) {
            return
        }

        // copy the pattern if it's also played elsewhere
        let used = self.orderlist[..ord + 1].iter().filter(|&&x| x as usize == pat).count();
        if used > 1 {
            let newpat = try_option!((max + 1..MAX_PATTERNS).find(|&x| self.patterns[x].is_none()));
            debug!("copying pattern {} to {} for restart position", pat, newpat);
            self.patterns[newpat] = self.patterns[pat].clone();
            self.orderlist[ord] = newpat as u8;
            pat = newpat;
        }

        let p = match self.patterns[pat] {
            Some(ref mut p) => p,
            None            => return,
        };

        // playback leaves the pattern on the first break, or at the end
        let exit = (0..p.rows())
            .find(|&r| p.row(r).iter().any(|n| n.effect == Effect::PatternBreak))
            .unwrap_or(p.rows() - 1);

        let row = p.row_mut(exit);
        if row.iter().any(|n| n.effect == Effect::PositionJump) {
            return
        }

        let slot = row.iter().position(|n| n.effect == Effect::PatternBreak && n.param == 0)
            .or_else(|| row.iter().position(|n| n.effect == Effect::None));

        match slot {
            Some(chn) => {
                debug!("restart position {} at pattern {} row {} channel {}", restart, pat, exit, chn);
                row[chn].effect = Effect::PositionJump;
                row[chn].param = restart as u8;
            }
            None => debug!("no room for restart position in pattern {}", pat),
        }
    }
}

impl Default for Song {
    fn default() -> Self {
        Song::new()
    }
}
