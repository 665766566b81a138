pub mod load;
mod pattern;

pub use self::load::*;

use module::{Note, Effect, VolEffect};

//                              669 Module header
//          0   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
//        ,---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---.
//  0000: |'i'|'f'| Song message, 3 lines of 36 chars (108 bytes)        |
//        +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
//  0060: |                                                       |Smp|Pat|
//        +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
//  0070: |Rst| Orders (128 bytes), 0xff = end                            |
//        +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
//  00f1: Tempo list, one speed per pattern (128 bytes)
//  0171: Break list, last row of each pattern (128 bytes)
//  01f1: Sample headers, 25 bytes each
//  xxxx: Patterns, 64 rows x 8 channels x 3 bytes
//  xxxx: Sample data, 8 bit unsigned
//
// The "JN" tag marks the Extended 669 (UNIS 669) variant.

pub const MAGIC_669     : u16 = 0x6669;   // "if"
pub const MAGIC_UNIS    : u16 = 0x4e4a;   // "JN"

pub const MESSAGE_SIZE  : usize = 108;
pub const LINE_LENGTH   : usize = 36;
pub const HEADER_SIZE   : usize = 0x1f1;
pub const SAMPLE_SIZE   : usize = 25;

pub const MAX_SAMPLES   : u8 = 64;
pub const MAX_PATTERNS  : u8 = 128;
pub const MAX_RESTART   : u8 = 127;
pub const MAX_BREAK     : u8 = 0x3f;

pub const CHANNELS      : usize = 8;
pub const ROWS          : usize = 64;
pub const MIN_ROWS      : usize = 32;

pub const NO_EFFECT     : u8 = 0xff;

// first 669 note is two octaves and a semitone above note 0
const NOTE_OFFSET       : u8 = 36 + 1;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Composer,
    Unis,
}

impl Dialect {
    pub fn from_magic(magic: u16) -> Option<Self> {
        match magic {
            MAGIC_669  => Some(Dialect::Composer),
            MAGIC_UNIS => Some(Dialect::Unis),
            _          => None,
        }
    }

    /// Human-readable format description.
    pub fn description(&self) -> &'static str {
        match *self {
            Dialect::Composer => "Composer 669 Module",
            Dialect::Unis     => "Extended 669 Module",
        }
    }

    /// Name of the tracker that wrote the module.
    pub fn tracker_id(&self) -> &'static str {
        match *self {
            Dialect::Composer => "Composer 669",
            Dialect::Unis     => "UNIS 669",
        }
    }
}


/// Note and volume part of a pattern cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum M669Cell {
    Empty,
    Volume(u8),
    Note { note: u8, ins: u8, vol: u8 },
}

/// M669Event defines the event format used in 669 patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct M669Event {
    pub cell  : M669Cell,
    pub effect: u8,
}

impl M669Event {
    pub fn from_slice(b: &[u8]) -> Self {
        let cell = match b[0] {
            0xfe => M669Cell::Volume(b[1] & 0x0f),
            0xff => M669Cell::Empty,
            x    => M669Cell::Note {
                        note: x >> 2,
                        ins : ((x & 0x03) << 4) | (b[1] >> 4),
                        vol : b[1] & 0x0f,
                    },
        };

        M669Event {
            cell,
            effect: b[2],
        }
    }

    /// Convert to a song note. `memory` holds the channel's current effect, which
    /// stays active on the following rows until another effect replaces it.
    pub fn to_note(&self, memory: &mut u8) -> Note {
        let mut n = Note::new();

        match self.cell {
            M669Cell::Empty => {},
            M669Cell::Volume(vol) => {
                n.voleffect = VolEffect::Volume;
                n.volparam = vol << 2;
            }
            M669Cell::Note { note, ins, vol } => {
                n.note = note + NOTE_OFFSET;
                n.instrument = ins + 1;
                n.voleffect = VolEffect::Volume;
                n.volparam = vol << 2;
            }
        }

        if self.effect != NO_EFFECT {
            *memory = self.effect;
        }
        if *memory != NO_EFFECT {
            translate_effect(&mut n, memory);
        }

        n
    }
}

fn translate_effect(n: &mut Note, memory: &mut u8) {
    n.param = *memory & 0x0f;

    match *memory >> 4 {
        0 => n.effect = Effect::PortamentoUp,       // A: portamento up
        1 => n.effect = Effect::PortamentoDown,     // B: portamento down
        2 => n.effect = Effect::TonePortamento,     // C: slide to note
        3 => {                                      // D: frequency adjust
            n.effect = Effect::PortamentoDown;
            n.param = if n.param != 0 { n.param | 0xf0 } else { 0xf1 };
            *memory = NO_EFFECT;
        }
        4 => {                                      // E: frequency vibrato
            n.effect = Effect::Vibrato;
            n.param |= 0x80;
        }
        5 => {                                      // F: set tempo
            if n.param != 0 {
                n.effect = Effect::Speed;
            }
            *memory = NO_EFFECT;
        }
        6 => match n.param {                        // G: balance fine slide
            0 => { n.effect = Effect::PanningSlide; n.param = 0x8f }
            1 => { n.effect = Effect::PanningSlide; n.param = 0xf8 }
            _ => n.param = 0,
        },
        7 => n.effect = Effect::Retrig,             // H: slot retrig
        _ => n.param = 0,
    }
}
