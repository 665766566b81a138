use std::fmt;
use util::NOTES;

pub const NOTE_NONE: u8 = 0;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolEffect {
    None,
    Volume,
}

impl Default for VolEffect {
    fn default() -> Self {
        VolEffect::None
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    PortamentoUp,
    PortamentoDown,
    TonePortamento,
    Vibrato,
    Speed,
    PanningSlide,
    Retrig,
    PatternBreak,
    PositionJump,
}

impl Effect {
    /// Impulse Tracker style command letter.
    pub fn letter(&self) -> char {
        match *self {
            Effect::None           => '.',
            Effect::Speed          => 'A',
            Effect::PositionJump   => 'B',
            Effect::PatternBreak   => 'C',
            Effect::PortamentoDown => 'E',
            Effect::PortamentoUp   => 'F',
            Effect::TonePortamento => 'G',
            Effect::Vibrato        => 'H',
            Effect::Retrig         => 'Q',
            Effect::PanningSlide   => 'P',
        }
    }
}

impl Default for Effect {
    fn default() -> Self {
        Effect::None
    }
}


/// A single pattern cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Note {
    pub note      : u8,
    pub instrument: u8,
    pub voleffect : VolEffect,
    pub volparam  : u8,
    pub effect    : Effect,
    pub param     : u8,
}

impl Note {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Note::new()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // note 1 is C-0
        let note = if self.note == NOTE_NONE {
            "...".to_owned()
        } else {
            let n = self.note as usize - 1;
            format!("{}{}", NOTES[n % 12], n / 12)
        };

        let ins = if self.instrument == 0 {
            "..".to_owned()
        } else {
            format!("{:02}", self.instrument)
        };

        let vol = match self.voleffect {
            VolEffect::None   => "...".to_owned(),
            VolEffect::Volume => format!("v{:02}", self.volparam),
        };

        let fx = if self.effect == Effect::None {
            "...".to_owned()
        } else {
            format!("{}{:02X}", self.effect.letter(), self.param)
        };

        write!(f, "{} {} {} {}", note, ins, vol, fx)
    }
}
