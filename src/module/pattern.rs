use module::event::Note;
use ::MAX_CHANNELS;

/// A pattern stored as a flat grid of `rows` x `MAX_CHANNELS` notes.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    rows: usize,
    data: Vec<Note>,
}

impl Pattern {
    pub fn new(rows: usize) -> Self {
        Pattern {
            rows,
            data: vec![Note::new(); rows * MAX_CHANNELS],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn note(&self, row: usize, chn: usize) -> &Note {
        &self.data[row * MAX_CHANNELS + chn]
    }

    pub fn note_mut(&mut self, row: usize, chn: usize) -> &mut Note {
        &mut self.data[row * MAX_CHANNELS + chn]
    }

    pub fn row(&self, row: usize) -> &[Note] {
        &self.data[row * MAX_CHANNELS..(row + 1) * MAX_CHANNELS]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [Note] {
        &mut self.data[row * MAX_CHANNELS..(row + 1) * MAX_CHANNELS]
    }
}
