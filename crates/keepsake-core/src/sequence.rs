//! Forward-only page sequence.

use std::fmt;

/// The eight pages of the presentation, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    Welcome,
    Consent,
    Heart,
    Gratitude,
    DragReveal,
    Confession,
    Assurance,
    FinalLetter,
}

impl PageId {
    pub const ALL: [PageId; 8] = [
        PageId::Welcome,
        PageId::Consent,
        PageId::Heart,
        PageId::Gratitude,
        PageId::DragReveal,
        PageId::Confession,
        PageId::Assurance,
        PageId::FinalLetter,
    ];

    pub const LAST_INDEX: usize = Self::ALL.len() - 1;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn is_terminal(self) -> bool {
        self == PageId::FinalLetter
    }

    /// Short label used in logs and the rehearsal timeline.
    pub fn name(self) -> &'static str {
        match self {
            PageId::Welcome => "welcome",
            PageId::Consent => "consent",
            PageId::Heart => "heart",
            PageId::Gratitude => "gratitude",
            PageId::DragReveal => "drag",
            PageId::Confession => "confession",
            PageId::Assurance => "assurance",
            PageId::FinalLetter => "letter",
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current page index. Starts at 0 and only ever moves forward by one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageSequence {
    index: usize,
}

impl PageSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves to the next page. At the last page this is a no-op returning false.
    pub fn advance(&mut self) -> bool {
        if self.index < PageId::LAST_INDEX {
            self.index += 1;
            true
        } else {
            false
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> PageId {
        PageId::ALL[self.index]
    }

    pub fn is_terminal(&self) -> bool {
        self.index == PageId::LAST_INDEX
    }
}
