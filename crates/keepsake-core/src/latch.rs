/// One-shot flag: moves from pending to triggered exactly once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latch {
    triggered: bool,
}

impl Latch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Triggers the latch. Returns true only for the call that triggered it.
    pub fn trigger(&mut self) -> bool {
        !std::mem::replace(&mut self.triggered, true)
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }
}
