use crate::latch::Latch;
use crate::pages::{BUTTON_HAPTIC, ButtonView, PageSignal};

/// A button that stays hidden until shown, then advances the page once.
#[derive(Debug, Clone)]
pub struct DelayedButton {
    label: String,
    visible: bool,
    pressed: Latch,
}

impl DelayedButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            visible: false,
            pressed: Latch::new(),
        }
    }

    /// Makes the button visible. Signals only the first time.
    pub fn show(&mut self) -> Vec<PageSignal> {
        if std::mem::replace(&mut self.visible, true) {
            return Vec::new();
        }
        vec![PageSignal::ButtonShown(self.label.clone())]
    }

    /// Presses the button. Ignored while hidden and after the first press.
    pub fn press(&mut self) -> Vec<PageSignal> {
        if self.visible && self.pressed.trigger() {
            vec![PageSignal::Haptic(BUTTON_HAPTIC), PageSignal::Advance]
        } else {
            Vec::new()
        }
    }

    pub fn view(&self) -> ButtonView {
        ButtonView {
            label: self.label.clone(),
            visible: self.visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_button_ignores_press() {
        let mut button = DelayedButton::new("Okay.");
        assert!(button.press().is_empty());
        assert_eq!(button.show(), vec![PageSignal::ButtonShown("Okay.".into())]);
        assert!(button.show().is_empty());
        assert_eq!(
            button.press(),
            vec![PageSignal::Haptic(BUTTON_HAPTIC), PageSignal::Advance]
        );
        assert!(button.press().is_empty());
    }
}
