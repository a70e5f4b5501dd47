use crate::attack::AttackKind;
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH, SELECTOR_BUTTON_SIZE};
use crate::types::TeamId;

// A strip of square buttons, one per weapon, centred on the screen
#[derive(Debug, Clone, PartialEq)]
pub struct AttackSelector {
    pub team: TeamId, // Team that receives the chosen weapon
    pub buttons: Vec<AttackKind>,
}

impl AttackSelector {
    pub fn new(team: TeamId) -> Self {
        AttackSelector {
            team,
            buttons: AttackKind::ALL.to_vec(),
        }
    }

    pub fn width(&self) -> f32 {
        SELECTOR_BUTTON_SIZE * self.buttons.len() as f32
    }

    pub fn height(&self) -> f32 {
        SELECTOR_BUTTON_SIZE
    }

    /// Screen position of the strip's top-left corner.
    pub fn position(&self) -> (f32, f32) {
        (
            ((SCREEN_WIDTH as f32 - self.width()) / 2.0).floor(),
            ((SCREEN_HEIGHT as f32 - self.height()) / 2.0).floor(),
        )
    }

    /// Index of the button under a screen point, if any.
    pub fn button_at(&self, (x, y): (f32, f32)) -> Option<usize> {
        let (left, top) = self.position();
        let (x, y) = (x - left, y - top);
        if x < 0.0 || y < 0.0 || y >= self.height() || x >= self.width() {
            return None;
        }
        Some((x / SELECTOR_BUTTON_SIZE) as usize)
    }

    /// The weapon under a click, if the click landed on a button.
    pub fn click(&self, at: (f32, f32)) -> Option<AttackKind> {
        self.button_at(at).and_then(|i| self.buttons.get(i).copied())
    }
}
