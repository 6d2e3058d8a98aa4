pub mod constants;
pub mod keymap;
pub mod layout;
pub mod render;

/// Presentation-only state that never reaches `digest_core`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    pub scroll: u16,
}

impl UiState {
    pub fn scroll_by(&mut self, delta: i32) {
        let next = i32::from(self.scroll).saturating_add(delta);
        self.scroll = next.clamp(0, i32::from(u16::MAX)) as u16;
    }
}
