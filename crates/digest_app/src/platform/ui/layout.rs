use ratatui::layout::{Constraint, Layout, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub input: Rect,
    pub trigger: Rect,
    pub body: Rect,
    pub help: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    ScreenLayout {
        header: rows[0],
        input: rows[1],
        trigger: rows[2],
        body: rows[3],
        help: rows[4],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_takes_remaining_height() {
        let layout = screen_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.input.height, 3);
        assert_eq!(layout.body.height, 24 - 1 - 3 - 1 - 1);
        assert_eq!(layout.help.y, 23);
    }
}
