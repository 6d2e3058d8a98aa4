use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use digest_core::{AppViewModel, Msg, Phase};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Dispatch(Msg),
    Scroll(i32),
    Quit,
    Ignore,
}

const PAGE: i32 = 10;

pub fn map_key(key: KeyEvent, view: &AppViewModel) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => KeyAction::Quit,
        KeyCode::Char('y') if ctrl => KeyAction::Dispatch(Msg::CopyClicked),
        KeyCode::Char('t') if ctrl => KeyAction::Dispatch(Msg::ToggleRenderMode),
        KeyCode::Char('u') if ctrl => KeyAction::Dispatch(Msg::InputChanged(String::new())),
        KeyCode::Char(_) if ctrl => KeyAction::Ignore,
        KeyCode::Char(ch) => {
            let mut url = view.url.clone();
            url.push(ch);
            KeyAction::Dispatch(Msg::InputChanged(url))
        }
        KeyCode::Backspace => {
            let mut url = view.url.clone();
            match url.pop() {
                Some(_) => KeyAction::Dispatch(Msg::InputChanged(url)),
                None => KeyAction::Ignore,
            }
        }
        KeyCode::Enter => KeyAction::Dispatch(Msg::SubmitClicked),
        KeyCode::Esc if view.phase == Phase::Pending => KeyAction::Dispatch(Msg::CancelClicked),
        KeyCode::Up => KeyAction::Scroll(-1),
        KeyCode::Down => KeyAction::Scroll(1),
        KeyCode::PageUp => KeyAction::Scroll(-PAGE),
        KeyCode::PageDown => KeyAction::Scroll(PAGE),
        _ => KeyAction::Ignore,
    }
}

/// Appends pasted text to the input, dropping line breaks.
pub fn append_paste(current: &str, pasted: &str) -> String {
    let mut url = current.to_owned();
    url.extend(pasted.chars().filter(|ch| !matches!(ch, '\r' | '\n')));
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn view_with_url(url: &str) -> AppViewModel {
        AppViewModel {
            url: url.to_string(),
            ..AppViewModel::default()
        }
    }

    #[test]
    fn typing_extends_the_url() {
        let view = view_with_url("https://exa");
        assert_eq!(
            map_key(key(KeyCode::Char('m')), &view),
            KeyAction::Dispatch(Msg::InputChanged("https://exam".to_string()))
        );
        assert_eq!(
            map_key(key(KeyCode::Backspace), &view),
            KeyAction::Dispatch(Msg::InputChanged("https://ex".to_string()))
        );
        assert_eq!(
            map_key(key(KeyCode::Backspace), &view_with_url("")),
            KeyAction::Ignore
        );
    }

    #[test]
    fn control_chords_map_to_commands() {
        let view = view_with_url("x");
        assert_eq!(map_key(ctrl('c'), &view), KeyAction::Quit);
        assert_eq!(
            map_key(ctrl('y'), &view),
            KeyAction::Dispatch(Msg::CopyClicked)
        );
        assert_eq!(
            map_key(ctrl('t'), &view),
            KeyAction::Dispatch(Msg::ToggleRenderMode)
        );
        assert_eq!(
            map_key(ctrl('u'), &view),
            KeyAction::Dispatch(Msg::InputChanged(String::new()))
        );
        assert_eq!(map_key(ctrl('z'), &view), KeyAction::Ignore);
    }

    #[test]
    fn escape_cancels_only_while_pending() {
        let mut view = view_with_url("x");
        assert_eq!(map_key(key(KeyCode::Esc), &view), KeyAction::Ignore);
        view.phase = Phase::Pending;
        assert_eq!(
            map_key(key(KeyCode::Esc), &view),
            KeyAction::Dispatch(Msg::CancelClicked)
        );
    }

    #[test]
    fn paste_drops_line_breaks() {
        assert_eq!(
            append_paste("", "https://example.com/a\r\n"),
            "https://example.com/a"
        );
        assert_eq!(append_paste("https://", "example.com"), "https://example.com");
    }
}
