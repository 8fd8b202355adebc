use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use stopwatch_core::Trigger;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    Trigger(Trigger),
    /// Start when stopped, pause when running.
    StartPause,
    ScrollUp,
    ScrollDown,
    Help,
    Quit,
}

pub fn action_for(key: &KeyEvent) -> Option<Action> {
    // Raw mode delivers Ctrl-C as a key press
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }
    let action = match key.code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::F(2) => Action::StartPause,
        KeyCode::Char('s') => Action::Trigger(Trigger::Start),
        KeyCode::Char('p') => Action::Trigger(Trigger::Pause),
        KeyCode::Char('l') => Action::Trigger(Trigger::Lap),
        KeyCode::Char('r') | KeyCode::F(3) => Action::Trigger(Trigger::Reset),
        KeyCode::Up => Action::ScrollUp,
        KeyCode::Down => Action::ScrollDown,
        KeyCode::Char('?') | KeyCode::F(1) => Action::Help,
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::F(4) => Action::Quit,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_trigger_keys() {
        assert_eq!(
            action_for(&key(KeyCode::Char('s'))),
            Some(Action::Trigger(Trigger::Start))
        );
        assert_eq!(
            action_for(&key(KeyCode::Char('p'))),
            Some(Action::Trigger(Trigger::Pause))
        );
        assert_eq!(
            action_for(&key(KeyCode::Char('l'))),
            Some(Action::Trigger(Trigger::Lap))
        );
        assert_eq!(
            action_for(&key(KeyCode::Char('r'))),
            Some(Action::Trigger(Trigger::Reset))
        );
        assert_eq!(action_for(&key(KeyCode::Enter)), Some(Action::StartPause));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for(&ctrl_c), Some(Action::Quit));
        let ctrl_l = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL);
        assert_eq!(action_for(&ctrl_l), None);
    }

    #[test]
    fn test_unbound_key() {
        assert_eq!(action_for(&key(KeyCode::Char('x'))), None);
    }
}
