use crate::maze::{Direction, Speed};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiKey {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    GenerateAnimated,
    GenerateInstant,
    Play,
    SetSpeed(Speed),
    Confirm,
    Quit,
}

/// Maps a key to what the player meant by it. Keys with no meaning are
/// ignored by returning `None`.
pub fn command_for(key: UiKey) -> Option<Command> {
    if let Some(direction) = intent(key) {
        return Some(Command::Move(direction));
    }

    match key {
        UiKey::Char('g') => Some(Command::GenerateAnimated),
        UiKey::Char('i') => Some(Command::GenerateInstant),
        UiKey::Char('p') => Some(Command::Play),
        UiKey::Char('1') => Some(Command::SetSpeed(Speed::Slow)),
        UiKey::Char('2') => Some(Command::SetSpeed(Speed::Medium)),
        UiKey::Char('3') => Some(Command::SetSpeed(Speed::Fast)),
        UiKey::Char('4') => Some(Command::SetSpeed(Speed::Instantaneous)),
        UiKey::Enter => Some(Command::Confirm),
        UiKey::Esc | UiKey::Char('q') => Some(Command::Quit),
        _ => None,
    }
}

/// The cardinal direction a key asks for: arrows or WASD.
pub fn intent(key: UiKey) -> Option<Direction> {
    match key {
        UiKey::Up | UiKey::Char('w') => Some(Direction::Top),
        UiKey::Right | UiKey::Char('d') => Some(Direction::Right),
        UiKey::Down | UiKey::Char('s') => Some(Direction::Bottom),
        UiKey::Left | UiKey::Char('a') => Some(Direction::Left),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_wasd_agree() {
        assert_eq!(intent(UiKey::Up), intent(UiKey::Char('w')));
        assert_eq!(intent(UiKey::Down), intent(UiKey::Char('s')));
        assert_eq!(intent(UiKey::Left), intent(UiKey::Char('a')));
        assert_eq!(intent(UiKey::Right), intent(UiKey::Char('d')));
        assert_eq!(intent(UiKey::Up), Some(Direction::Top));
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        assert_eq!(command_for(UiKey::Char('x')), None);
        assert_eq!(command_for(UiKey::Char('W')), None);
        assert_eq!(intent(UiKey::Enter), None);
    }

    #[test]
    fn speed_keys_select_speeds() {
        assert_eq!(
            command_for(UiKey::Char('4')),
            Some(Command::SetSpeed(Speed::Instantaneous))
        );
        assert_eq!(command_for(UiKey::Char('1')), Some(Command::SetSpeed(Speed::Slow)));
    }

    #[test]
    fn movement_wins_over_other_commands() {
        assert_eq!(
            command_for(UiKey::Char('d')),
            Some(Command::Move(Direction::Right))
        );
    }
}
