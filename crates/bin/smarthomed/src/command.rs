//! Line-oriented commands understood by the daemon's shell.

use std::path::PathBuf;
use std::str::FromStr;

use smarthome_domain::device::{DeviceKind, PowerState};

/// Help text printed by the `help` command.
pub const HELP: &str = "\
commands:
  all on | all off          switch both rooms and the player
  on <room> <kind>          switch one device on (e.g. `on Kitchen Light`)
  off <room> <kind>         switch one device off
  load <path>...            replace the playlist with the given files
                            (wrap paths containing spaces in double quotes)
  play [index]              play the current track, or jump to index
  pause | stop | next | prev
  status                    show rooms and player state
  log                       show the action log
  save                      persist the playlist now
  help | quit";

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AllOn,
    AllOff,
    Switch {
        room: String,
        kind: DeviceKind,
        state: PowerState,
    },
    Load(Vec<PathBuf>),
    Play(Option<usize>),
    Pause,
    Stop,
    Next,
    Prev,
    Status,
    Log,
    Save,
    Help,
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}, try `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("invalid track index {0:?}")]
    InvalidIndex(String),
    #[error("unterminated quote")]
    UnterminatedQuote,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words = split_words(line)?;
        let Some((head, rest)) = words.split_first() else {
            return Err(CommandError::Empty);
        };
        let rest: Vec<&str> = rest.iter().map(String::as_str).collect();

        match (head.to_ascii_lowercase().as_str(), rest.as_slice()) {
            ("all", ["on"]) => Ok(Self::AllOn),
            ("all", ["off"]) => Ok(Self::AllOff),
            ("all", _) => Err(CommandError::Usage("all on | all off")),
            ("on", args) => parse_switch(args, PowerState::On),
            ("off", args) => parse_switch(args, PowerState::Off),
            ("load", []) => Err(CommandError::Usage("load <path>...")),
            ("load", paths) => Ok(Self::Load(paths.iter().map(PathBuf::from).collect())),
            ("play", []) => Ok(Self::Play(None)),
            ("play", [index]) => index
                .parse()
                .map(|i| Self::Play(Some(i)))
                .map_err(|_| CommandError::InvalidIndex((*index).to_string())),
            ("play", _) => Err(CommandError::Usage("play [index]")),
            ("pause", []) => Ok(Self::Pause),
            ("stop", []) => Ok(Self::Stop),
            ("next", []) => Ok(Self::Next),
            ("prev", []) => Ok(Self::Prev),
            ("status", []) => Ok(Self::Status),
            ("log", []) => Ok(Self::Log),
            ("save", []) => Ok(Self::Save),
            ("help", _) => Ok(Self::Help),
            ("quit" | "exit", []) => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(line.trim().to_string())),
        }
    }
}

/// Split on whitespace, keeping `"double quoted"` runs together.
fn split_words(line: &str) -> Result<Vec<String>, CommandError> {
    let mut words = Vec::new();
    let mut current: Option<String> = None;
    let mut quoted = false;
    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                current.get_or_insert_with(String::new);
            }
            c if c.is_whitespace() && !quoted => words.extend(current.take()),
            c => current.get_or_insert_with(String::new).push(c),
        }
    }
    if quoted {
        return Err(CommandError::UnterminatedQuote);
    }
    words.extend(current);
    Ok(words)
}

/// `<room words...> <kind>`: the kind is the last word so room names may
/// contain spaces.
fn parse_switch(args: &[&str], state: PowerState) -> Result<Command, CommandError> {
    const USAGE: &str = "on|off <room> <kind>";
    let [room @ .., kind] = args else {
        return Err(CommandError::Usage(USAGE));
    };
    if room.is_empty() {
        return Err(CommandError::Usage(USAGE));
    }
    let kind = kind.parse().map_err(|_| CommandError::Usage(USAGE))?;
    Ok(Command::Switch {
        room: room.join(" "),
        kind,
        state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_bulk_commands() {
        assert_eq!("all on".parse(), Ok(Command::AllOn));
        assert_eq!("ALL off".parse(), Ok(Command::AllOff));
        assert_eq!(
            "all maybe".parse::<Command>(),
            Err(CommandError::Usage("all on | all off"))
        );
    }

    #[test]
    fn should_parse_switch_with_multi_word_room() {
        assert_eq!(
            "on Living Room AC".parse(),
            Ok(Command::Switch {
                room: "Living Room".to_string(),
                kind: DeviceKind::AirConditioner,
                state: PowerState::On,
            })
        );
        assert_eq!(
            "off Kitchen light".parse(),
            Ok(Command::Switch {
                room: "Kitchen".to_string(),
                kind: DeviceKind::Light,
                state: PowerState::Off,
            })
        );
    }

    #[test]
    fn should_require_room_and_kind() {
        assert!(matches!(
            "on Light".parse::<Command>(),
            Err(CommandError::Usage(_))
        ));
        assert!(matches!("off".parse::<Command>(), Err(CommandError::Usage(_))));
    }

    #[test]
    fn should_parse_load_paths_in_order() {
        assert_eq!(
            "load /m/b.mp3 /m/a.mp3".parse(),
            Ok(Command::Load(vec![
                PathBuf::from("/m/b.mp3"),
                PathBuf::from("/m/a.mp3")
            ]))
        );
        assert!(matches!("load".parse::<Command>(), Err(CommandError::Usage(_))));
    }

    #[test]
    fn should_keep_quoted_paths_with_spaces_together() {
        assert_eq!(
            r#"load "/music/Кино - Группа крови.mp3" /m/a.mp3"#.parse(),
            Ok(Command::Load(vec![
                PathBuf::from("/music/Кино - Группа крови.mp3"),
                PathBuf::from("/m/a.mp3")
            ]))
        );
        assert_eq!(
            r#"on "Living Room" AC"#.parse(),
            Ok(Command::Switch {
                room: "Living Room".to_string(),
                kind: DeviceKind::AirConditioner,
                state: PowerState::On,
            })
        );
    }

    #[test]
    fn should_reject_unterminated_quote() {
        assert_eq!(
            r#"load "/music/a b.mp3"#.parse::<Command>(),
            Err(CommandError::UnterminatedQuote)
        );
    }

    #[test]
    fn should_parse_play_with_optional_index() {
        assert_eq!("play".parse(), Ok(Command::Play(None)));
        assert_eq!("play 2".parse(), Ok(Command::Play(Some(2))));
        assert_eq!(
            "play -1".parse::<Command>(),
            Err(CommandError::InvalidIndex("-1".to_string()))
        );
    }

    #[test]
    fn should_parse_simple_commands() {
        assert_eq!("pause".parse(), Ok(Command::Pause));
        assert_eq!("stop".parse(), Ok(Command::Stop));
        assert_eq!("  next  ".parse(), Ok(Command::Next));
        assert_eq!("prev".parse(), Ok(Command::Prev));
        assert_eq!("status".parse(), Ok(Command::Status));
        assert_eq!("log".parse(), Ok(Command::Log));
        assert_eq!("save".parse(), Ok(Command::Save));
        assert_eq!("help".parse(), Ok(Command::Help));
        assert_eq!("exit".parse(), Ok(Command::Quit));
    }

    #[test]
    fn should_reject_empty_and_unknown_lines() {
        assert_eq!("   ".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "dance".parse::<Command>(),
            Err(CommandError::Unknown("dance".to_string()))
        );
    }
}
