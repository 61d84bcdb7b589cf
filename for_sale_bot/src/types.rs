/// Character every bot command starts with.
pub const COMMAND_PREFIX: char = '/';

/// The command Telegram clients send when a user opens the bot.
pub const START_COMMAND: &str = "/start";

/// What kind of message the bot got, as far as replying goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageShape {
    /// Exactly `/start`.
    StartCommand,
    /// Any other text starting with `/`, like `/help` or `/start now`.
    OtherCommand,
    /// Text that isn't a command.
    PlainText,
}

impl MessageShape {
    /// Figure out the shape of a message from its text.
    ///
    /// Returns `None` if there is nothing to answer: no text at all
    /// (stickers, photos, service messages...) or an empty one.
    pub fn of(text: Option<&str>) -> Option<MessageShape> {
        let text = text.filter(|text| !text.is_empty())?;

        Some(if text == START_COMMAND {
            MessageShape::StartCommand
        } else if text.starts_with(COMMAND_PREFIX) {
            MessageShape::OtherCommand
        } else {
            MessageShape::PlainText
        })
    }

    pub fn is_command(self) -> bool {
        matches!(self, MessageShape::StartCommand | MessageShape::OtherCommand)
    }
}

impl std::fmt::Display for MessageShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            MessageShape::StartCommand => "start command",
            MessageShape::OtherCommand => "command",
            MessageShape::PlainText => "plain text",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::MessageShape::{self, *};

    #[test]
    fn start_command() {
        assert_eq!(MessageShape::of(Some("/start")), Some(StartCommand));
    }

    #[test]
    fn any_slash_is_a_command() {
        for text in ["/help", "/buy", "/", "/start now", "/start@some_bot", "/START"] {
            let shape = MessageShape::of(Some(text));
            assert_eq!(shape, Some(OtherCommand), "{text}");
            assert!(shape.unwrap().is_command());
        }
    }

    #[test]
    fn everything_else_is_plain_text() {
        for text in ["hi", "start", " /start", "how much?", "привет", "a/b"] {
            let shape = MessageShape::of(Some(text));
            assert_eq!(shape, Some(PlainText), "{text}");
            assert!(!shape.unwrap().is_command());
        }
    }

    #[test]
    fn nothing_to_answer() {
        assert_eq!(MessageShape::of(None), None);
        assert_eq!(MessageShape::of(Some("")), None);
    }
}
