use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use listen_core::model::{Category, HINT_SLOTS};
use services::{AppServices, ListeningSession, TypingSession};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    Help,
    Categories,
    Category(String),
    Listen,
    Typing,
    Next,
    Prev,
    Play,
    Answer(Option<String>),
    Hint(usize),
    Status,
    Reload,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParseError {
    Blank,
    MissingArgument { command: &'static str },
    InvalidSlot { raw: String },
    Unknown(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Blank => write!(f, "empty command"),
            ParseError::MissingArgument { command } => write!(f, "{command} requires an argument"),
            ParseError::InvalidSlot { raw } => {
                write!(f, "invalid hint slot: {raw} (expected 1-{HINT_SLOTS})")
            }
            ParseError::Unknown(cmd) => write!(f, "unknown command: {cmd} (try `help`)"),
        }
    }
}

impl std::error::Error for ParseError {}

impl FromStr for ShellCommand {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest),
            None => (line.trim_end(), ""),
        };

        match head.to_lowercase().as_str() {
            "" => Err(ParseError::Blank),
            "help" | "?" => Ok(Self::Help),
            "categories" | "ls" => Ok(Self::Categories),
            "category" | "cat" => {
                let name = rest.trim();
                if name.is_empty() {
                    return Err(ParseError::MissingArgument { command: "category" });
                }
                Ok(Self::Category(name.to_owned()))
            }
            "listen" => Ok(Self::Listen),
            "typing" | "type" => Ok(Self::Typing),
            "next" | "n" => Ok(Self::Next),
            "prev" | "p" => Ok(Self::Prev),
            "play" => Ok(Self::Play),
            // The answer is kept verbatim; the checker does its own trimming.
            "answer" | "a" => Ok(Self::Answer((!rest.is_empty()).then(|| rest.to_owned()))),
            "hint" | "h" => {
                let raw = rest.trim();
                if raw.is_empty() {
                    return Err(ParseError::MissingArgument { command: "hint" });
                }
                // Tiles are numbered from 1 for the learner.
                let slot = raw
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .ok_or_else(|| ParseError::InvalidSlot {
                        raw: raw.to_owned(),
                    })?;
                Ok(Self::Hint(slot))
            }
            "status" => Ok(Self::Status),
            "reload" => Ok(Self::Reload),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(ParseError::Unknown(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Listening,
    Typing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

/// Interactive driver: one command per line, one synchronous step per event.
pub(crate) struct Shell {
    services: AppServices,
    listening: Option<ListeningSession>,
    typing: Option<TypingSession>,
    mode: Mode,
}

impl Shell {
    pub(crate) fn new(services: AppServices) -> Self {
        let mut shell = Self {
            services,
            listening: None,
            typing: None,
            mode: Mode::Listening,
        };
        shell.restart_sessions();
        shell
    }

    fn restart_sessions(&mut self) {
        self.listening = match self.services.start_listening(None) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!(error = %err, "listening exercise unavailable");
                None
            }
        };
        self.typing = match self.services.start_typing() {
            Ok(session) => Some(session),
            Err(err) => {
                warn!(error = %err, "typing exercise unavailable");
                None
            }
        };
        if self.listening.is_none() && self.typing.is_some() {
            self.mode = Mode::Typing;
        }
    }

    /// Execute one command, writing learner-facing output to `out`.
    pub(crate) async fn execute<W: Write>(
        &mut self,
        command: ShellCommand,
        out: &mut W,
    ) -> io::Result<Flow> {
        debug!(?command, "shell command");
        match command {
            ShellCommand::Help => write_help(out)?,
            ShellCommand::Categories => {
                let library = self.services.library();
                let current = self.listening.as_ref().map(ListeningSession::category);
                for category in library.listening_categories() {
                    let marker = if Some(category) == current { '*' } else { ' ' };
                    writeln!(out, "{marker} {category}")?;
                }
            }
            ShellCommand::Category(name) => self.select_category(&name, out)?,
            ShellCommand::Listen => match &self.listening {
                Some(session) => {
                    self.mode = Mode::Listening;
                    write_listening(session, out)?;
                }
                None => writeln!(out, "listening exercise is unavailable")?,
            },
            ShellCommand::Typing => match &self.typing {
                Some(session) => {
                    self.mode = Mode::Typing;
                    write_typing(session, out)?;
                }
                None => writeln!(out, "typing exercise is unavailable")?,
            },
            ShellCommand::Next => self.step(true, out)?,
            ShellCommand::Prev => self.step(false, out)?,
            ShellCommand::Play => self.play(out).await?,
            ShellCommand::Answer(typed) => match (self.mode, self.typing.as_mut()) {
                (Mode::Typing, Some(session)) => {
                    let feedback = session.submit(typed.as_deref());
                    writeln!(out, "{}", feedback.message())?;
                }
                _ => writeln!(out, "answers are only checked in typing mode")?,
            },
            ShellCommand::Hint(slot) => match (self.mode, self.typing.as_mut()) {
                (Mode::Typing, Some(session)) => {
                    session.reveal_hint(slot);
                    write_hints(session, out)?;
                }
                _ => writeln!(out, "hints are only available in typing mode")?,
            },
            ShellCommand::Status => match self.mode {
                Mode::Listening => {
                    if let Some(session) = &self.listening {
                        write_listening(session, out)?;
                    }
                }
                Mode::Typing => {
                    if let Some(session) = &self.typing {
                        write_typing(session, out)?;
                        write_tally(session, out)?;
                    }
                }
            },
            ShellCommand::Reload => match self.services.reload().await {
                Ok(()) => {
                    self.restart_sessions();
                    writeln!(out, "recordings reloaded")?;
                }
                Err(err) => {
                    warn!(error = %err, "reload failed");
                    writeln!(out, "error: {err}")?;
                }
            },
            ShellCommand::Quit => {
                if let Some(session) = &self.typing {
                    write_tally(session, out)?;
                }
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    fn step<W: Write>(&mut self, forward: bool, out: &mut W) -> io::Result<()> {
        match self.mode {
            Mode::Listening => {
                if let Some(session) = self.listening.as_mut() {
                    if forward {
                        session.next();
                    } else {
                        session.previous();
                    }
                    write_listening(session, out)?;
                }
            }
            Mode::Typing => {
                if let Some(session) = self.typing.as_mut() {
                    if forward {
                        session.next();
                    } else {
                        session.previous();
                    }
                    write_typing(session, out)?;
                }
            }
        }
        Ok(())
    }

    fn select_category<W: Write>(&mut self, name: &str, out: &mut W) -> io::Result<()> {
        let Some(session) = self.listening.as_mut() else {
            return writeln!(out, "listening exercise is unavailable");
        };
        let category = match Category::new(name) {
            Ok(category) => category,
            Err(err) => return writeln!(out, "error: {err}"),
        };
        if category == *self.services.library().typing_category() {
            return writeln!(out, "{category} is reserved for the typing exercise");
        }
        match session.select_category(&category) {
            Ok(_) => {
                self.mode = Mode::Listening;
                write_listening(session, out)
            }
            Err(err) => writeln!(out, "error: {err}"),
        }
    }

    async fn play<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let clip = match self.mode {
            Mode::Listening => match &self.listening {
                Some(session) => session.current_clip().await,
                None => return Ok(()),
            },
            Mode::Typing => match &self.typing {
                Some(session) => session.current_clip().await,
                None => return Ok(()),
            },
        };
        match clip {
            Ok(clip) => writeln!(
                out,
                "playing {}/{} ({}, {} bytes)",
                clip.category,
                clip.id,
                clip.mime,
                clip.len()
            ),
            Err(err) => {
                warn!(error = %err, "audio unavailable");
                writeln!(out, "error: {err}")
            }
        }
    }
}

fn write_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  categories          list listening categories")?;
    writeln!(out, "  category <name>     switch listening category")?;
    writeln!(out, "  listen | typing     switch exercise")?;
    writeln!(out, "  next | prev         page through recordings")?;
    writeln!(out, "  play                fetch the current recording")?;
    writeln!(out, "  answer <text>       check a typed answer (typing mode)")?;
    writeln!(out, "  hint <1-{HINT_SLOTS}>         uncover a letter (typing mode)")?;
    writeln!(out, "  status | reload | quit")
}

fn write_listening<W: Write>(session: &ListeningSession, out: &mut W) -> io::Result<()> {
    let (position, total) = session.progress();
    writeln!(
        out,
        "[{}] {position}/{total}: {}",
        session.category(),
        session.current()
    )
}

fn write_typing<W: Write>(session: &TypingSession, out: &mut W) -> io::Result<()> {
    let (position, total) = session.progress();
    writeln!(out, "[typing] {position}/{total}")?;
    write_hints(session, out)
}

fn write_hints<W: Write>(session: &TypingSession, out: &mut W) -> io::Result<()> {
    let tiles: Vec<String> = session
        .hints()
        .slots()
        .filter(|slot| slot.visible)
        .map(|slot| slot.letter.map_or_else(|| "_".to_owned(), String::from))
        .collect();
    writeln!(out, "hints: {}", tiles.join(" "))
}

fn write_tally<W: Write>(session: &TypingSession, out: &mut W) -> io::Result<()> {
    let tally = session.tally();
    writeln!(
        out,
        "correct {}, incorrect {}, blank {}",
        tally.correct(),
        tally.incorrect(),
        tally.empty()
    )
}

/// Read commands until EOF or `quit`.
pub(crate) async fn run_shell<R, W>(shell: &mut Shell, input: R, out: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(ParseError::Blank) => continue,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };
        if shell.execute(command, out).await? == Flow::Quit {
            break;
        }
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use listen_core::model::{PracticeSettingsDraft, RecordingId};
    use services::Clock;
    use storage::repository::{InMemoryCatalog, Storage};

    fn category(name: &str) -> Category {
        Category::new(name).unwrap()
    }

    fn id(name: &str) -> RecordingId {
        RecordingId::new(name).unwrap()
    }

    async fn build_shell() -> Shell {
        let catalog = InMemoryCatalog::new();
        for word in ["alma", "korte", "szilva"] {
            catalog
                .insert_recording(category("fruit"), id(word), word.as_bytes().to_vec())
                .unwrap();
        }
        catalog
            .insert_recording(category("animals"), id("kutya"), b"kutya".to_vec())
            .unwrap();
        catalog
            .insert_recording(category("for_typing"), id("alma"), b"alma".to_vec())
            .unwrap();

        let settings = PracticeSettingsDraft {
            shuffle: false,
            ..PracticeSettingsDraft::default()
        }
        .validate()
        .unwrap();
        let services =
            AppServices::with_storage(Storage::in_memory(catalog), Clock::default(), settings)
                .await
                .unwrap();
        Shell::new(services)
    }

    async fn run_script(script: &str) -> String {
        let mut shell = build_shell().await;
        let mut out = Vec::new();
        run_shell(&mut shell, script.as_bytes(), &mut out)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!("next".parse::<ShellCommand>(), Ok(ShellCommand::Next));
        assert_eq!("  PREV ".parse::<ShellCommand>(), Ok(ShellCommand::Prev));
        assert_eq!(
            "category fruit".parse::<ShellCommand>(),
            Ok(ShellCommand::Category("fruit".into()))
        );
        assert_eq!(
            "answer  Kutya ".parse::<ShellCommand>(),
            Ok(ShellCommand::Answer(Some(" Kutya ".into())))
        );
        assert_eq!("answer".parse::<ShellCommand>(), Ok(ShellCommand::Answer(None)));
        assert_eq!("hint 3".parse::<ShellCommand>(), Ok(ShellCommand::Hint(2)));
    }

    #[test]
    fn rejects_bad_commands() {
        assert_eq!("".parse::<ShellCommand>(), Err(ParseError::Blank));
        assert_eq!(
            "hint 0".parse::<ShellCommand>(),
            Err(ParseError::InvalidSlot { raw: "0".into() })
        );
        assert_eq!(
            "category".parse::<ShellCommand>(),
            Err(ParseError::MissingArgument { command: "category" })
        );
        assert_eq!(
            "dance".parse::<ShellCommand>(),
            Err(ParseError::Unknown("dance".into()))
        );
    }

    #[tokio::test]
    async fn pages_through_listening_category() {
        let output = run_script("category fruit\nnext\nnext\nnext\nprev\nplay\n").await;
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "[fruit] 1/3: alma",
                "[fruit] 2/3: korte",
                "[fruit] 3/3: szilva",
                "[fruit] 1/3: alma",
                "[fruit] 3/3: szilva",
                "playing fruit/szilva (audio/mpeg, 6 bytes)",
            ]
        );
    }

    #[tokio::test]
    async fn typing_mode_checks_answers_and_hints() {
        let output =
            run_script("typing\nanswer\nhint 3\nhint 9\nanswer ALMA\nquit\nnext\n").await;
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "[typing] 1/1",
                "hints: _ _ _ _",
                "Írj be valamit!",
                "hints: _ _ m _",
                "hints: _ _ m _",
                "Helyes megoldás!",
                "correct 1, incorrect 0, blank 1",
            ]
        );
    }

    #[tokio::test]
    async fn typing_category_is_not_listenable() {
        let output = run_script("categories\ncategory for_typing\nanswer alma\n").await;
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "* animals",
                "  fruit",
                "for_typing is reserved for the typing exercise",
                "answers are only checked in typing mode",
            ]
        );
    }

    #[tokio::test]
    async fn unknown_category_reports_error() {
        let output = run_script("category plants\nstatus\n").await;
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec!["error: unknown category: plants", "[animals] 1/1: kutya"]
        );
    }
}
