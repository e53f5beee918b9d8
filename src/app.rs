use crate::config;
use crate::model::PersistedState;
use crate::queue::PlaybackQueue;
use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const NO_TRACK: &str = "No track";

#[derive(Debug, Default)]
pub struct AppStartupOptions {
    pub playlist_file: Option<PathBuf>,
}

pub struct Session {
    pub queue: PlaybackQueue,
    pub last_playlist: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Status(String),
    Quit,
}

pub fn run_with_startup(options: AppStartupOptions) -> Result<()> {
    let state = config::load_state()?;
    let mut queue = PlaybackQueue::new();
    queue.set_shuffle(state.shuffle_enabled);

    let mut session = Session {
        queue,
        last_playlist: None,
    };

    if let Some(path) = options.playlist_file.or(state.last_playlist) {
        match session.queue.load_from(&path) {
            Ok(()) => {
                println!("Loaded {} tracks from {}", session.queue.len(), path.display());
                session.last_playlist = Some(path);
            }
            Err(err) => println!("load error: {err:#}"),
        }
    }

    let stdin = io::stdin();
    let mut out = io::stdout();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match run_command(&mut session, &line) {
            CommandOutcome::Quit => break,
            CommandOutcome::Status(status) => writeln!(out, "{status}")?,
        }
    }

    config::save_state(&PersistedState {
        shuffle_enabled: session.queue.shuffle_enabled(),
        last_playlist: session.last_playlist,
    })?;
    Ok(())
}

/// Parses one input line, invokes exactly one queue operation, and renders
/// its result as a status line. Queue semantics live in `queue.rs`; this
/// layer only translates.
pub fn run_command(session: &mut Session, raw: &str) -> CommandOutcome {
    let input = raw.trim();
    if input.is_empty() {
        return CommandOutcome::Status(String::from("No command"));
    }

    let mut command_split = input.splitn(2, char::is_whitespace);
    let command = command_split.next().unwrap_or_default();
    let rest = command_split.next().unwrap_or("").trim();

    let queue = &mut session.queue;
    let status = match command {
        "help" => String::from(
            "Commands: add <name> | remove <name> | next | prev | current | find <name> | shuffle | list | save <file> | load <file> | quit",
        ),
        "add" => {
            if rest.is_empty() {
                String::from("Usage: add <name>")
            } else {
                queue.add(rest);
                format!("Added: {rest}")
            }
        }
        "remove" => {
            if rest.is_empty() {
                String::from("Usage: remove <name>")
            } else if queue.remove(rest) {
                format!("Removed: {rest}")
            } else {
                format!("Track not found: {rest}")
            }
        }
        "next" => {
            queue.advance();
            format!("Now at: {}", queue.current().unwrap_or(NO_TRACK))
        }
        "prev" => {
            queue.retreat();
            format!("Now at: {}", queue.current().unwrap_or(NO_TRACK))
        }
        "current" => queue.current().unwrap_or(NO_TRACK).to_string(),
        "find" => {
            if rest.is_empty() {
                String::from("Usage: find <name>")
            } else if queue.contains(rest) {
                format!("Found: {rest}")
            } else {
                format!("Not in the queue: {rest}")
            }
        }
        "shuffle" => {
            queue.toggle_shuffle();
            if queue.shuffle_enabled() {
                String::from("Shuffle on")
            } else {
                String::from("Shuffle off")
            }
        }
        "list" => {
            let names = queue.snapshot();
            if names.is_empty() {
                String::from("Queue is empty")
            } else {
                names.join("\n")
            }
        }
        "save" => {
            if rest.is_empty() {
                String::from("Usage: save <file>")
            } else {
                let path = PathBuf::from(rest);
                match queue.save_to(&path) {
                    Ok(()) => {
                        session.last_playlist = Some(path);
                        format!("Saved {} tracks to {rest}", queue.len())
                    }
                    Err(err) => format!("save error: {err:#}"),
                }
            }
        }
        "load" => {
            if rest.is_empty() {
                String::from("Usage: load <file>")
            } else {
                let path = PathBuf::from(rest);
                match queue.load_from(&path) {
                    Ok(()) => {
                        session.last_playlist = Some(path);
                        format!("Loaded {} tracks from {rest}", queue.len())
                    }
                    Err(err) => format!("load error: {err:#}"),
                }
            }
        }
        "quit" | "exit" => return CommandOutcome::Quit,
        other => format!("Unknown command: {other} (try help)"),
    };

    CommandOutcome::Status(status)
}
