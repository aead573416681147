//! Line-driven command loop for dirscope.
//!
//! Reads one [Command] per line, applies it to the session and prints the resulting view.
//! `back` at the start directory ends the loop, the same as `quit` or end of input.

use crate::app::{BrowserSession, Command};
use crate::ui::render_session;
use crate::utils::cli::COMMANDS_TEXT;
use crate::utils::shorten_home_path;

use std::io::{self, BufRead, Write};
use std::time::Duration;

/// Width of the name column.
const NAME_WIDTH: usize = 32;
/// How long a command waits for its listing before printing what it has.
const LISTING_WAIT: Duration = Duration::from_secs(10);

/// What the loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Runs the loop on stdin/stdout until quit, `back` at the root, or end of input.
pub fn run_terminal(session: &mut BrowserSession) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_loop(session, stdin.lock(), stdout.lock())
}

/// Main loop: prints the view, reads commands and dispatches them to the session.
pub fn run_loop<R: BufRead, W: Write>(
    session: &mut BrowserSession,
    input: R,
    mut out: W,
) -> io::Result<()> {
    settle(session);
    print_view(session, &mut out)?;

    for line in input.lines() {
        let line = line?;
        session.tick();

        let cmd = match Command::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        if dispatch(session, cmd, &mut out)? == Flow::Exit {
            break;
        }
    }
    out.flush()
}

fn dispatch<W: Write>(session: &mut BrowserSession, cmd: Command, out: &mut W) -> io::Result<Flow> {
    match cmd {
        Command::List => {
            settle(session);
            print_view(session, out)?;
        }
        Command::Enter(name) => {
            let target = session
                .current_files()
                .iter()
                .find(|f| f.is_dir() && f.name() == name)
                .map(|f| f.path().to_path_buf());
            match target {
                Some(path) => {
                    session.descend(path);
                    settle(session);
                    print_view(session, out)?;
                }
                None => writeln!(out, "No folder named '{}'", name)?,
            }
        }
        Command::Back => {
            if !session.go_back() {
                log::debug!("Back at the start directory, leaving");
                return Ok(Flow::Exit);
            }
            settle(session);
            print_view(session, out)?;
        }
        Command::Sort(key) => {
            session.request_sort(key);
            print_view(session, out)?;
        }
        Command::Toggle => {
            session.toggle_view_mode();
            settle(session);
            print_view(session, out)?;
        }
        Command::Pwd => writeln!(out, "{}", shorten_home_path(session.current_dir()))?,
        Command::Help => write!(out, "{}", COMMANDS_TEXT)?,
        Command::Quit => return Ok(Flow::Exit),
    }
    Ok(Flow::Continue)
}

fn settle(session: &mut BrowserSession) {
    if !session.wait_idle(LISTING_WAIT) {
        log::warn!(
            "Listing of {} still running after {:?}",
            session.current_dir().display(),
            LISTING_WAIT
        );
    }
}

fn print_view<W: Write>(session: &BrowserSession, out: &mut W) -> io::Result<()> {
    for line in render_session(session, NAME_WIDTH) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
