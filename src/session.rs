use crate::page::Page;
use crate::pipeline::{self, PipelineFormatter};
use crate::qr;
use crate::render::{TodayFormatter, YesterdayFormatter};
use crate::view_state::{RiderKey, Selection, TodayView};
use anyhow::{anyhow, Context, Result};
use pool_structures::find_by_id;
use std::fmt::{Display, Formatter};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  route <pool-id>                    show or hide the route of one of today's pools
  qr <pool-id> <rider>               show or hide the QR pass of a rider
  svg <pool-id> <rider> <file.svg>   save the QR pass of a rider
  step <step-id>                     show or hide the tools of a pipeline step
  show                               draw the page again
  help                               this message
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Route(String),
    Qr(RiderKey),
    Svg(RiderKey, PathBuf),
    Step(String),
    Show,
    Help,
    Quit,
}

fn rider_key(pool_id: Option<&str>, index: Option<&str>) -> Result<RiderKey, String> {
    match (pool_id, index) {
        (Some(pool_id), Some(index)) => index
            .parse()
            .map(|index| RiderKey::new(pool_id, index))
            .map_err(|_| format!("{index} is not a rider position")),
        _ => Err("expected a pool id and a rider position".to_owned()),
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let name = words.next().unwrap_or_default().to_lowercase();
        let command = match name.as_str() {
            "route" => words
                .next()
                .map(|id| Command::Route(id.to_owned()))
                .ok_or_else(|| "expected a pool id".to_owned())?,
            "qr" => Command::Qr(rider_key(words.next(), words.next())?),
            "svg" => {
                let key = rider_key(words.next(), words.next())?;
                let path = words.next().ok_or_else(|| "expected a file name".to_owned())?;
                Command::Svg(key, PathBuf::from(path))
            }
            "step" => words
                .next()
                .map(|id| Command::Step(id.to_owned()))
                .ok_or_else(|| "expected a step id".to_owned())?,
            "show" | "" => Command::Show,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("{other} is not a command, try help")),
        };
        Ok(command)
    }
}

/// What the loop does after a command
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Redraw,
    Message(String),
    Quit,
}

#[derive(Debug)]
pub struct Session {
    page: Page,
    today: TodayView,
    pipeline: Selection<&'static str>,
}

impl Session {
    pub fn new(page: Page) -> Self {
        Session {
            page,
            today: TodayView::default(),
            pipeline: Selection::default(),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn apply(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::Route(pool_id) => {
                find_by_id(self.page.today(), &pool_id)?;
                self.today.toggle_route(&pool_id);
            }
            Command::Qr(key) => {
                find_by_id(self.page.today(), &key.pool_id)?.rider(key.index)?;
                self.today.toggle_ticket(key);
            }
            Command::Svg(key, path) => {
                let pool = find_by_id(self.page.today(), &key.pool_id)?;
                let ticket = pool.ticket(key.index)?;
                let svg = qr::to_svg(&ticket).map_err(|e| anyhow!("cannot encode {key}: {e}"))?;
                std::fs::write(&path, svg)
                    .with_context(|| format!("cannot write {}", path.display()))?;
                return Ok(Outcome::Message(format!(
                    "Saved the pass of {} to {}",
                    ticket.rider.name,
                    path.display()
                )));
            }
            Command::Step(id) => {
                let step = pipeline::find_step(&id).ok_or_else(|| anyhow!("no step {id}"))?;
                self.pipeline.toggle(step.id);
            }
            Command::Show => {}
            Command::Help => return Ok(Outcome::Message(HELP.to_owned())),
            Command::Quit => return Ok(Outcome::Quit),
        }
        Ok(Outcome::Redraw)
    }
}

impl Display for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Alumni Connect | AI-Powered Ride Pooling System")?;
        writeln!(f)?;
        writeln!(
            f,
            "{}",
            TodayFormatter {
                page: &self.page,
                view: &self.today
            }
        )?;
        writeln!(f, "{}", YesterdayFormatter { page: &self.page })?;
        write!(
            f,
            "{}",
            PipelineFormatter {
                open_step: &self.pipeline
            }
        )
    }
}

/// Reads commands line by line until `quit` or the end of the input
pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, mut output: W) -> Result<()> {
    writeln!(output, "{HELP}")?;
    for line in input.lines() {
        let line = line.context("cannot read command")?;
        let outcome = line
            .parse::<Command>()
            .map_err(|e| anyhow!(e))
            .and_then(|command| session.apply(command));

        match outcome {
            Ok(Outcome::Redraw) => writeln!(output, "{session}")?,
            Ok(Outcome::Message(message)) => writeln!(output, "{message}")?,
            Ok(Outcome::Quit) => break,
            Err(e) => {
                log::debug!("command {line:?} rejected: {e:#}");
                writeln!(output, "{e:#}")?;
            }
        }
        output.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::{DataOrigin, LoadedPools};
    use crate::fallback;

    fn session() -> Session {
        let mut page = Page::new();
        page.finish_loading(LoadedPools {
            today: fallback::today(),
            yesterday: fallback::yesterday(),
            origin: DataOrigin::Fallback,
        });
        Session::new(page)
    }

    fn run_lines(session: &mut Session, lines: &str) -> String {
        let mut output = Vec::new();
        run(session, lines.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn parse_commands() {
        assert_eq!(Ok(Command::Route("pool-001".to_owned())), "route pool-001".parse());
        assert_eq!(
            Ok(Command::Qr(RiderKey::new("pool-001", 2))),
            "QR  pool-001 2".parse()
        );
        assert_eq!(
            Ok(Command::Svg(RiderKey::new("pool-001", 0), PathBuf::from("pass.svg"))),
            "svg pool-001 0 pass.svg".parse()
        );
        assert_eq!(Ok(Command::Show), "".parse());
        assert_eq!(Ok(Command::Quit), "exit".parse());
        assert!("qr pool-001 first".parse::<Command>().is_err());
        assert!("route".parse::<Command>().is_err());
        assert!("book pool-001".parse::<Command>().is_err());
    }

    #[test]
    fn route_toggles() {
        let mut session = session();
        assert_eq!(
            Outcome::Redraw,
            session.apply(Command::Route("pool-001".to_owned())).unwrap()
        );
        assert!(session.to_string().contains("Optimized Route Map"));

        session.apply(Command::Route("pool-001".to_owned())).unwrap();
        assert!(!session.to_string().contains("Optimized Route Map"));
    }

    #[test]
    fn unknown_references_leave_state_unchanged() {
        let mut session = session();
        let before = session.to_string();
        assert!(session.apply(Command::Route("pool-y001".to_owned())).is_err());
        assert!(session.apply(Command::Qr(RiderKey::new("pool-001", 3))).is_err());
        assert!(session.apply(Command::Step("dispatch".to_owned())).is_err());
        assert_eq!(before, session.to_string());
    }

    #[test]
    fn step_shows_tools() {
        let mut session = session();
        session.apply(Command::Step("ticket".to_owned())).unwrap();
        assert!(session
            .to_string()
            .contains("Tools Used: QR generator, Ticket template, Supabase storage"));
    }

    #[test]
    fn svg_export() {
        let mut session = session();
        let path = std::env::temp_dir().join(format!("alumni-connect-pass-{}.svg", std::process::id()));
        let outcome = session
            .apply(Command::Svg(RiderKey::new("pool-001", 0), path.clone()))
            .unwrap();

        assert_eq!(
            Outcome::Message(format!("Saved the pass of Priya Sharma to {}", path.display())),
            outcome
        );
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn command_loop() {
        let mut session = session();
        let output = run_lines(&mut session, "qr pool-001 1\nfly away\nquit\nroute pool-001\n");

        assert!(output.contains("Passenger:   Arjun Reddy"));
        assert!(output.contains("fly is not a command, try help"));
        // nothing is read after quit
        assert!(!output.contains("Optimized Route Map"));
    }
}
