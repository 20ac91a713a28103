//! Driving a mounted carousel outside the browser.
//!
//! Two drivers share the same carousel and output code:
//!
//! - [`run`]: the interactive `preview` loop. Stdin commands and wall-clock
//!   timer ticks arrive on one `mpsc` channel and are handled one at a time,
//!   each to completion, so the carousel is never touched concurrently.
//! - [`simulate`]: the `simulate` command. Runs the carousel on a
//!   [`ManualScheduler`] and records a timeline in virtual time.
//!
//! ## Commands
//!
//! | Input | Effect |
//! |-------|--------|
//! | `next`, `n` | step forward |
//! | `prev`, `p` | step back |
//! | `go N`, `g N` | jump to slide N (restarts the autoplay countdown) |
//! | `width N`, `w N` | resize the viewport to N pixels |
//! | `show`, `s` | print the current state |
//! | `quit`, `q` | stop |

use crate::carousel::{Carousel, CarouselSettings, CarouselView};
use crate::output;
use crate::timer::{MIN_PERIOD, ManualScheduler, Scheduler, TimerId};
use crate::types::Card;
use crate::viewport::{FixedViewport, SharedViewport, Viewport};
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}` (try next, prev, go N, width N, show, quit)")]
    Unknown(String),
    #[error("`{0}` needs a number")]
    MissingArgument(&'static str),
    #[error("slide index must be a non-negative integer, got `{0}`")]
    InvalidIndex(String),
    #[error("width must be a non-negative integer, got `{0}`")]
    InvalidWidth(String),
    #[error("`{0}` takes no arguments")]
    UnexpectedArgument(&'static str),
}

/// A user action on the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    GoTo(usize),
    Resize(u32),
    Show,
    Quit,
}

impl Command {
    fn label(self) -> String {
        match self {
            Command::Next => "next".to_string(),
            Command::Prev => "prev".to_string(),
            Command::GoTo(index) => format!("go {index}"),
            Command::Resize(width) => format!("w {width}"),
            Command::Show => "show".to_string(),
            Command::Quit => "quit".to_string(),
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(CommandError::Empty)?;
        let arg = words.next();

        let no_arg = |name: &'static str, command: Command| match arg {
            Some(_) => Err(CommandError::UnexpectedArgument(name)),
            None => Ok(command),
        };

        match verb {
            "next" | "n" => no_arg("next", Command::Next),
            "prev" | "p" => no_arg("prev", Command::Prev),
            "show" | "s" => no_arg("show", Command::Show),
            "quit" | "q" => no_arg("quit", Command::Quit),
            "go" | "g" => {
                let raw = arg.ok_or(CommandError::MissingArgument("go"))?;
                raw.parse::<usize>()
                    .map(Command::GoTo)
                    .map_err(|_| CommandError::InvalidIndex(raw.to_string()))
            }
            "width" | "w" => {
                let raw = arg.ok_or(CommandError::MissingArgument("width"))?;
                raw.parse::<u32>()
                    .map(Command::Resize)
                    .map_err(|_| CommandError::InvalidWidth(raw.to_string()))
            }
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Everything the preview loop reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Command(Command),
    /// A line that did not parse; the message is shown to the user.
    Rejected(String),
    Tick(TimerId),
    /// Input ended.
    Closed,
}

impl From<TimerId> for Event {
    fn from(id: TimerId) -> Self {
        Event::Tick(id)
    }
}

/// Read lines from `reader` on a background thread and forward them as
/// events. Blank lines are skipped; end of input sends [`Event::Closed`].
pub fn forward_lines<R>(reader: R, events: Sender<Event>) -> JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in reader.lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            let event = match line.parse::<Command>() {
                Ok(command) => Event::Command(command),
                Err(err) => Event::Rejected(err.to_string()),
            };
            if events.send(event).is_err() {
                return;
            }
        }
        let _ = events.send(Event::Closed);
    })
}

fn apply<S: Scheduler>(carousel: &mut Carousel<SharedViewport, S>, command: Command) {
    match command {
        Command::Next => carousel.next_slide(),
        Command::Prev => carousel.prev_slide(),
        Command::GoTo(index) => carousel.go_to_slide(index),
        Command::Resize(width) => {
            carousel.viewport().set(width);
            carousel.on_resize();
        }
        Command::Show | Command::Quit => {}
    }
}

/// Handle events until `quit` or end of input, writing one status line per
/// change. Autoplay is stopped before returning.
pub fn run<S, W>(
    carousel: &mut Carousel<SharedViewport, S>,
    events: &Receiver<Event>,
    out: &mut W,
) -> io::Result<()>
where
    S: Scheduler,
    W: Write,
{
    writeln!(out, "{}", output::format_carousel_line("mount", &carousel.view()))?;
    for event in events.iter() {
        match event {
            Event::Tick(id) => {
                if carousel.on_tick(id) {
                    writeln!(out, "{}", output::format_carousel_line("auto", &carousel.view()))?;
                }
            }
            Event::Command(Command::Quit) | Event::Closed => break,
            Event::Command(command) => {
                apply(carousel, command);
                writeln!(
                    out,
                    "{}",
                    output::format_carousel_line(&command.label(), &carousel.view())
                )?;
            }
            Event::Rejected(message) => writeln!(out, "error: {message}")?,
        }
        out.flush()?;
    }
    carousel.stop_auto_play();
    Ok(())
}

// ============================================================================
// Simulation
// ============================================================================

/// A manual jump scheduled at a point in virtual time, written `SECONDS:INDEX`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jump {
    pub at: Duration,
    pub index: usize,
}

impl FromStr for Jump {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (at, index) = s
            .split_once(':')
            .ok_or_else(|| format!("expected SECONDS:INDEX, got `{s}`"))?;
        let at: f64 = at
            .parse()
            .map_err(|_| format!("invalid time `{at}` in `{s}`"))?;
        let at = Duration::try_from_secs_f64(at)
            .map_err(|_| format!("time must be a non-negative number of seconds, got `{s}`"))?;
        let index: usize = index
            .parse()
            .map_err(|_| CommandError::InvalidIndex(index.to_string()).to_string())?;
        Ok(Jump { at, index })
    }
}

/// Upper bound on autoplay ticks a single simulation may produce.
pub const MAX_SIMULATED_TICKS: u128 = 100_000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SimulateError {
    #[error(
        "simulating {duration:?} at a {interval:?} interval needs {ticks} autoplay ticks (limit {limit})"
    )]
    TooManyTicks {
        duration: Duration,
        interval: Duration,
        ticks: u128,
        limit: u128,
    },
}

/// What caused a timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCause {
    Mount,
    Tick,
    Jump(usize),
}

/// Carousel state right after something happened.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationStep {
    pub at: Duration,
    pub cause: StepCause,
    pub view: CarouselView,
}

/// Mount a carousel at `width`, run it for `duration` of virtual time with
/// the given manual jumps, and return every state change in order.
///
/// A tick and a jump due at the same instant resolve tick first. Runs that
/// would need more than [`MAX_SIMULATED_TICKS`] ticks are refused up front.
pub fn simulate(
    cards: Vec<Card>,
    settings: CarouselSettings,
    width: u32,
    duration: Duration,
    jumps: &[Jump],
) -> Result<Vec<SimulationStep>, SimulateError> {
    let interval = settings.interval.max(MIN_PERIOD);
    let ticks = duration.as_nanos() / interval.as_nanos();
    if ticks > MAX_SIMULATED_TICKS {
        return Err(SimulateError::TooManyTicks {
            duration,
            interval,
            ticks,
            limit: MAX_SIMULATED_TICKS,
        });
    }

    let sched = ManualScheduler::new();
    let mut carousel = Carousel::mount(cards, settings, FixedViewport(width), sched.clone());
    let mut steps = vec![SimulationStep {
        at: Duration::ZERO,
        cause: StepCause::Mount,
        view: carousel.view(),
    }];

    let mut pending: Vec<Jump> = jumps.iter().copied().filter(|j| j.at <= duration).collect();
    pending.sort_by(|a, b| a.at.cmp(&b.at));
    let mut pending = pending.into_iter().peekable();

    loop {
        let next_jump = pending.peek().map(|j| j.at);
        let target = match (sched.next_due(), next_jump) {
            (Some(tick), Some(jump)) => tick.min(jump),
            (Some(tick), None) => tick,
            (None, Some(jump)) => jump,
            (None, None) => break,
        };
        if target > duration {
            break;
        }

        for id in sched.advance(target.saturating_sub(sched.now())) {
            if carousel.on_tick(id) {
                steps.push(record(&carousel, sched.now(), StepCause::Tick));
            }
        }
        while let Some(jump) = pending.next_if(|j| j.at <= target) {
            carousel.go_to_slide(jump.index);
            steps.push(record(&carousel, sched.now(), StepCause::Jump(jump.index)));
        }
    }

    carousel.unmount();
    Ok(steps)
}

fn record<V: Viewport, S: Scheduler>(
    carousel: &Carousel<V, S>,
    at: Duration,
    cause: StepCause,
) -> SimulationStep {
    SimulationStep {
        at,
        cause,
        view: carousel.view(),
    }
}
