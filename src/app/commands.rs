//! Inbound console commands and the line grammar.
//!
//! The console speaks two lines: `start <charge_secs> <measure_secs>`
//! and `stop`. Anything else yields no command, no response, and no
//! state change — the console is a single-operator channel and stays
//! permissive rather than chatty about mistakes.

/// Longest accepted console line, including any trailing newline.
pub const MAX_LINE: usize = 64;

/// Commands the console can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Begin a run with the given durations.
    Start { charge_ms: u64, measure_ms: u64 },

    /// End the measure phase early.
    Stop,
}

/// Parse one console line into a command.
///
/// Grammar: `start <int> <int>` (case-sensitive keyword, non-negative
/// integer seconds) or `stop`, with surrounding whitespace trimmed.
/// Seconds are converted to milliseconds here so the rest of the system
/// speaks a single unit.
pub fn parse_line(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();

    match words.next()? {
        "start" => {
            let charge_secs: u64 = words.next()?.parse().ok()?;
            let measure_secs: u64 = words.next()?.parse().ok()?;
            if words.next().is_some() {
                return None;
            }
            Some(Command::Start {
                charge_ms: charge_secs.checked_mul(1000)?,
                measure_ms: measure_secs.checked_mul(1000)?,
            })
        }
        "stop" => {
            if words.next().is_some() {
                return None;
            }
            Some(Command::Stop)
        }
        _ => None,
    }
}
