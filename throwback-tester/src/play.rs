//! Line-driven play loop over any reader/writer pair.
use anyhow::Result;
use colored::Colorize;
use std::io::{BufRead, Write};

use throwback_game::scoring::describe_time_point;
use throwback_game::tables::{
    POPULAR_COUNTRIES, available_regions, format_year, region_display_name,
};
use throwback_game::{
    DifficultyTier, GameEngine, GameVariant, NextRound, PlaySession, RecordStore, RoundPhase,
    ScoreLedger, SessionLoad, is_sentinel,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Year(i32),
    Month(Option<u8>),
    Region(String),
    Pick(String),
    Origin(String),
    Difficulty(DifficultyTier),
    Submit,
    Next,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    let command = match word.to_ascii_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "year" => Command::Year(
            rest.parse()
                .map_err(|_| format!("Not a year: \"{rest}\""))?,
        ),
        "month" if rest.eq_ignore_ascii_case("none") => Command::Month(None),
        "month" => Command::Month(Some(
            rest.parse()
                .map_err(|_| format!("Not a month: \"{rest}\""))?,
        )),
        "region" if !rest.is_empty() => Command::Region(rest.to_string()),
        "pick" if !rest.is_empty() => Command::Pick(rest.to_string()),
        "origin" if !rest.is_empty() => Command::Origin(rest.to_ascii_lowercase()),
        "difficulty" => Command::Difficulty(
            DifficultyTier::from_key(rest).ok_or_else(|| format!("Unknown difficulty: \"{rest}\""))?,
        ),
        "submit" => Command::Submit,
        "next" => Command::Next,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command: \"{other}\". Type `help` for a list.")),
    };
    Ok(Some(command))
}

/// Load a session from `engine` and play it with commands read from `input`.
///
/// # Errors
///
/// Returns an error when the snapshot fetch fails or the output cannot be written.
pub fn run_play<S, L, R, W>(engine: &GameEngine<S, L>, seed: u64, input: R, out: &mut W) -> Result<()>
where
    S: RecordStore,
    L: ScoreLedger,
    R: BufRead,
    W: Write,
{
    let mut session = match engine.load_session(seed) {
        SessionLoad::Ready(session) => session,
        SessionLoad::Empty => {
            writeln!(
                out,
                "{}",
                "There are no videos available to play. Add some with `admin add`.".yellow()
            )?;
            return Ok(());
        }
        SessionLoad::Failed(err) => return Err(err.into()),
    };

    render_round(&session, out)?;
    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "{}", message.red())?;
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        apply_command(&mut session, command, out)?;
    }
    writeln!(out, "Final score: {:.1}", session.score())?;
    Ok(())
}

fn apply_command<L: ScoreLedger, W: Write>(
    session: &mut PlaySession<'_, L>,
    command: Command,
    out: &mut W,
) -> Result<()> {
    let result = match command {
        Command::Help => return write_help(session.controller().config().variant, out),
        Command::Year(year) => session.set_year(year),
        Command::Month(month) => session.set_month(month),
        Command::Region(region) => session.set_axis(Some(region)),
        Command::Pick(choice) => {
            let label = resolve_pick(session.options(), &choice);
            session.select_option(Some(label))
        }
        Command::Origin(code) => session.select_origin(Some(code)),
        Command::Difficulty(tier) => session.set_difficulty(tier),
        Command::Submit => match session.submit() {
            Ok(evaluation) => {
                writeln!(out, "{}", evaluation.feedback.bright_green())?;
                writeln!(out, "Total score: {:.1}", session.score())?;
                return Ok(());
            }
            Err(err) => Err(err),
        },
        Command::Next => match session.next_round() {
            Ok(NextRound::Advanced) => Ok(()),
            Ok(NextRound::NoMoreRounds) => {
                writeln!(
                    out,
                    "{}",
                    "That was the only video. Add more to keep playing.".yellow()
                )?;
                return Ok(());
            }
            Err(err) => Err(err),
        },
        Command::Quit => return Ok(()),
    };
    match result {
        Ok(()) => render_round(session, out),
        Err(err) => {
            writeln!(out, "{}", err.to_string().red())?;
            Ok(())
        }
    }
}

/// `pick 2` selects the second option; anything else is taken as the label.
fn resolve_pick(options: &[String], choice: &str) -> String {
    choice
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| options.get(index))
        .cloned()
        .unwrap_or_else(|| choice.to_string())
}

fn render_round<L: ScoreLedger, W: Write>(session: &PlaySession<'_, L>, out: &mut W) -> Result<()> {
    let state = session.state();
    let variant = session.controller().config().variant;
    let profile = session.controller().profile();
    writeln!(out)?;
    writeln!(
        out,
        "{} {}",
        "🎬 Now playing:".bright_cyan().bold(),
        state.current.watch_url()
    )?;
    writeln!(
        out,
        "Score: {:.1} | Difficulty: {}",
        session.score(),
        profile.label
    )?;
    let when = match variant {
        GameVariant::Memes => describe_time_point(state.guess.time),
        GameVariant::History => format_year(state.guess.time.year),
    };
    let mut guess_line = format!("Your guess: {when}");
    if let Some(axis) = state.guess.axis.as_deref() {
        guess_line.push_str(&format!(" | Region: {}", region_display_name(axis)));
    }
    if variant == GameVariant::Memes
        && let Some(origin) = state.guess.secondary.as_deref()
    {
        guess_line.push_str(&format!(" | Origin: {origin}"));
    }
    writeln!(out, "{guess_line}")?;

    let selected = match variant {
        GameVariant::Memes => state.guess.primary.as_deref(),
        GameVariant::History => state.guess.secondary.as_deref(),
    };
    writeln!(out, "Options:")?;
    for (index, option) in state.options.iter().enumerate() {
        let marker = if Some(option.as_str()) == selected { "*" } else { " " };
        writeln!(out, " {marker}{:>2}) {option}", index + 1)?;
    }
    if state.options.iter().all(|option| is_sentinel(option)) {
        writeln!(
            out,
            "{}",
            "Nothing on record for this period. Try another year.".dimmed()
        )?;
    }
    if state.phase == RoundPhase::Revealed {
        writeln!(out, "{}", "Round revealed. Type `next` to continue.".dimmed())?;
    }
    Ok(())
}

fn write_help<W: Write>(variant: GameVariant, out: &mut W) -> Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  year <n>            set the guessed year")?;
    match variant {
        GameVariant::Memes => {
            writeln!(out, "  month <1-12|none>   set the guessed month")?;
            writeln!(out, "  origin <code>       set the country of origin")?;
            writeln!(out, "                      popular: {}", POPULAR_COUNTRIES.join(", "))?;
        }
        GameVariant::History => {
            let regions: Vec<&str> = available_regions().collect();
            writeln!(out, "  region <key>        one of {}", regions.join(", "))?;
        }
    }
    writeln!(out, "  pick <n|label>      choose from the options")?;
    writeln!(out, "  difficulty <tier>   easy, medium, hard or expert")?;
    writeln!(out, "  submit | next | quit")?;
    Ok(())
}
