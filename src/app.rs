use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, instrument};

use crate::navigator::Navigator;
use crate::route::Route;

pub const HELP: &str = "commands: <n> open row n | b back | a add to cart | r redraw | q quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(usize),
    Back,
    Action,
    Redraw,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(n) = trimmed.parse::<usize>() {
            return Some(Command::Open(n));
        }
        let cmd = match trimmed.to_ascii_lowercase().as_str() {
            "b" | "back" => Command::Back,
            "a" | "add" => Command::Action,
            "r" | "redraw" => Command::Redraw,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        };
        Some(cmd)
    }
}

/// Interactive loop: one command per line, redraw after each command and
/// whenever a fetch lands. Returns on `quit` or end of input.
#[instrument(skip_all)]
pub async fn run<R, W>(nav: &mut Navigator, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let redraw = nav.redraw_signal();
    draw(nav, out).await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read command")? else {
                    debug!("input closed");
                    break;
                };
                let Some(cmd) = Command::parse(&line) else { continue };
                if !apply(nav, cmd, out).await? {
                    break;
                }
                draw(nav, out).await?;
            }
            _ = redraw.notified() => {
                draw(nav, out).await?;
            }
        }
    }
    Ok(())
}

/// Render the list once it has loaded, then return.
pub async fn run_once<W>(nav: &mut Navigator, out: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    nav.settle().await;
    draw(nav, out).await
}

/// Execute a command. Returns `false` when the loop should stop.
async fn apply<W>(nav: &mut Navigator, cmd: Command, out: &mut W) -> Result<bool>
where
    W: AsyncWrite + Unpin,
{
    match cmd {
        Command::Open(n) => {
            if nav.route() != Route::List || nav.select(n).await.is_none() {
                write_line(out, &format!("no row {}", n)).await?;
            }
        }
        Command::Back => {
            nav.back();
        }
        Command::Action => nav.press_action(),
        Command::Redraw => {}
        Command::Help => write_line(out, HELP).await?,
        Command::Quit => return Ok(false),
        Command::Unknown(raw) => {
            write_line(out, &format!("unknown command '{}' (h for help)", raw)).await?
        }
    }
    Ok(true)
}

async fn draw<W>(nav: &Navigator, out: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let frame = nav.render().await;
    out.write_all(frame.as_bytes())
        .await
        .context("failed to write view")?;
    out.flush().await.context("failed to flush view")?;
    Ok(())
}

async fn write_line<W>(out: &mut W, line: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(format!("{}\n", line).as_bytes())
        .await
        .context("failed to write message")?;
    Ok(())
}
