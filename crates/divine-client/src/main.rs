//! # divine
//!
//! Line-oriented terminal driver for a Divine session. Reads one command
//! per line from stdin; `help` lists them.

use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::info;

use divine_client::notifications::{Alert, AlertSink};
use divine_client::persistence::ReportReason;
use divine_client::{Session, SessionConfig, SessionEvent, SwipeOutcome};
use divine_content::GeminiClient;
use divine_shared::{Direction, MatchId, NotifyError};

const HELP: &str = "\
commands:
  like | nope          swipe the active card
  drag <dx>            drag the card by dx and release
  undo                 reverse the last swipe
  refresh              fetch more profiles
  matches              list matches
  open <n>             open the n-th match's conversation
  close                back to the match list
  send <text>          message the open match
  report <reason>      report the active card (Fake Profile, Harassment, ...)
  hide | show          background / foreground the app
  quit";

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Like,
    Nope,
    Drag(f32),
    Undo,
    Refresh,
    Matches,
    Open(usize),
    Close,
    Send(String),
    Report(ReportReason),
    Hide,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match word.to_ascii_lowercase().as_str() {
            "like" | "l" => Ok(Self::Like),
            "nope" | "n" => Ok(Self::Nope),
            "drag" => rest
                .parse::<f32>()
                .map(Self::Drag)
                .map_err(|_| format!("drag needs a number, got {rest:?}")),
            "undo" | "u" => Ok(Self::Undo),
            "refresh" => Ok(Self::Refresh),
            "matches" | "m" => Ok(Self::Matches),
            "open" => match rest.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(Self::Open(n)),
                _ => Err(format!("open needs a match number, got {rest:?}")),
            },
            "close" => Ok(Self::Close),
            "send" | "s" => Ok(Self::Send(rest.to_string())),
            "report" => rest.parse().map(Self::Report),
            "hide" => Ok(Self::Hide),
            "show" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Prints alerts inline with the session output.
struct TerminalAlerts;

impl AlertSink for TerminalAlerts {
    fn present(&self, alert: &Alert) -> Result<(), NotifyError> {
        println!("🔔 {}: {}", alert.title, alert.body);
        Ok(())
    }
}

fn show_card(session: &Session) {
    match session.current_profile() {
        Some(p) => {
            let verified = if p.is_verified { " ✔" } else { "" };
            println!(
                "[{}] {}, {}{} | {} | {} mi | {}",
                session.deck_len(),
                p.name,
                p.age,
                verified,
                p.job,
                p.distance,
                p.bio
            );
        }
        None => println!("No more profiles. Try `refresh`."),
    }
}

fn report_outcome(session: &Session, outcome: SwipeOutcome) {
    match outcome {
        SwipeOutcome::Ignored => println!("(ignored)"),
        SwipeOutcome::SnappedBack => println!("(snapped back)"),
        SwipeOutcome::Decided { decision, .. } => {
            println!("{} {}", decision.direction.as_str(), decision.profile.name);
            show_card(session);
        }
    }
}

fn spawn_event_printer(session: &Session) {
    let mut rx = session.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(SessionEvent::ItsAMatch { name, .. }) => println!("💘 It's a match with {name}!"),
                Ok(SessionEvent::ComposingChanged { composing: true, .. }) => {
                    println!("… typing")
                }
                Ok(SessionEvent::DeckReplenished { added, fallback }) => {
                    info!(added, fallback, "Deck refilled");
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event printer lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}

fn spawn_reply_printer(session: &Session, pending: divine_client::PendingReply) {
    let session = session.clone();
    tokio::spawn(async move {
        if let Some(reply) = pending.reply().await {
            let name = session
                .get_match(reply.match_id)
                .map(|m| m.profile.name)
                .unwrap_or_default();
            println!("{name}: {}", reply.text);
        }
    });
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    divine_client::init_tracing();

    let config = SessionConfig::from_env();
    info!(
        model = %config.model,
        online = config.api_key.is_some(),
        settle_ms = config.settle_delay.as_millis() as u64,
        "Starting Divine v{}",
        env!("CARGO_PKG_VERSION")
    );

    let mut builder = Session::builder(config.clone()).alerts(Arc::new(TerminalAlerts));
    if let Some(gemini) = config.gemini() {
        let client = Arc::new(GeminiClient::new(gemini).context("building Gemini client")?);
        builder = builder.supply(client.clone()).responder(client);
    }
    let session = builder.build();

    spawn_event_printer(&session);
    session.replenish().await;
    println!("{HELP}");
    show_card(&session);

    let mut open: Option<MatchId> = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            Command::Like => report_outcome(&session, session.swipe(Direction::Accept).await),
            Command::Nope => report_outcome(&session, session.swipe(Direction::Reject).await),
            Command::Drag(dx) => {
                if !session.start_gesture() {
                    println!("(no card to drag)");
                    continue;
                }
                if let Some(pose) = session.drag_to(dx) {
                    println!("{}", serde_json::to_string(&pose)?);
                }
                report_outcome(&session, session.end_gesture().await);
            }
            Command::Undo => match session.undo() {
                Some(undone) => {
                    println!("undid {}", undone.profile.name);
                    if open.is_some_and(|id| undone.match_id == Some(id)) {
                        open = None;
                    }
                    show_card(&session);
                }
                None => println!("(nothing to undo)"),
            },
            Command::Refresh => {
                let added = session.refresh().await;
                println!("{added} new profiles");
                show_card(&session);
            }
            Command::Matches => {
                let summaries = session.match_summaries();
                if summaries.is_empty() {
                    println!("No matches yet.");
                }
                for (i, m) in summaries.iter().enumerate() {
                    let unread = if m.unread_count > 0 {
                        format!(" ({} unread)", m.unread_count)
                    } else {
                        String::new()
                    };
                    println!(
                        "{}. {}{} - {}",
                        i + 1,
                        m.name,
                        unread,
                        m.last_message.as_deref().unwrap_or("Say hello!")
                    );
                }
                println!("total unread: {}", session.total_unread());
            }
            Command::Open(n) => {
                let Some(m) = session.matches().into_iter().nth(n - 1) else {
                    println!("no match #{n}");
                    continue;
                };
                session.open_conversation(m.id);
                open = Some(m.id);
                println!("-- {} --", m.profile.name);
                for msg in session.conversation(m.id).unwrap_or_default() {
                    let who = if msg.sender.is_session_user() {
                        "you"
                    } else {
                        m.profile.name.as_str()
                    };
                    println!("{who}: {}", msg.text);
                }
            }
            Command::Close => {
                session.close_conversation();
                open = None;
            }
            Command::Send(text) => {
                let Some(match_id) = open else {
                    println!("open a conversation first");
                    continue;
                };
                match session.send_message(match_id, &text) {
                    Ok(pending) => spawn_reply_printer(&session, pending),
                    Err(e) => println!("not sent: {e}"),
                }
            }
            Command::Report(reason) => match session.current_profile() {
                Some(p) => {
                    session.report_profile(p.id, reason, None);
                    println!("reported {} ({reason})", p.name);
                }
                None => println!("(no card to report)"),
            },
            Command::Hide => session.set_app_visible(false),
            Command::Show => session.set_app_visible(true),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    info!("Session ended");
    Ok(())
}
