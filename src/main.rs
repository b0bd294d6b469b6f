//! Terminal front end: plays a script file as a live, controllable animation.

use clap::Parser;
use convo_sim::config::DesignConfig;
use convo_sim::playback::{PlaybackState, SPEED_PRESETS};
use convo_sim::script::Script;
use convo_sim::{render, ConversationPlayer};
use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "convo-sim")]
#[command(about = "Plays a scripted two-party conversation as a timed animation")]
struct Cli {
    /// Script JSON file; the built-in sample plays when omitted.
    script: Option<PathBuf>,

    /// Playback speed multiplier.
    #[arg(short, long, default_value_t = 1.0)]
    speed: f64,

    /// Disable the simulated typing phase.
    #[arg(long)]
    no_typing: bool,

    /// Print the full transcript immediately instead of animating.
    #[arg(long)]
    transcript: bool,
}

/// A control command typed on stdin.
enum Command {
    Toggle,
    Reset,
    Seek(usize),
    Speed(f64),
    Quit,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let script = match &cli.script {
        Some(path) => Script::load(path)?,
        None => Script::sample(),
    };

    let mut design = DesignConfig::load();
    if cli.no_typing {
        design.show_typing = false;
    }

    let mut playback = PlaybackState::default();
    playback.set_speed(cli.speed)?;

    if cli.transcript {
        print_transcript(&script, &design, &playback);
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(run(script, design, playback));
    Ok(())
}

/// Drain the whole timeline by jumping the pump clock to each deadline.
fn print_transcript(script: &Script, design: &DesignConfig, playback: &PlaybackState) {
    let mut playback = playback.clone();
    playback.play();

    let mut player = ConversationPlayer::new();
    player.sync(script, &playback, design, Instant::now());

    while let Some(deadline) = player.next_deadline() {
        player.tick(deadline);
    }

    println!("== {} ==", script.title);
    println!("{}", render::transcript(player.displayed_messages()));
}

async fn run(script: Script, design: DesignConfig, mut playback: PlaybackState) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || read_commands(tx));

    println!("== {} ==", script.title);
    println!(
        "(p = play/pause, r = reset, s <n> = seek, x <mult> = speed {SPEED_PRESETS:?}, q = quit)"
    );

    playback.play();

    let mut player = ConversationPlayer::new();
    player.sync(&script, &playback, &design, Instant::now());

    let mut shown = 0usize;
    let mut was_typing = false;

    loop {
        let deadline = player.next_deadline();
        tokio::select! {
            _ = sleep_to(deadline) => {
                player.tick(Instant::now());
                // Keep the owned index at the revealed count so a later seek
                // (including reset to 0) is observable to the player.
                playback.seek(player.cursor());
            }
            cmd = rx.recv() => {
                let Some(cmd) = cmd else { break };
                match cmd {
                    Command::Toggle => playback.toggle(),
                    Command::Reset => playback.reset(),
                    Command::Seek(index) => playback.seek(index),
                    Command::Speed(mult) => {
                        if let Err(e) = playback.set_speed(mult) {
                            eprintln!("{e}");
                        }
                    }
                    Command::Quit => break,
                }
                player.sync(&script, &playback, &design, Instant::now());
            }
        }

        let displayed = player.displayed_messages();
        if displayed.len() < shown {
            println!("--- rewound to {} message(s) ---", displayed.len());
            shown = displayed.len();
        }
        for message in &displayed[shown..] {
            println!("{}", render::format_message(message));
        }
        shown = displayed.len();

        let typing_now = player.is_typing();
        if typing_now && !was_typing {
            if let Some(sender) = player.typing_sender() {
                println!("{}", render::format_typing(sender));
            }
        }
        was_typing = typing_now;

        if shown == script.messages.len() && !player.has_pending_timers() {
            break;
        }
    }
}

/// Sleep until the deadline, or forever when playback is idle.
async fn sleep_to(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => std::future::pending::<()>().await,
    }
}

/// Blocking stdin reader on a helper thread; parsed commands go over the
/// channel to the playback loop.
fn read_commands(tx: mpsc::UnboundedSender<Command>) {
    for line in std::io::stdin().lines() {
        let Ok(line) = line else { break };
        let Some(cmd) = parse_command(line.trim()) else {
            eprintln!("unrecognized command: {line}");
            continue;
        };
        if tx.send(cmd).is_err() {
            break;
        }
    }
}

fn parse_command(line: &str) -> Option<Command> {
    if line.is_empty() {
        return Some(Command::Toggle);
    }
    let mut parts = line.split_whitespace();
    match parts.next()? {
        "p" => Some(Command::Toggle),
        "r" => Some(Command::Reset),
        "q" => Some(Command::Quit),
        "s" => parts.next()?.parse().ok().map(Command::Seek),
        "x" => parts.next()?.parse().ok().map(Command::Speed),
        _ => None,
    }
}
