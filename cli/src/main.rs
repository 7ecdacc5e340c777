mod audio;
mod live_client;
mod replay;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use warden_core::context::{
    AppConfig, AppConfigExt, ConfigFileSettings, SettingsRepository, StaticSettings,
};
use warden_core::cues::{
    CueEvent, CueRepository, CueService, CueTrigger, NewCue, TomlCueRepository,
};
use warden_core::events::SubscriptionId;
use warden_core::polling::TickOutcome;
use warden_core::ports::AudioPlayer;
use warden_core::{
    AudioRef, CueDispatcher, CuePlaybackQueue, EventBus, MatchEvent, MatchEventKind, Objective,
    PollingService, PollingStateMachine,
};
use warden_types::formatting::{format_countdown, format_game_time};

use crate::live_client::LiveClient;
use crate::replay::ReplayClient;

#[cfg(feature = "rodio")]
type Player = audio::RodioPlayer;
#[cfg(not(feature = "rodio"))]
type Player = audio::LogPlayer;

/// Objective timers are logged every this many game seconds.
const STATUS_EVERY_SECS: u32 = 60;

#[derive(Parser)]
#[command(version, about = "Objective timers and spoken cues for live matches")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the local live client until interrupted
    Watch,
    /// Feed a recorded session (JSON lines) through the pipeline
    Replay {
        #[arg(short, long)]
        file: PathBuf,
        /// Delay between replayed polls
        #[arg(long, default_value_t = 0)]
        interval_ms: u64,
    },
    /// Manage configured cues
    Cues {
        #[command(subcommand)]
        command: CueCommand,
    },
    /// Show settings, optionally changing the cue volume
    Config {
        /// New volume, 0-100
        #[arg(long)]
        volume: Option<u8>,
        #[arg(long)]
        mute: bool,
        #[arg(long, conflicts_with = "mute")]
        unmute: bool,
    },
}

#[derive(Subcommand)]
enum CueCommand {
    /// Print cues and reminders
    List,
    /// Add a cue using a pre-recorded audio file
    Add {
        #[arg(short, long)]
        text: String,
        #[arg(short, long)]
        audio: PathBuf,
        #[command(flatten)]
        trigger: TriggerArgs,
    },
    /// Delete a cue by id
    Remove {
        #[arg(short, long)]
        id: String,
    },
}

/// Exactly one of `every`, `at`, `event` or `objective` selects the trigger.
#[derive(clap::Args)]
struct TriggerArgs {
    /// Repeat every N game seconds
    #[arg(long)]
    every: Option<u32>,
    /// Fire once at this game second
    #[arg(long)]
    at: Option<u32>,
    /// Fire on a game event ("respawn", "cannon-wave")
    #[arg(long)]
    event: Option<String>,
    /// Fire before an objective spawns ("dragon", "baron", ...)
    #[arg(long)]
    objective: Option<String>,
    /// Lead time in seconds for --objective
    #[arg(long, default_value_t = 30)]
    before: u32,
}

impl TriggerArgs {
    fn into_trigger(self) -> Result<CueTrigger, String> {
        let given = [
            self.every.is_some(),
            self.at.is_some(),
            self.event.is_some(),
            self.objective.is_some(),
        ];
        if given.iter().filter(|g| **g).count() != 1 {
            return Err("Give exactly one of --every, --at, --event, --objective".to_string());
        }

        if let Some(interval) = self.every {
            return Ok(CueTrigger::Interval { interval });
        }
        if let Some(trigger_at) = self.at {
            return Ok(CueTrigger::OneTime { trigger_at });
        }
        if let Some(event) = self.event {
            return Ok(CueTrigger::Event {
                event: CueEvent::from(event),
            });
        }
        if let Some(name) = self.objective {
            let objective = Objective::ALL
                .into_iter()
                .find(|o| o.name() == name)
                .ok_or_else(|| format!("Unknown objective {name:?}"))?;
            return Ok(CueTrigger::Objective {
                objective,
                seconds_before_objective: self.before,
            });
        }
        Err("No trigger given".to_string())
    }
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    // If WARDEN_LOG_PATH is set, append to that file
    if let Ok(path) = std::env::var("WARDEN_LOG_PATH")
        && let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
    {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(file)
            .init();
        return;
    }

    // Fallback to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_logging();

    let cli = Cli::parse();
    let mut config = AppConfig::load();

    match cli.command {
        Commands::Watch => watch(&config).await,
        Commands::Replay { file, interval_ms } => replay(&config, &file, interval_ms).await,
        Commands::Cues { command } => cues(&config, command).await,
        Commands::Config {
            volume,
            mute,
            unmute,
        } => {
            if volume.is_some() || mute || unmute {
                if let Some(volume) = volume {
                    config.audio.volume = volume.min(100);
                }
                if mute || unmute {
                    config.audio.enabled = unmute;
                }
                config.save().map_err(|e| e.to_string())?;
            }
            show_config(&config);
            Ok(())
        }
    }
}

fn show_config(config: &AppConfig) {
    println!("Live client:    {}", config.polling.live_client_url);
    println!("Poll interval:  {} ms", config.poll_interval().as_millis());
    match config.port_timeout() {
        Some(timeout) => println!("Poll timeout:   {} ms", timeout.as_millis()),
        None => println!("Poll timeout:   none"),
    }
    println!(
        "Audio:          {} (volume {})",
        if config.audio.enabled { "on" } else { "muted" },
        config.audio.volume
    );
    println!("Cues file:      {}", config.cues_path().display());
    println!("Reminders file: {}", config.reminders_path().display());
}

async fn watch(config: &AppConfig) -> Result<(), String> {
    let client = LiveClient::new(&config.polling.live_client_url, config.port_timeout())?;
    let bus = Arc::new(EventBus::new());
    let queue = CuePlaybackQueue::new(Player::default(), ConfigFileSettings);
    let _dispatcher = attach_cues(config, &bus, queue.clone());
    let _status = log_status(&bus);

    let machine =
        PollingStateMachine::new(client, Arc::clone(&bus)).with_port_timeout(config.port_timeout());
    let mut service = PollingService::new(machine, config.poll_interval());
    service.start().map_err(|e| e.to_string())?;
    info!(url = %config.polling.live_client_url, "Watching for matches (Ctrl+C to stop)");

    tokio::signal::ctrl_c().await.map_err(|e| e.to_string())?;
    service.stop().await;
    queue.wait_idle().await;
    Ok(())
}

async fn replay(config: &AppConfig, file: &std::path::Path, interval_ms: u64) -> Result<(), String> {
    let client = ReplayClient::from_file(file)?;
    let bus = Arc::new(EventBus::new());
    let queue = CuePlaybackQueue::new(Player::default(), StaticSettings(config.audio.clone()));
    let _dispatcher = attach_cues(config, &bus, queue.clone());
    let _status = log_status(&bus);

    info!(file = %file.display(), polls = client.remaining(), "Replaying");
    run_to_end(PollingStateMachine::new(client.clone(), bus), &client, interval_ms).await;
    queue.wait_idle().await;
    Ok(())
}

/// Tick until the recording is exhausted, then close any open session.
async fn run_to_end(
    mut machine: PollingStateMachine<ReplayClient>,
    client: &ReplayClient,
    interval_ms: u64,
) {
    let mut matches = 0;
    while client.remaining() > 0 {
        if machine.tick().await == TickOutcome::Started {
            matches += 1;
        }
        if interval_ms > 0 {
            tokio::time::sleep(Duration::from_millis(interval_ms)).await;
        }
    }
    machine.stop();
    info!(matches, "Replay finished");
}

fn attach_cues<A, S>(
    config: &AppConfig,
    bus: &Arc<EventBus>,
    queue: CuePlaybackQueue<A, S>,
) -> CueDispatcher
where
    A: AudioPlayer,
    S: SettingsRepository,
{
    let cues = TomlCueRepository::new(config.cues_path());
    let reminders = TomlCueRepository::new(config.reminders_path());
    info!(
        cues = %cues.path().display(),
        reminders = %reminders.path().display(),
        "Loading cues"
    );
    CueDispatcher::attach(Arc::clone(bus), cues, reminders, queue)
}

/// Log a one-line objective summary every [`STATUS_EVERY_SECS`].
fn log_status(bus: &Arc<EventBus>) -> StatusLogger {
    let id = bus.subscribe(MatchEventKind::GameTick, |event| {
        let MatchEvent::GameTick { state } = event else {
            return;
        };
        if !state.game_time.is_multiple_of(STATUS_EVERY_SECS) {
            return;
        }
        let timers: Vec<String> = state
            .objectives
            .iter()
            .filter_map(|(objective, timer)| {
                if timer.is_alive {
                    Some(format!("{objective} up"))
                } else {
                    timer.next_spawn.map(|at| {
                        format!("{objective} {}", format_countdown(at, state.game_time, "up"))
                    })
                }
            })
            .collect();
        info!(
            clock = %format_game_time(state.game_time),
            objectives = %timers.join(", "),
            "Status"
        );
    });
    StatusLogger {
        bus: Arc::clone(bus),
        id,
    }
}

struct StatusLogger {
    bus: Arc<EventBus>,
    id: SubscriptionId,
}

impl Drop for StatusLogger {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.id);
    }
}

async fn cues(config: &AppConfig, command: CueCommand) -> Result<(), String> {
    let cues = TomlCueRepository::new(config.cues_path());
    match command {
        CueCommand::Add {
            text,
            audio: audio_file,
            trigger,
        } => {
            let service = CueService::new(cues, audio::Prerecorded::new(AudioRef::new(audio_file)));
            let cue = service
                .create(NewCue {
                    text,
                    trigger: trigger.into_trigger()?,
                })
                .await
                .map_err(|e| e.to_string())?;
            println!("Added {} ({})", cue.id, cue.trigger);
            Ok(())
        }
        CueCommand::List => {
            let reminders = TomlCueRepository::new(config.reminders_path());
            for (label, repo) in [("Cues", &cues), ("Reminders", &reminders)] {
                let all = repo.all().map_err(|e| e.to_string())?;
                println!("{label} ({}):", repo.path().display());
                if all.is_empty() {
                    println!("  (none)");
                }
                for cue in all {
                    println!("  {:<8} {:<28} {}", cue.id, cue.trigger.to_string(), cue.text);
                }
            }
            Ok(())
        }
        CueCommand::Remove { id } => {
            let service = CueService::new(cues, audio::Prerecorded::default());
            service.delete(&id).map_err(|e| e.to_string())?;
            println!("Removed {id}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trigger_args(args: &[&str]) -> Result<CueTrigger, String> {
        let mut argv = vec!["warden", "cues", "add", "--text", "t", "--audio", "a.wav"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).map_err(|e| e.to_string())?;
        match cli.command {
            Commands::Cues {
                command: CueCommand::Add { trigger, .. },
            } => trigger.into_trigger(),
            _ => Err("wrong command".to_string()),
        }
    }

    #[test]
    fn test_trigger_flags() {
        assert_eq!(
            trigger_args(&["--every", "90"]),
            Ok(CueTrigger::Interval { interval: 90 })
        );
        assert_eq!(
            trigger_args(&["--objective", "baron", "--before", "45"]),
            Ok(CueTrigger::Objective {
                objective: Objective::Baron,
                seconds_before_objective: 45
            })
        );
        assert_eq!(
            trigger_args(&["--event", "respawn"]),
            Ok(CueTrigger::Event {
                event: CueEvent::Respawn
            })
        );
        assert!(trigger_args(&[]).is_err());
        assert!(trigger_args(&["--every", "90", "--at", "30"]).is_err());
        assert!(trigger_args(&["--objective", "nexus"]).is_err());
    }
}
