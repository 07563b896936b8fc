use std::fs::File;
use std::io::{stdout, BufWriter};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use sky_shooter::display::{is_quit, Expiry, KeyTracker, TerminalHost};
use sky_shooter::driver::CancelHandle;
use sky_shooter::input::InputSender;
use sky_shooter::{GameConfig, GameError, GameLoop};

/// How long the input thread waits for an event before checking for
/// expired keys and cancellation.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Key expiry for terminals that never report releases. A fresh press may
/// stay silent until the OS starts auto-repeating (typically 250–660 ms);
/// once repeating (≥ 15 Hz) a shorter silence means the key was let go.
const CLASSIC_EXPIRY: Expiry = Expiry {
    repeat_delay: Duration::from_millis(700),
    repeat_window: Duration::from_millis(130),
};

const LOG_ENV: &str = "SKY_SHOOTER_LOG";

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw/alternate-screen mode, so log records go to a
/// file, and only when `RUST_LOG` asks for them.
fn init_logging() -> Result<(), GameError> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let path = std::env::var(LOG_ENV).unwrap_or_else(|_| "sky_shooter.log".to_string());
    let file = File::create(path)?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Input thread ──────────────────────────────────────────────────────────────

/// Read terminal events until quit or cancellation, forwarding bound keys
/// to the frame loop's input queue.
fn pump_input(sender: InputSender, cancel: CancelHandle, keyboard_enhanced: bool) {
    let mut tracker = if keyboard_enhanced {
        KeyTracker::with_releases()
    } else {
        KeyTracker::with_expiry(CLASSIC_EXPIRY)
    };

    while !cancel.is_cancelled() {
        match event::poll(POLL_INTERVAL) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) => {
                    if is_quit(&key) {
                        log::info!("Quit requested");
                        cancel.cancel();
                        break;
                    }
                    if let Some(input) = tracker.translate(&key, Instant::now()) {
                        if !sender.send(input) {
                            break; // receiver dropped → program exiting
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    log::error!("Terminal input failed: {e}");
                    cancel.cancel();
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                log::error!("Terminal poll failed: {e}");
                cancel.cancel();
                break;
            }
        }

        for input in tracker.expire(Instant::now()) {
            if !sender.send(input) {
                return;
            }
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    init_logging()?;
    let config = GameConfig::from_env()?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to key expiry.
    let keyboard_enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

    let result = run(&mut out, config, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run(
    out: &mut BufWriter<std::io::Stdout>,
    config: GameConfig,
    keyboard_enhanced: bool,
) -> Result<(), GameError> {
    let size = terminal::size()?;
    let world = (config.screen_width, config.screen_height);
    let frame_budget = Duration::from_millis(config.frame_millis);
    log::info!(
        "Terminal {}x{}, world {}x{}, keyboard enhancement: {}",
        size.0,
        size.1,
        world.0,
        world.1,
        keyboard_enhanced
    );

    let mut game = GameLoop::new(config);

    // Dedicate a thread to terminal reads so the frame loop never blocks on I/O.
    let sender = game.input_sender();
    let cancel = game.cancel_handle();
    let input = thread::spawn(move || pump_input(sender, cancel, keyboard_enhanced));

    let mut host = TerminalHost::new(out, size, world, frame_budget).follow_terminal_size();
    let result = game.run(&mut host);

    game.cancel_handle().cancel();
    let _ = input.join();
    result.map_err(GameError::from)
}
