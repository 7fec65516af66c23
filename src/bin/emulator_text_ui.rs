use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossbeam_channel::{bounded, Receiver, Sender};
use cursive::{view::Nameable, CbSink};
use log::{error, info, warn};
use ux::u4;

use chip8_interpreter::chip::{
    chip8::cursive_display::{Display, DISPLAY_VIEW_NAME},
    chip8::Chip8, chip8::Chip8Config,
    chip8::CHIP8_TICKS_PER_FRAME, Chip, ChipWithCursiveDisplay,
};

/// Terminal front end of the CHIP-8 interpreter.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Path to the program
    rom: PathBuf,

    /// Frames per second
    #[arg(long, default_value_t = 60)]
    fps: u64,

    /// Instructions executed per frame
    #[arg(short, long, default_value_t = CHIP8_TICKS_PER_FRAME)]
    instructions_per_tick: usize,
}

/// Represents an event to be processed by the event loop. It is generic
/// over the type representing the pressed key.
enum Event<T> {
    /// Occurs when the key passed in the enum value was pressed.
    Key(T),

    /// Indicates that all keys are released. Terminals do not report key
    /// releases, so one key is assigned to release all keys.
    KeyRelease,

    TogglePause,

    /// Reloads the program and starts over.
    Reset,

    /// Shortens the frame period.
    SpeedUp,

    /// Lengthens the frame period.
    SlowDown,

    /// Shut down.
    Quit,
}

/// Represents the channels available to the event loop. It is generic
/// over the type representing the pressed keys.
#[derive(Clone)]
struct EventLoopChannels<T> {
    /// The channel to send the UI refresh messages to.
    gfx_sender: CbSink,

    /// The channel on which the Events are received.
    key_receiver: Receiver<Event<T>>,

    /// A channel to report that the thread has completed
    /// shutdown.
    shutdown_sender: Sender<()>,
}

const FRAME_PERIOD_STEP: Duration = Duration::from_millis(2);
const MIN_FRAME_PERIOD: Duration = Duration::from_millis(1);

/// The event loop. Constantly loops over (1) process pending events,
/// (2) run one tick of the chip, (3) update the UI, (4) sleep for the
/// frame period, (5) start over.
fn event_loop<T, P>(mut chip: T, io_channels: EventLoopChannels<P>, mut frame_period: Duration)
where
    T: Chip<KeyAddress = P> + ChipWithCursiveDisplay,
{
    loop {
        while let Ok(event) = io_channels.key_receiver.try_recv() {
            match event {
                Event::Key(key) => chip.set_key(key, true),
                Event::KeyRelease => chip.release_keys(),
                Event::TogglePause => chip.toggle(),
                Event::Reset => match chip.reset() {
                    Ok(_) => chip.resume(),
                    Err(e) => error!("Reset failed: {}", e),
                },
                Event::SpeedUp => {
                    frame_period = frame_period
                        .saturating_sub(FRAME_PERIOD_STEP)
                        .max(MIN_FRAME_PERIOD);
                    info!("Frame period {:?}", frame_period);
                }
                Event::SlowDown => {
                    frame_period += FRAME_PERIOD_STEP;
                    info!("Frame period {:?}", frame_period);
                }
                Event::Quit => {
                    if io_channels.shutdown_sender.send(()).is_err() {
                        warn!("Nobody waits for the shutdown");
                    }
                    return;
                }
            }
        }

        chip.tick();
        chip.update_ui(&io_channels.gfx_sender);

        std::thread::sleep(frame_period);
    }
}

fn forward<T>(sender: &Sender<Event<T>>, event: Event<T>) {
    if sender.send(event).is_err() {
        warn!("Event loop is gone, dropping event");
    }
}

/// Constructs the UI and spawns the event loop and the UI thread.
fn main() {
    let args = Args::parse();

    cursive::logger::init();
    log::set_max_level(log::LevelFilter::Info);

    let mut chip8 = Chip8::with_config(Chip8Config {
        instructions_per_tick: args.instructions_per_tick,
    });
    if let Err(e) = chip8.load_program(&args.rom) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    chip8.resume();

    let mut siv = cursive::default();

    let cb_sink = siv.cb_sink().clone();
    let (key_sender, key_receiver) = bounded::<Event<u4>>(10);
    let (shutdown_sender, shutdown_receiver) = bounded::<()>(1);
    let frame_period = Duration::from_millis(1000 / args.fps.max(1));

    std::thread::spawn(move || {
        event_loop(
            chip8,
            EventLoopChannels {
                gfx_sender: cb_sink,
                key_receiver,
                shutdown_sender,
            },
            frame_period,
        );
    });

    let sender = key_sender.clone();
    siv.add_global_callback(cursive::event::Key::Esc, move |s| {
        forward(&sender, Event::Quit);
        if shutdown_receiver.recv().is_err() {
            warn!("Event loop ended without shutdown notice");
        }
        s.quit();
    });

    for (i, j) in &[
        ('x', 0x0),
        ('1', 0x1),
        ('2', 0x2),
        ('3', 0x3),
        ('q', 0x4),
        ('w', 0x5),
        ('e', 0x6),
        ('a', 0x7),
        ('s', 0x8),
        ('d', 0x9),
        ('z', 0xA),
        ('c', 0xB),
        ('4', 0xC),
        ('r', 0xD),
        ('f', 0xE),
        ('v', 0xF),
    ] {
        let sender = key_sender.clone();
        let key = u4::new(*j);
        siv.add_global_callback(*i, move |_s| forward(&sender, Event::Key(key)));
    }

    let sender = key_sender.clone();
    siv.add_global_callback(' ', move |_s| forward(&sender, Event::KeyRelease));

    let sender = key_sender.clone();
    siv.add_global_callback('p', move |_s| forward(&sender, Event::TogglePause));

    let sender = key_sender.clone();
    siv.add_global_callback(cursive::event::Key::Backspace, move |_s| {
        forward(&sender, Event::Reset)
    });

    let sender = key_sender.clone();
    siv.add_global_callback(cursive::event::Key::Up, move |_s| {
        forward(&sender, Event::SpeedUp)
    });

    let sender = key_sender;
    siv.add_global_callback(cursive::event::Key::Down, move |_s| {
        forward(&sender, Event::SlowDown)
    });

    siv.add_global_callback('`', |s| s.toggle_debug_console());

    siv.add_layer(Display::default().with_name(DISPLAY_VIEW_NAME));

    siv.run();
}
