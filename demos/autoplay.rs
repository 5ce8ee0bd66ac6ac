//! Watch the agent walk a preset maze in the terminal.
//!
//! Usage: `autoplay [MAP_INDEX] [--fog]`. Set `RUST_LOG=debug` for engine
//! logs on stderr.

use std::io::{self, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use crossterm::{
    cursor, execute,
    terminal::{self, ClearType},
};

use mazewalk_map::presets;
use mazewalk_session::{AutoPlay, Session, SessionConfig, render::render};

fn draw(out: &mut impl Write, frame: &str) -> io::Result<()> {
    execute!(out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    out.write_all(frame.as_bytes())?;
    out.flush()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut map = 0;
    let mut fog = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--fog" => fog = true,
            s => map = s.parse()?,
        }
    }

    let config = SessionConfig {
        fog_enabled: fog,
        ..SessionConfig::default()
    };
    let mut session = Session::new(config, presets::all())?;
    session.select_map(map)?;

    let (tx, rx) = mpsc::channel();
    let mut auto = AutoPlay::new(session).with_reports(tx);
    let mut stdout = io::stdout();
    draw(&mut stdout, &render(&*auto.lock()?))?;

    if !auto.start()? {
        log::error!("no path from start to exit");
        return Ok(());
    }
    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(report) => {
                draw(&mut stdout, &render(&*auto.lock()?))?;
                if report.is_last() {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) if auto.is_running() => {}
            Err(_) => break,
        }
    }
    auto.wait();
    draw(&mut stdout, &render(&*auto.lock()?))?;
    Ok(())
}
