//! Baize headless driver
//!
//! Builds a table (default layout, or a JSON config given as the first
//! argument), racks the balls, plays the opening shot and runs fixed ticks
//! until everything is at rest. Prints the final table state as JSON.
//!
//! Model flags override the config: `--rail-bounce`, `--rail-contact`,
//! `--ball-contact`, `--pockets`.

use baize::rack::{self, CUE};
use baize::sim::TickEvent;
use baize::{BallContact, Error, PocketPlacement, RailBounce, RailContact, Table, TableConfig};

/// Upper bound on ticks for one run (10 minutes at 60 ticks per second)
const MAX_TICKS: u64 = 60 * 60 * 10;

fn model<T>(flag: &str, value: Option<String>, parse: fn(&str) -> Option<T>) -> baize::Result<T> {
    let value = value.ok_or_else(|| Error::InvalidConfig(format!("{flag} needs a value")))?;
    parse(&value).ok_or_else(|| Error::InvalidConfig(format!("unknown {flag} model '{value}'")))
}

fn parse_args(mut args: impl Iterator<Item = String>) -> baize::Result<TableConfig> {
    let mut config = None;
    let mut overrides = Vec::new();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--rail-bounce" | "--rail-contact" | "--ball-contact" | "--pockets" => {
                overrides.push((arg, args.next()));
            }
            _ if config.is_none() => config = Some(TableConfig::load(&arg)?),
            _ => return Err(Error::InvalidConfig(format!("unexpected argument '{arg}'"))),
        }
    }

    let mut config = config.unwrap_or_default();
    for (flag, value) in overrides {
        config = match flag.as_str() {
            "--rail-bounce" => config.with_rail_bounce(model(&flag, value, RailBounce::parse)?),
            "--rail-contact" => config.with_rail_contact(model(&flag, value, RailContact::parse)?),
            "--ball-contact" => config.with_ball_contact(model(&flag, value, BallContact::parse)?),
            _ => config.with_pocket_placement(model(&flag, value, PocketPlacement::parse)?),
        };
    }
    Ok(config)
}

fn run() -> baize::Result<()> {
    let config = parse_args(std::env::args().skip(1))?;
    log::info!(
        "Pockets: {}, rail bounce: {}, rail contact: {}, ball contact: {}, friction: {}",
        config.pocket_placement.as_str(),
        config.rail_bounce.as_str(),
        config.rail_contact.as_str(),
        config.ball_contact.as_str(),
        config.friction
    );

    let mut table = Table::build(config.clone())?;
    table.add_bodies(rack::standard_rack(&config))?;
    if let Some(cue) = table.find(CUE) {
        table.shoot(cue, rack::opening_shot())?;
    }

    let mut pocketed = 0usize;
    while table.any_moving() {
        if table.ticks() >= MAX_TICKS {
            log::warn!("Stopping after {MAX_TICKS} ticks with balls still rolling");
            break;
        }
        for event in table.step() {
            if let TickEvent::Pocketed { body, .. } = event {
                pocketed += 1;
                if let Some(ball) = table.body(body) {
                    log::info!("Tick {}: {} down", table.ticks(), ball.label);
                }
            }
        }
    }
    log::info!(
        "Settled after {} ticks, {} ball(s) pocketed",
        table.ticks(),
        pocketed
    );

    let json = serde_json::to_string_pretty(table.bodies())?;
    println!("{json}");
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Baize (native) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("baize: {e}");
        std::process::exit(1);
    }
}
