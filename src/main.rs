//! Bounce Words headless driver
//!
//! Plays matches with a simple bot against the built-in word list and logs
//! what happens. Usage: `bounce-words [settings.json] [seed] [rounds]`.

use anyhow::{Context, Result};

use bounce_words::Settings;
use bounce_words::sim::{GamePhase, Session, TickInput, tick};
use bounce_words::words::{ValidationCache, WordListOracle};

const FRAME_DT: f32 = 1.0 / 60.0;
/// Frames between bot decisions
const THINK_FRAMES: u32 = 30;

/// Words the bot knows how to spell
const BOT_WORDS: &[&str] = &[
    "TREE", "TEAR", "RATE", "NOTE", "TONE", "SEAT", "EAST", "REST", "NEAR", "EARN", "RAIN",
    "TIME", "LINE", "NINE", "SITE", "TIDE", "RIDE", "ROSE", "SORT", "STAR", "RISE", "SEED",
    "SAND", "HAND", "LAND", "LEAD", "HEAT", "HATE", "HEAR", "HERO", "STONE", "SNOW",
];

/// Tile ids on the field that spell `word`, one tile per letter
fn find_tiles(session: &Session, word: &str) -> Option<Vec<u32>> {
    let mut used = Vec::new();
    for letter in word.chars() {
        let tile = session
            .tiles
            .iter()
            .find(|t| t.letter == letter && !used.contains(&t.id()))?;
        used.push(tile.id());
    }
    Some(used)
}

async fn play_round(
    session: &mut Session,
    oracle: &WordListOracle,
    cache: &ValidationCache,
) {
    let input = TickInput::default();
    let mut frame = 0u32;

    while session.phase == GamePhase::Running {
        tick(session, &input, FRAME_DT);
        frame += 1;

        if let Some(ticket) = session.take_validation_request() {
            let outcome = ticket.run(oracle, cache).await;
            session.apply_validation(outcome);
        }

        if frame % THINK_FRAMES != 0 || !session.accepts_actions() {
            continue;
        }

        if session.power_up.is_some() && frame % (THINK_FRAMES * 4) == 0 {
            session.activate_power_up();
            continue;
        }

        if !session.tray.is_empty() {
            session.clear();
        }
        if !session.tray.is_empty() {
            // Locked leftovers; keep building on them next time
            continue;
        }

        let Some(ids) = BOT_WORDS.iter().find_map(|w| find_tiles(session, w)) else {
            continue;
        };
        for id in ids {
            session.collect(id);
        }
        session.validate_now(oracle, cache).await;
        match session.submit_word(oracle, cache).await {
            Ok(Some(word)) => println!("  {} +{}", word.word, word.points),
            Ok(None) => log::debug!("Bot word rejected: {}", session.status),
            Err(e) => log::debug!("Bot could not submit: {}", e),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();
    log::info!("Bounce Words (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading settings from {}", path))?;
            Settings::from_json(&json).with_context(|| format!("parsing settings in {}", path))?
        }
        None => Settings::default(),
    };
    let seed = match args.next() {
        Some(seed) => seed.parse::<u64>().context("seed must be an unsigned integer")?,
        None => 42,
    };
    let max_rounds = match args.next() {
        Some(rounds) => rounds.parse::<u32>().context("rounds must be a positive integer")?,
        None => 3,
    };

    log::info!(
        "Preset {}, language {}, seed {}",
        settings.preset().as_str(),
        settings.language.as_str(),
        seed
    );

    let oracle = WordListOracle::builtin();
    let cache = ValidationCache::new();
    let mut session = Session::new(settings, seed);

    loop {
        println!("Round {} (goal {})", session.round, session.goal);
        play_round(&mut session, &oracle, &cache).await;
        println!("{}", session.status);

        if session.phase != GamePhase::BetweenRounds || session.round >= max_rounds {
            break;
        }
        session.start_next_round();
    }

    println!(
        "Final score {} after {} round(s); {} cached lookups",
        session.score,
        session.round,
        cache.len()
    );
    Ok(())
}
