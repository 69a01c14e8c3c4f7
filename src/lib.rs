//! Exact outcome-probability engine for the Pickomino (Heckmeck)
//! press-your-luck dice game.
//!
//! Given a partial position (banked dice plus a count of dice still to
//! throw), the engine walks the full decision tree and produces, for
//! every achievable final total, the probability of landing exactly on
//! it, the probability of reaching at least it, and the conditional
//! expectation given reaching at least it. Work is performed in
//! resumable single steps so a driver can time-slice, report progress,
//! and share a memo cache across positions.

pub mod dice;
pub mod evaluation;
pub mod save;
pub mod search;

/// Probability mass assigned to a final total.
pub type Probability = f64;
/// Expected values over final totals.
pub type Utility = f64;
/// A final turn total: sum of banked pip values, Worm counting 5.
pub type Total = u16;

/// Dice in the Pickomino pool; a fresh turn throws all of them.
pub const N_DICE: usize = 8;
/// Distinct die faces: 1 through 5 plus the Worm.
pub const N_FACES: usize = 6;
/// Pip value of the wild Worm face.
pub const WORM_VALUE: Total = 5;
/// Fixed-point scale for rounded wire payloads.
pub const WIRE_SCALE: i64 = 1000;
/// Escape sentinel standing in for a full 1.0 mass on the wire.
pub const WIRE_ONE: i64 = -1;

/// Random instance generation for testing and Monte Carlo sampling.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

/// Initialize terminal logging for drivers and tests.
pub fn log() {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        log::LevelFilter::Debug,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .ok();
}
