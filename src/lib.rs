// Numerology Engine - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod error;
pub mod reduction;      // Digit-sum + letter table primitives
pub mod birth_date;     // Two-format parser + validation pre-check
pub mod chart;          // Chart assembly
pub mod detection;      // Rebirth / legacy / great love
pub mod interpretation; // Number → text tables
pub mod config;
pub mod store;          // SQLite persistence
pub mod batch;          // CSV bulk calculation

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use error::NumerologyError;
pub use reduction::{
    reduce, reduce_number, name_to_number, name_sum, normalize_name, letter_value,
    is_master_number, NameFilter, MASTER_NUMBERS,
};
pub use birth_date::{BirthDate, DateLayout, MAX_AGE_YEARS};
pub use chart::{
    calculate_chart, calculate_chart_now,
    ChartCalculator, ChartOptions, NumerologyChart,
    ReducedDate, LifeCycles, Realizations, RealizationIndex, RealizationAges,
    Challenges, QuarterlyCycles, PersonalYearCycle,
};
pub use detection::{
    detect_rebirth, detect_legacy, detect_great_love,
    DetectionFlags, DetectionReport,
};
pub use interpretation::{Interpretation, InterpretationTable, Methodology, ChartReading};
pub use config::EngineConfig;
pub use store::{
    StoredChart, Event,
    setup_database, save_chart, get_chart, get_charts_for_customer,
    set_detection_flags, get_detection_flags, insert_event, get_events_for_entity,
    chart_fingerprint,
};
pub use batch::{BatchRow, BatchEntry, BatchOutcome, BatchSummary, load_rows, read_rows, run_batch, summarize};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
