//! Reine Geometrie-Prädikate und -Extraktoren für die Stationierung.
//!
//! Alle Funktionen sind seiteneffektfrei: Polylinie (+ Zahlen) rein,
//! neue Werte/Geometrien oder ein `LrError` raus.

mod measure;
mod offset;
mod substring;
mod trajectory;
mod validity;

pub use measure::{interpolate_n, length, locate_point};
pub use offset::{offset_curve, ARC_SEGMENTS_PER_QUARTER};
pub use substring::curve_substring;
pub use trajectory::{locate_n_from_m, trajectory_interpolate_m, BINARY_DESCENT_CUTOFF};
pub use validity::{
    check_m_valid, check_n_valid, is_m_valid, is_n_valid, m_range, merge_connected,
    PART_JOIN_TOLERANCE,
};

pub(crate) use measure::{clamp_with_rounding, project_on_segment};
