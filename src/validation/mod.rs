//! Event scheduling validation.
//!
//! Pure, synchronous checks over a draft event: the event name, its
//! showtimes and each showtime's tickets. Nothing here performs I/O or
//! reads the system clock except through the [`Clock`] seam.

pub mod clock;
pub mod error;
pub mod timestamp;
pub mod validator;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{
    RuleCategory, ValidationError, ValidationField, ValidationRule, first_message, format_all,
};
pub use timestamp::{parse_utc_offset, parse_wall_clock};
pub use validator::{DuplicateSlotMode, EventValidator, ValidatorOptions, validate_event};
