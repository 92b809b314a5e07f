//! Showtime and ticket consistency checks for a draft event.
//!
//! [`EventValidator::validate`] is total: it never fails and never stops at
//! the first problem. Findings are appended in a fixed order so callers and
//! tests can rely on it:
//!
//! 1. event name presence
//! 2. showtime count
//! 3. per showtime, in list order: time presence, future start, end after
//!    start, maximum duration, duplicate slot, then each ticket in order
//!    (name presence, name uniqueness, price, quantity, sale window, sale
//!    end before showtime end)
//!
//! A showtime whose start or end is missing or unparseable skips the
//! derived time checks.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Offset, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::clock::{Clock, SystemClock};
use super::error::{ValidationError, ValidationField, ValidationRule};
use super::timestamp::parse_wall_clock;
use crate::domain::{DraftShowtime, DraftTicket};

/// How two showtimes are judged to occupy the same slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateSlotMode {
    /// Exact match on the raw `start-end` strings as entered.
    #[default]
    Raw,
    /// Match on parsed instants, so equivalent encodings collide.
    Instant,
}

impl FromStr for DuplicateSlotMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "instant" => Ok(Self::Instant),
            other => Err(format!("unknown duplicate slot mode: {other}")),
        }
    }
}

impl fmt::Display for DuplicateSlotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw => write!(f, "raw"),
            Self::Instant => write!(f, "instant"),
        }
    }
}

/// Tunables for [`EventValidator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Longest allowed showtime. Exactly this long is accepted.
    pub max_showtime_duration: TimeDelta,
    /// Duplicate slot detection strategy.
    pub duplicate_slot_mode: DuplicateSlotMode,
    /// Offset applied to timestamps entered without one.
    pub local_offset: FixedOffset,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            max_showtime_duration: TimeDelta::hours(24),
            duplicate_slot_mode: DuplicateSlotMode::Raw,
            local_offset: FixedOffset::east_opt(7 * 3600).unwrap_or(Utc.fix()),
        }
    }
}

/// Validates draft events against the scheduling and ticketing rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventValidator {
    options: ValidatorOptions,
}

/// Outcome of reading one optional timestamp field.
#[derive(Debug, Clone, Copy)]
enum TimeValue {
    Missing,
    Malformed,
    Parsed(DateTime<Utc>),
}

impl TimeValue {
    const fn parsed(self) -> Option<DateTime<Utc>> {
        match self {
            Self::Parsed(at) => Some(at),
            Self::Missing | Self::Malformed => None,
        }
    }
}

impl EventValidator {
    /// Creates a validator with the given options.
    #[must_use]
    pub const fn new(options: ValidatorOptions) -> Self {
        Self { options }
    }

    /// Returns the active options.
    #[must_use]
    pub const fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Parses a timestamp with this validator's local offset.
    #[must_use]
    pub fn parse_time(&self, raw: &str) -> Option<DateTime<Utc>> {
        parse_wall_clock(raw, self.options.local_offset)
    }

    /// Collects every problem in the draft event.
    ///
    /// Returns an empty list when the draft may be submitted.
    #[must_use]
    pub fn validate(
        &self,
        name: &str,
        showtimes: &[DraftShowtime],
        clock: &dyn Clock,
    ) -> Vec<ValidationError> {
        let now = clock.now();
        let mut errors = Vec::new();

        if name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationField::Name,
                ValidationRule::NameRequired,
                "Tên sự kiện không được để trống",
            ));
        }

        if showtimes.is_empty() {
            errors.push(ValidationError::new(
                ValidationField::Showtimes,
                ValidationRule::ShowtimesRequired,
                "Sự kiện phải có ít nhất một suất diễn",
            ));
        }

        let mut seen_slots = HashSet::new();
        for (index, showtime) in showtimes.iter().enumerate() {
            let (start, end) = self.check_showtime_times(index, showtime, now, &mut errors);

            if let Some(key) = self.slot_key(showtime, start, end)
                && !seen_slots.insert(key)
            {
                errors.push(
                    ValidationError::new(
                        ValidationField::StartTime,
                        ValidationRule::DuplicateTimeSlot,
                        format!(
                            "Suất diễn {}: Trùng thời gian với một suất diễn khác",
                            index + 1
                        ),
                    )
                    .at_showtime(index),
                );
            }

            self.check_tickets(index, &showtime.tickets, end, &mut errors);
        }

        errors
    }

    /// Checks presence and ordering of a showtime's bounds, returning the
    /// parsed bounds for the checks that depend on them.
    fn check_showtime_times(
        &self,
        index: usize,
        showtime: &DraftShowtime,
        now: DateTime<Utc>,
        errors: &mut Vec<ValidationError>,
    ) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        let n = index + 1;
        let start = self.read(showtime.start_time.as_deref());
        let end = self.read(showtime.end_time.as_deref());

        match start {
            TimeValue::Missing => errors.push(
                ValidationError::new(
                    ValidationField::StartTime,
                    ValidationRule::StartTimeRequired,
                    format!("Suất diễn {n}: Thời gian bắt đầu là bắt buộc"),
                )
                .at_showtime(index),
            ),
            TimeValue::Malformed => errors.push(
                ValidationError::new(
                    ValidationField::StartTime,
                    ValidationRule::InvalidTimestamp,
                    format!("Suất diễn {n}: Thời gian bắt đầu không hợp lệ"),
                )
                .at_showtime(index),
            ),
            TimeValue::Parsed(_) => {}
        }

        match end {
            TimeValue::Missing => errors.push(
                ValidationError::new(
                    ValidationField::EndTime,
                    ValidationRule::EndTimeRequired,
                    format!("Suất diễn {n}: Thời gian kết thúc là bắt buộc"),
                )
                .at_showtime(index),
            ),
            TimeValue::Malformed => errors.push(
                ValidationError::new(
                    ValidationField::EndTime,
                    ValidationRule::InvalidTimestamp,
                    format!("Suất diễn {n}: Thời gian kết thúc không hợp lệ"),
                )
                .at_showtime(index),
            ),
            TimeValue::Parsed(_) => {}
        }

        let (TimeValue::Parsed(start_at), TimeValue::Parsed(end_at)) = (start, end) else {
            return (start.parsed(), end.parsed());
        };

        if start_at <= now {
            errors.push(
                ValidationError::new(
                    ValidationField::StartTime,
                    ValidationRule::StartNotInFuture,
                    format!("Suất diễn {n}: Thời gian bắt đầu phải ở tương lai"),
                )
                .at_showtime(index),
            );
        }

        if end_at <= start_at {
            errors.push(
                ValidationError::new(
                    ValidationField::EndTime,
                    ValidationRule::EndNotAfterStart,
                    format!("Suất diễn {n}: Thời gian kết thúc phải sau thời gian bắt đầu"),
                )
                .at_showtime(index),
            );
        }

        let max = self.options.max_showtime_duration;
        if end_at - start_at > max {
            errors.push(
                ValidationError::new(
                    ValidationField::EndTime,
                    ValidationRule::DurationExceeded,
                    format!(
                        "Suất diễn {n}: Thời lượng không được vượt quá {} giờ",
                        max.num_hours()
                    ),
                )
                .at_showtime(index),
            );
        }

        (Some(start_at), Some(end_at))
    }

    fn check_tickets(
        &self,
        showtime_index: usize,
        tickets: &[DraftTicket],
        showtime_end: Option<DateTime<Utc>>,
        errors: &mut Vec<ValidationError>,
    ) {
        let n = showtime_index + 1;
        let mut seen_names = HashSet::new();

        for (index, ticket) in tickets.iter().enumerate() {
            let m = index + 1;
            let at = |e: ValidationError| e.at_showtime(showtime_index).at_ticket(index);

            let trimmed = ticket.name.trim();
            if trimmed.is_empty() {
                errors.push(at(ValidationError::new(
                    ValidationField::Name,
                    ValidationRule::TicketNameRequired,
                    format!("Suất diễn {n} - Vé {m}: Tên vé là bắt buộc"),
                )));
            } else if !seen_names.insert(trimmed.to_lowercase()) {
                errors.push(at(ValidationError::new(
                    ValidationField::Name,
                    ValidationRule::DuplicateTicketName,
                    format!("Suất diễn {n} - Vé {m}: Tên vé \"{trimmed}\" đã tồn tại trong suất diễn này"),
                )));
            }

            if ticket.price.is_nan() || ticket.price < 0.0 {
                errors.push(at(ValidationError::new(
                    ValidationField::Price,
                    ValidationRule::NegativePrice,
                    format!("Suất diễn {n} - Vé {m}: Giá vé không được âm"),
                )));
            }

            if ticket.quantity <= 0 {
                errors.push(at(ValidationError::new(
                    ValidationField::Quantity,
                    ValidationRule::NonPositiveQuantity,
                    format!("Suất diễn {n} - Vé {m}: Số lượng vé phải lớn hơn 0"),
                )));
            }

            let sale_start = self.read(ticket.start_time.as_deref());
            let sale_end = self.read(ticket.end_time.as_deref());

            if matches!(sale_start, TimeValue::Malformed) {
                errors.push(at(ValidationError::new(
                    ValidationField::StartTime,
                    ValidationRule::InvalidTimestamp,
                    format!("Suất diễn {n} - Vé {m}: Thời gian mở bán không hợp lệ"),
                )));
            }
            if matches!(sale_end, TimeValue::Malformed) {
                errors.push(at(ValidationError::new(
                    ValidationField::EndTime,
                    ValidationRule::InvalidTimestamp,
                    format!("Suất diễn {n} - Vé {m}: Thời gian kết thúc bán không hợp lệ"),
                )));
            }

            if let (TimeValue::Parsed(opens), TimeValue::Parsed(closes)) = (sale_start, sale_end)
                && opens >= closes
            {
                errors.push(at(ValidationError::new(
                    ValidationField::StartTime,
                    ValidationRule::SaleWindowInverted,
                    format!(
                        "Suất diễn {n} - Vé {m}: Thời gian mở bán phải trước thời gian kết thúc bán"
                    ),
                )));
            }

            if let (TimeValue::Parsed(closes), Some(showtime_end)) = (sale_end, showtime_end)
                && closes >= showtime_end
            {
                errors.push(at(ValidationError::new(
                    ValidationField::EndTime,
                    ValidationRule::SaleEndsAfterShowtime,
                    format!(
                        "Suất diễn {n} - Vé {m}: Thời gian kết thúc bán phải trước khi suất diễn kết thúc"
                    ),
                )));
            }
        }
    }

    fn slot_key(
        &self,
        showtime: &DraftShowtime,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Option<String> {
        match self.options.duplicate_slot_mode {
            DuplicateSlotMode::Raw => {
                let start = non_blank(showtime.start_time.as_deref())?;
                let end = non_blank(showtime.end_time.as_deref())?;
                Some(format!("{start}-{end}"))
            }
            DuplicateSlotMode::Instant => Some(format!(
                "{}-{}",
                start?.timestamp_millis(),
                end?.timestamp_millis()
            )),
        }
    }

    fn read(&self, raw: Option<&str>) -> TimeValue {
        match non_blank(raw) {
            None => TimeValue::Missing,
            Some(value) => self
                .parse_time(value)
                .map_or(TimeValue::Malformed, TimeValue::Parsed),
        }
    }
}

/// Blank form inputs count as absent.
fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.trim().is_empty())
}

/// Validates a draft event with default rules against the system clock.
#[must_use]
pub fn validate_event(name: &str, showtimes: &[DraftShowtime]) -> Vec<ValidationError> {
    EventValidator::default().validate(name, showtimes, &SystemClock)
}
