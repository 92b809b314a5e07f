//! Structured validation findings.
//!
//! A [`ValidationError`] is data, not a Rust error: the validator collects
//! every finding into a flat list and the caller decides whether to block
//! submission. Each finding carries a display-ready Vietnamese message with
//! 1-based ordinals plus zero-based indices for row highlighting.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Attribute of the draft that a finding points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValidationField {
    /// Event name or ticket name.
    Name,
    /// Showtime start or ticket sale start.
    StartTime,
    /// Showtime end or ticket sale end.
    EndTime,
    /// Ticket price.
    Price,
    /// Ticket quantity.
    Quantity,
    /// The showtime list as a whole.
    Showtimes,
}

/// Broad class of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// A required value is absent.
    MissingField,
    /// A value could not be parsed.
    Malformed,
    /// Two instants are in the wrong order.
    TemporalOrder,
    /// A showtime lasts too long.
    DurationBound,
    /// A value collides with a sibling.
    Uniqueness,
    /// A numeric value is out of range.
    Range,
}

/// The individual rule that produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValidationRule {
    /// Event name is blank.
    NameRequired,
    /// Event has no showtimes.
    ShowtimesRequired,
    /// Showtime start is missing.
    StartTimeRequired,
    /// Showtime end is missing.
    EndTimeRequired,
    /// A timestamp could not be parsed.
    InvalidTimestamp,
    /// Showtime starts at or before the current instant.
    StartNotInFuture,
    /// Showtime ends at or before its start.
    EndNotAfterStart,
    /// Showtime lasts longer than the allowed maximum.
    DurationExceeded,
    /// Another showtime already uses the same slot.
    DuplicateTimeSlot,
    /// Ticket name is blank.
    TicketNameRequired,
    /// Another ticket of the same showtime has the same name.
    DuplicateTicketName,
    /// Ticket price is negative.
    NegativePrice,
    /// Ticket quantity is zero or negative.
    NonPositiveQuantity,
    /// Ticket sale starts at or after it ends.
    SaleWindowInverted,
    /// Ticket sale ends at or after the showtime ends.
    SaleEndsAfterShowtime,
}

impl ValidationRule {
    /// Every rule, in evaluation order.
    pub const ALL: [Self; 15] = [
        Self::NameRequired,
        Self::ShowtimesRequired,
        Self::StartTimeRequired,
        Self::EndTimeRequired,
        Self::InvalidTimestamp,
        Self::StartNotInFuture,
        Self::EndNotAfterStart,
        Self::DurationExceeded,
        Self::DuplicateTimeSlot,
        Self::TicketNameRequired,
        Self::DuplicateTicketName,
        Self::NegativePrice,
        Self::NonPositiveQuantity,
        Self::SaleWindowInverted,
        Self::SaleEndsAfterShowtime,
    ];

    /// Returns the category this rule belongs to.
    #[must_use]
    pub const fn category(self) -> RuleCategory {
        match self {
            Self::NameRequired
            | Self::ShowtimesRequired
            | Self::StartTimeRequired
            | Self::EndTimeRequired
            | Self::TicketNameRequired => RuleCategory::MissingField,
            Self::InvalidTimestamp => RuleCategory::Malformed,
            Self::StartNotInFuture
            | Self::EndNotAfterStart
            | Self::SaleWindowInverted
            | Self::SaleEndsAfterShowtime => RuleCategory::TemporalOrder,
            Self::DurationExceeded => RuleCategory::DurationBound,
            Self::DuplicateTimeSlot | Self::DuplicateTicketName => RuleCategory::Uniqueness,
            Self::NegativePrice | Self::NonPositiveQuantity => RuleCategory::Range,
        }
    }

    /// Returns the fields an error of this rule can be reported on.
    #[must_use]
    pub const fn fields(self) -> &'static [ValidationField] {
        match self {
            Self::NameRequired | Self::TicketNameRequired | Self::DuplicateTicketName => {
                &[ValidationField::Name]
            }
            Self::ShowtimesRequired => &[ValidationField::Showtimes],
            Self::StartTimeRequired
            | Self::StartNotInFuture
            | Self::DuplicateTimeSlot
            | Self::SaleWindowInverted => &[ValidationField::StartTime],
            Self::EndTimeRequired
            | Self::EndNotAfterStart
            | Self::DurationExceeded
            | Self::SaleEndsAfterShowtime => &[ValidationField::EndTime],
            Self::InvalidTimestamp => &[ValidationField::StartTime, ValidationField::EndTime],
            Self::NegativePrice => &[ValidationField::Price],
            Self::NonPositiveQuantity => &[ValidationField::Quantity],
        }
    }

    /// Returns the rule identifier as a static string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NameRequired => "name_required",
            Self::ShowtimesRequired => "showtimes_required",
            Self::StartTimeRequired => "start_time_required",
            Self::EndTimeRequired => "end_time_required",
            Self::InvalidTimestamp => "invalid_timestamp",
            Self::StartNotInFuture => "start_not_in_future",
            Self::EndNotAfterStart => "end_not_after_start",
            Self::DurationExceeded => "duration_exceeded",
            Self::DuplicateTimeSlot => "duplicate_time_slot",
            Self::TicketNameRequired => "ticket_name_required",
            Self::DuplicateTicketName => "duplicate_ticket_name",
            Self::NegativePrice => "negative_price",
            Self::NonPositiveQuantity => "non_positive_quantity",
            Self::SaleWindowInverted => "sale_window_inverted",
            Self::SaleEndsAfterShowtime => "sale_ends_after_showtime",
        }
    }
}

/// One rule violation found in a draft event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationError {
    /// Attribute that failed.
    pub field: ValidationField,
    /// Rule that failed.
    pub rule: ValidationRule,
    /// Display-ready message.
    pub message: String,
    /// Zero-based showtime position, when the finding concerns a showtime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showtime_index: Option<usize>,
    /// Zero-based ticket position within its showtime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_index: Option<usize>,
}

impl ValidationError {
    /// Creates an event-level finding with no position.
    #[must_use]
    pub fn new(field: ValidationField, rule: ValidationRule, message: impl Into<String>) -> Self {
        Self {
            field,
            rule,
            message: message.into(),
            showtime_index: None,
            ticket_index: None,
        }
    }

    /// Attributes the finding to a showtime.
    #[must_use]
    pub fn at_showtime(mut self, index: usize) -> Self {
        self.showtime_index = Some(index);
        self
    }

    /// Attributes the finding to a ticket of the current showtime.
    #[must_use]
    pub fn at_ticket(mut self, index: usize) -> Self {
        self.ticket_index = Some(index);
        self
    }
}

/// Joins every message, one per line.
#[must_use]
pub fn format_all(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Returns the first message, for compact displays.
#[must_use]
pub fn first_message(errors: &[ValidationError]) -> Option<&str> {
    errors.first().map(|e| e.message.as_str())
}
