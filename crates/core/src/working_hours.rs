//! Working-hours schedules: parsing, structural validation, parent
//! inheritance, and conflict detection.
//!
//! Times cross the boundary as `HH:MM` strings and are compared as integer
//! minute-of-day values. A malformed time string is a hard validation
//! failure, never a silent `false`. Per-day rule violations and appointment
//! conflicts come back as structured lists with bilingual reasons so the
//! caller can render them without re-deriving anything.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;
use crate::messages::{
    appointment_outside_hours_message, outside_parent_hours_message, parent_closed_message,
    LocalizedText,
};
use crate::plan::PlanType;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Day of week
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Parse a day name from the database. Matching is case-insensitive.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s.to_ascii_lowercase().as_str() {
            "monday" => Ok(Self::Monday),
            "tuesday" => Ok(Self::Tuesday),
            "wednesday" => Ok(Self::Wednesday),
            "thursday" => Ok(Self::Thursday),
            "friday" => Ok(Self::Friday),
            "saturday" => Ok(Self::Saturday),
            "sunday" => Ok(Self::Sunday),
            _ => Err(CoreError::Validation(format!("Invalid day of week '{s}'"))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Time parsing
// ---------------------------------------------------------------------------

/// Parse an `HH:MM` string to a minute-of-day value (0..=1439).
pub fn parse_time(s: &str) -> Result<u16, CoreError> {
    let malformed = || CoreError::Validation(format!("Malformed time '{s}'. Expected HH:MM"));

    let (hours, minutes) = s.split_once(':').ok_or_else(malformed)?;
    if hours.len() != 2 || minutes.len() != 2 {
        return Err(malformed());
    }
    let hours: u16 = hours.parse().map_err(|_| malformed())?;
    let minutes: u16 = minutes.parse().map_err(|_| malformed())?;
    if hours > 23 || minutes > 59 {
        return Err(malformed());
    }
    Ok(hours * 60 + minutes)
}

/// Render a minute-of-day value back to `HH:MM`.
pub fn format_minutes(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

// ---------------------------------------------------------------------------
// Day schedules
// ---------------------------------------------------------------------------

/// One day's schedule as it crosses the API/persistence boundary.
///
/// When `is_working_day` is false the time fields are logically absent; when
/// true, `opening_time < closing_time` and any break interval is a proper
/// sub-interval of the open window. `validate_day_schedule` enforces this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day_of_week: DayOfWeek,
    pub is_working_day: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_end_time: Option<String>,
}

impl DaySchedule {
    /// A closed day.
    pub fn closed(day: DayOfWeek) -> Self {
        Self {
            day_of_week: day,
            is_working_day: false,
            opening_time: None,
            closing_time: None,
            break_start_time: None,
            break_end_time: None,
        }
    }

    /// An open day without a break.
    pub fn open(day: DayOfWeek, opening: &str, closing: &str) -> Self {
        Self {
            day_of_week: day,
            is_working_day: true,
            opening_time: Some(opening.to_string()),
            closing_time: Some(closing.to_string()),
            break_start_time: None,
            break_end_time: None,
        }
    }
}

/// Parsed open window for an open day, minutes since midnight.
#[derive(Debug, Clone, Copy)]
struct OpenWindow {
    opening: u16,
    closing: u16,
}

/// Validate a single day's structural invariants and return its open window
/// (`None` for a closed day).
fn day_window(day: &DaySchedule) -> Result<Option<OpenWindow>, CoreError> {
    if !day.is_working_day {
        return Ok(None);
    }
    let day_name = day.day_of_week.as_str();
    let opening = day
        .opening_time
        .as_deref()
        .ok_or_else(|| {
            CoreError::Validation(format!("Working day {day_name} is missing an opening time"))
        })
        .and_then(parse_time)?;
    let closing = day
        .closing_time
        .as_deref()
        .ok_or_else(|| {
            CoreError::Validation(format!("Working day {day_name} is missing a closing time"))
        })
        .and_then(parse_time)?;
    if opening >= closing {
        return Err(CoreError::Validation(format!(
            "Opening time must be before closing time on {day_name}"
        )));
    }

    match (&day.break_start_time, &day.break_end_time) {
        (None, None) => {}
        (Some(start), Some(end)) => {
            let start = parse_time(start)?;
            let end = parse_time(end)?;
            if start >= end {
                return Err(CoreError::Validation(format!(
                    "Break start must be before break end on {day_name}"
                )));
            }
            if start < opening || end > closing {
                return Err(CoreError::Validation(format!(
                    "Break interval must lie within the open window on {day_name}"
                )));
            }
        }
        _ => {
            return Err(CoreError::Validation(format!(
                "Break on {day_name} must specify both start and end times"
            )));
        }
    }

    Ok(Some(OpenWindow { opening, closing }))
}

/// Validate a day's structural invariants without exposing the window.
pub fn validate_day_schedule(day: &DaySchedule) -> Result<(), CoreError> {
    day_window(day).map(|_| ())
}

// ---------------------------------------------------------------------------
// Inheritance
// ---------------------------------------------------------------------------

/// Whether an entity on `plan` may inherit working hours from its parent.
///
/// A clinic inherits from its parent complex (requires the parent id); a
/// complex inherits from the organization. The company plan sits at the root
/// and has nothing to inherit from.
pub fn can_inherit(plan: PlanType, parent_id: Option<DbId>) -> bool {
    match plan {
        PlanType::Clinic => parent_id.is_some(),
        PlanType::Complex => true,
        PlanType::Company => false,
    }
}

/// The parent entity a schedule was inherited from.
#[derive(Debug, Clone, Serialize)]
pub struct InheritanceSource {
    pub id: DbId,
    pub name: String,
}

/// A parent schedule reshaped for the child. Inherited hours are a starting
/// point, never a locked reference, so `can_modify` is always true.
#[derive(Debug, Clone, Serialize)]
pub struct InheritanceResult {
    pub schedule: Vec<DaySchedule>,
    pub source: InheritanceSource,
    pub can_modify: bool,
}

impl InheritanceResult {
    pub fn editable(schedule: Vec<DaySchedule>, source: InheritanceSource) -> Self {
        Self {
            schedule,
            source,
            can_modify: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Conflict validation
// ---------------------------------------------------------------------------

/// A per-day rule violation in a proposed schedule.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleViolation {
    /// The clinic's open window is not contained in the parent's for the day.
    OutsideParentHours {
        day_of_week: DayOfWeek,
        proposed_opening: String,
        proposed_closing: String,
        parent_opening: String,
        parent_closing: String,
        message: LocalizedText,
    },
    /// The parent is closed on a day the clinic proposes to open.
    ParentClosed {
        day_of_week: DayOfWeek,
        message: LocalizedText,
    },
}

/// A booking already scheduled in the clinic, read-only to this module.
#[derive(Debug, Clone)]
pub struct AppointmentSlot {
    pub id: DbId,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// A booking that falls outside the proposed hours and must be rescheduled.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentConflict {
    pub appointment_id: DbId,
    pub date: NaiveDate,
    pub time: String,
    pub reason: LocalizedText,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScheduleConflicts {
    pub appointments: Vec<AppointmentConflict>,
}

/// Outcome of validating a proposed clinic schedule. Ephemeral.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ScheduleViolation>,
    pub conflicts: ScheduleConflicts,
    pub requires_rescheduling: bool,
    pub affected_appointments: usize,
}

/// Validate a proposed clinic schedule against the parent complex schedule
/// and already-booked future appointments.
///
/// Containment is inclusive: a day opening exactly at the parent's opening
/// and closing exactly at the parent's closing is valid. The closed-parent
/// check and the containment check are evaluated independently per day. An
/// empty proposed schedule is vacuously valid. Malformed times anywhere in
/// either schedule abort with a `Validation` error.
pub fn validate_schedule(
    proposed: &[DaySchedule],
    parent: &[DaySchedule],
    future_appointments: &[AppointmentSlot],
) -> Result<ValidationResult, CoreError> {
    let mut errors = Vec::new();

    for day in proposed {
        let Some(window) = day_window(day)? else {
            continue;
        };
        let day_name = day.day_of_week.as_str();
        let parent_day = parent.iter().find(|p| p.day_of_week == day.day_of_week);

        // A day absent from the parent schedule counts as closed.
        let parent_window = match parent_day {
            Some(p) => day_window(p)?,
            None => None,
        };

        match parent_window {
            None => {
                errors.push(ScheduleViolation::ParentClosed {
                    day_of_week: day.day_of_week,
                    message: parent_closed_message(day_name),
                });
            }
            Some(parent_window) => {
                if window.opening < parent_window.opening || window.closing > parent_window.closing
                {
                    errors.push(ScheduleViolation::OutsideParentHours {
                        day_of_week: day.day_of_week,
                        proposed_opening: format_minutes(window.opening),
                        proposed_closing: format_minutes(window.closing),
                        parent_opening: format_minutes(parent_window.opening),
                        parent_closing: format_minutes(parent_window.closing),
                        message: outside_parent_hours_message(day_name),
                    });
                }
            }
        }
    }

    // Conflict detection runs against the PROPOSED windows, not the current
    // ones: the question is which existing bookings the new hours strand.
    let mut conflicts = ScheduleConflicts::default();
    for appointment in future_appointments {
        let day = DayOfWeek::from_date(appointment.date);
        let minute = (appointment.time.hour() * 60 + appointment.time.minute()) as u16;

        let window = match proposed.iter().find(|d| d.day_of_week == day) {
            Some(d) => day_window(d)?,
            None => None,
        };
        let inside = window
            .map(|w| minute >= w.opening && minute < w.closing)
            .unwrap_or(false);

        if !inside {
            let time = format_minutes(minute);
            conflicts.appointments.push(AppointmentConflict {
                appointment_id: appointment.id,
                date: appointment.date,
                reason: appointment_outside_hours_message(day.as_str(), &time),
                time,
            });
        }
    }

    let affected_appointments = conflicts.appointments.len();
    Ok(ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        requires_rescheduling: affected_appointments > 0,
        affected_appointments,
        conflicts,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
