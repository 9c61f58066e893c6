//! Bilingual (English/Arabic) message payloads.
//!
//! These are opaque data attached to results for the caller to surface;
//! nothing in this crate formats or localizes beyond picking the canonical
//! pair for a rule violation.

use serde::{Deserialize, Serialize};

use crate::plan::EntityKind;

/// An English/Arabic text pair carried alongside rule results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub ar: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: ar.into(),
        }
    }
}

/// Canonical message attached to a blocked plan-limit check.
pub fn limit_exceeded_message(kind: EntityKind, max: i64) -> LocalizedText {
    match kind {
        EntityKind::Organization => LocalizedText::new(
            format!("Your plan allows a maximum of {max} organization(s)."),
            format!("تسمح خطتك بحد أقصى {max} مؤسسة."),
        ),
        EntityKind::Complex => LocalizedText::new(
            format!("Your plan allows a maximum of {max} complex(es)."),
            format!("تسمح خطتك بحد أقصى {max} مجمع."),
        ),
        EntityKind::Clinic => LocalizedText::new(
            format!("Your plan allows a maximum of {max} clinic(s)."),
            format!("تسمح خطتك بحد أقصى {max} عيادة."),
        ),
    }
}

/// Reason attached to a booking that falls outside a proposed schedule.
pub fn appointment_outside_hours_message(day: &str, time: &str) -> LocalizedText {
    LocalizedText::new(
        format!("Appointment at {time} on {day} falls outside the proposed working hours."),
        format!("الموعد في {time} يوم {day} يقع خارج ساعات العمل المقترحة."),
    )
}

/// Reason attached to a day that lies outside the parent complex window.
pub fn outside_parent_hours_message(day: &str) -> LocalizedText {
    LocalizedText::new(
        format!("Working hours on {day} must be within the complex working hours."),
        format!("يجب أن تكون ساعات العمل يوم {day} ضمن ساعات عمل المجمع."),
    )
}

/// Reason attached to a day the clinic proposes to open while the parent
/// complex is closed.
pub fn parent_closed_message(day: &str) -> LocalizedText {
    LocalizedText::new(
        format!("The complex is closed on {day}; the clinic cannot open that day."),
        format!("المجمع مغلق يوم {day}؛ لا يمكن للعيادة العمل في هذا اليوم."),
    )
}
