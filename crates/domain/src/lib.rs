mod list_diff;
mod location;
mod reminder;
mod shared;

pub use list_diff::{diff_reminders, is_same_content, is_same_item, ReminderListDiff};
pub use location::Coordinates;
pub use reminder::{sort_newest_first, Reminder, ReminderDraft, ValidDraft, ValidationError};
pub use shared::entity::{Entity, ID};
