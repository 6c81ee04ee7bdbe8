mod cache_mirror;
mod capture_location;
mod create_reminder;
mod delete_reminder;
mod get_reminder;
mod list_reminders;
mod observe_reminders;
mod sync_reminders;
mod update_reminder;

pub use capture_location::CaptureLocationUseCase;
pub use create_reminder::CreateReminderUseCase;
pub use delete_reminder::DeleteReminderUseCase;
pub use get_reminder::GetReminderUseCase;
pub use list_reminders::ListRemindersUseCase;
pub use observe_reminders::ObserveRemindersUseCase;
pub use sync_reminders::{SyncRemindersUseCase, SyncSummary};
pub use update_reminder::UpdateReminderUseCase;
