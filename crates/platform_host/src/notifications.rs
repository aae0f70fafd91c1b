//! Notification sink contracts and in-process adapters.
//!
//! Widgets call into this sink for user-visible alerts (pomodoro phase changes, due reminders).
//! Delivery is best-effort: callers log failures and carry on.

use std::{cell::RefCell, rc::Rc};

/// Host service for user-visible notifications and short audio cues.
pub trait NotificationService {
    /// Dispatches a notification message.
    ///
    /// # Errors
    ///
    /// Returns an error when the host rejects or cannot display the notification.
    fn notify(&self, title: &str, body: &str) -> Result<(), String>;

    /// Plays the short alert chime.
    ///
    /// # Errors
    ///
    /// Returns an error when audio output is unavailable.
    fn play_chime(&self) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op notification service for unsupported targets.
pub struct NoopNotificationService;

impl NotificationService for NoopNotificationService {
    fn notify(&self, _title: &str, _body: &str) -> Result<(), String> {
        Ok(())
    }

    fn play_chime(&self) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// Recording notification service used by tests and headless hosts.
pub struct MemoryNotificationService {
    delivered: Rc<RefCell<Vec<(String, String)>>>,
    chimes: Rc<RefCell<usize>>,
}

impl MemoryNotificationService {
    /// Returns every `(title, body)` pair delivered so far.
    pub fn delivered(&self) -> Vec<(String, String)> {
        self.delivered.borrow().clone()
    }

    /// Returns how many chimes were played.
    pub fn chime_count(&self) -> usize {
        *self.chimes.borrow()
    }
}

impl NotificationService for MemoryNotificationService {
    fn notify(&self, title: &str, body: &str) -> Result<(), String> {
        self.delivered
            .borrow_mut()
            .push((title.to_string(), body.to_string()));
        Ok(())
    }

    fn play_chime(&self) -> Result<(), String> {
        *self.chimes.borrow_mut() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_service_records_deliveries_across_clones() {
        let service = MemoryNotificationService::default();
        let sink: Rc<dyn NotificationService> = Rc::new(service.clone());

        sink.notify("Pomodoro", "Break time").expect("notify");
        sink.play_chime().expect("chime");

        assert_eq!(
            service.delivered(),
            vec![("Pomodoro".to_string(), "Break time".to_string())]
        );
        assert_eq!(service.chime_count(), 1);
    }
}
