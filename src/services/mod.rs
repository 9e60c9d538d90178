pub mod notification_service;

pub use notification_service::NotificationService;
