pub mod class_selector;
pub mod membership;
pub mod notifier;
pub mod provider;
pub mod registrar;
pub mod schedule_lookup;
pub mod time_service;
