pub mod scheduler;
pub mod timer_slot;
