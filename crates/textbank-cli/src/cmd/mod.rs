pub mod analysis;
pub mod spoke;
pub mod twilio;
pub mod van;
