// Job applications, profile updates and resume uploads for signed-in users.

pub mod handlers;
