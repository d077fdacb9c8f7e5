// Elevated handlers: JWT required, superadmin role only.
pub mod legal;
pub mod settings;
pub mod users;
