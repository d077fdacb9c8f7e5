// Protected handlers: JWT required, admin or superadmin role.
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod entries;
pub mod sections;
pub mod tags;
