// Public handlers: the catalog read API, legal pages and sign-in.
pub mod auth;
pub mod catalog;
pub mod legal;
