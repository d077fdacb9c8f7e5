// Handlers by security tier:
// public (no auth) → protected (JWT, admin role) → elevated (JWT, superadmin role)
pub mod elevated;
pub mod protected;
pub mod public;
