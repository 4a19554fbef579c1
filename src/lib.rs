//! Administrative front-end for a REST user directory: a typed client for the
//! directory and a controller that owns the user list and the create/edit
//! form.

pub mod shared;
pub mod users;
