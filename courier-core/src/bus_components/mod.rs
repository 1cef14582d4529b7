pub mod deferred;
pub mod handler;
pub mod messagebus;
pub mod registry;
