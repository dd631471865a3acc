pub(crate) mod brand;
pub(crate) mod config;
pub(crate) mod photo;
pub(crate) mod state;
