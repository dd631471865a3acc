pub(crate) mod notify;
pub(crate) mod pipeline;
pub(crate) mod sink;
