pub(crate) mod compose;
pub(crate) mod cpu;
pub(crate) mod surface;
pub(crate) mod text;
pub(crate) mod tree;
