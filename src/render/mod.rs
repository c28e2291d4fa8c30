pub(crate) mod compositor;
pub(crate) mod frame;
pub(crate) mod opts;
pub(crate) mod pass;
pub(crate) mod sink;
pub(crate) mod targets;
