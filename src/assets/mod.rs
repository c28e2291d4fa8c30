pub(crate) mod drawable;
