pub(crate) mod blur;
pub(crate) mod composite;
pub(crate) mod fx;
pub(crate) mod transitions;
