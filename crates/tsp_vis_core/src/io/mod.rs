pub(crate) mod options;
pub(crate) mod output;
