pub(crate) mod scroll;
pub(crate) mod style;
pub(crate) mod timeline;
