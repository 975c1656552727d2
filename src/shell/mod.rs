pub(crate) mod config;
pub(crate) mod entrance;
pub(crate) mod nav;
pub(crate) mod registry;
pub(crate) mod reveal;
pub(crate) mod scope;
pub(crate) mod split;
pub(crate) mod tilt;
