pub(crate) mod dispatch;
pub(crate) mod material;
pub(crate) mod naming;
pub(crate) mod packer;
pub(crate) mod persistence;
pub(crate) mod prefab;
pub(crate) mod sprite;
