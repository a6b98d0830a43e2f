//! Filesystem locations for config and cache data.

pub mod xdg_root;
