//! Parametrized scenes and their JSON boundary model.
//!
//! A scene file is parsed, validated and built once; the resulting [`crate::Scene`] then answers
//! per-frame state queries without touching its inputs again.

pub(crate) mod highlight;
pub(crate) mod list;
pub(crate) mod model;
pub(crate) mod theme;
