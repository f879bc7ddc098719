//! Frame bookkeeping: nested local timelines and sequential slot allocation.

pub(crate) mod node;
pub(crate) mod slots;
