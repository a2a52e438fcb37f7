//! Internal implementation details.

pub(crate) mod dispose_bag;
pub(crate) mod sync;

pub(crate) use dispose_bag::DisposeBag;
pub(crate) use sync::{Mutex, RwLock};
