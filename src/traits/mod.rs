//! Core traits for the inversion-of-control container.

mod aware;
mod bean;
mod dispose;
mod factory;

pub use aware::{BeanNameAware, InitializingBean};
pub use bean::{cast_dependency, downcast_bean, AsAny, Bean, BeanRef};
pub use dispose::DisposableBean;
pub use factory::{BeanFactory, BeanFactoryExt};
