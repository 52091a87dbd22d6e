mod as_value;
mod column;
mod condition;
mod context;
mod database;
mod ddl;
mod dialect;
mod dml;
mod entity;
mod error;
mod executor;
mod feature;
mod mapping;
mod repository;
mod request;
mod table;
mod util;
mod value;

pub use ::anyhow::Context as ErrorContext;
pub use as_value::*;
pub use column::*;
pub use condition::*;
pub use context::*;
pub use database::*;
pub use ddl::*;
pub use dialect::*;
pub use dml::*;
pub use entity::*;
pub use error::*;
pub use executor::*;
pub use feature::*;
pub use mapping::*;
pub use repository::*;
pub use request::*;
pub use table::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;
#[doc(hidden)]
pub use ::itoa;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
