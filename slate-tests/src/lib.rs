mod batch;
mod conditions;
mod ddl;
mod entity;
mod guards;
mod injection;
mod paging;
mod save;
mod types;

pub use entity::EntityTest;

use batch::batch;
use conditions::conditions;
use ddl::ddl;
use entity::entity;
use guards::guards;
use injection::injection;
use log::LevelFilter;
use paging::paging;
use save::save;
use slate::{Database, Executor};
use std::env;
use types::types;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Run every scenario against `executor`, registering the tables in `database`.
///
/// The database is expected to start empty.
pub async fn execute_tests<E: Executor>(mut executor: E, mut database: Database) {
    entity(&mut executor, &mut database).await;
    paging(&mut executor, &mut database).await;
    batch(&mut executor, &mut database).await;
    guards(&mut executor, &mut database).await;
    ddl(&mut executor, &mut database).await;
    save(&mut executor, &mut database).await;
    types(&mut executor, &mut database).await;
    injection(&mut executor, &mut database).await;
    conditions(&mut executor, &mut database).await;
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
