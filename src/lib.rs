mod config;
pub mod lock;
mod map;
pub mod mem_stat;
pub mod util;

pub use config::MapConfig;
pub use map::{Cursor, MapError, SortedConcurrentMap};

pub mod prelude {
    pub use crate::lock::MapGuard;
    pub use crate::mem_stat::MemStat;
    pub use crate::util::clamp;
    pub use crate::{Cursor, MapConfig, MapError, SortedConcurrentMap};
}
