//! 对外门面：重新导出 `link` 成员库，集成测试位于 `tests/`。
#![cfg_attr(not(feature = "simulator"), no_std)]

pub use link::*;
