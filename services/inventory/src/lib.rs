//! 库存管理服务
//!
//! 条目保存在进程内存中，上传的照片写入缓存目录。

pub mod api;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod server;
