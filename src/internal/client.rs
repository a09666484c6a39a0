//! 对外的客户端：基础 URL、账号、认证缓存与传输层的组合，实现全部文件操作。

pub mod structs;
