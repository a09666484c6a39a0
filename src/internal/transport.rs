//! HTTP 传输层：客户端只依赖 [`traits::transport::Transport`]，默认实现基于 reqwest。

pub mod impl_traits;
pub mod structs;
pub mod traits;
