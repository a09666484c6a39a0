/// 内部导出的模块
mod internal;

#[cfg(test)]
mod tests;

/// 客户端入口
pub mod client {
    use crate::internal;
    pub use internal::client::structs::*;
}

pub use client::{RequestContext, WebDavClient};
pub use error::{is_not_found, ErrorKind, WebDavError};
pub use remote_file::{ReadStream, ResourceInfo};

pub mod auth {
    use crate::internal;
    pub use internal::auth::*;
    pub use internal::auth::structs::webdav_auth::WebdavAuth;
}

pub mod error {
    pub use crate::internal::error::*;
}

pub mod path {
    pub use crate::internal::path::path_resolver::*;
}

/// 传输层：实现 [`transport::Transport`] 即可替换默认的 reqwest 实现
pub mod transport {
    use crate::internal;
    pub use internal::transport::impl_traits::impl_reqwest_transport::ReqwestTransport;
    pub use internal::transport::structs::*;
    pub use internal::transport::traits::transport::Transport;
}

/// 对外提供webdav基础访问能力，不能限制死在客户端中，以防有人自己要用
pub mod webdav {
    pub mod functions {
        use crate::internal;
        pub use internal::webdav::functions::*;
    }

    pub mod enums {
        use crate::internal;
        pub use internal::webdav::enums::*;
    }

    pub mod traits {
        pub use crate::internal::webdav::raw_xml::impl_multi_status::*;
    }

    pub mod structs {
        pub use crate::internal::webdav::raw_xml::raw_file::*;
    }
}

pub mod remote_file {
    use crate::internal;
    // 结构体模型
    pub use internal::remote_file::structs::*;
}
