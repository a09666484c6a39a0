pub mod digest_challenge;
pub mod webdav_auth;
pub mod www_authenticate;
