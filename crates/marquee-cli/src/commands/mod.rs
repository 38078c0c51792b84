pub mod init;
pub mod new;
