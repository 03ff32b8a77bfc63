pub mod classify;
pub mod config;
pub mod history;
pub mod init;
pub mod log;
pub mod milestone;
pub mod next;
pub mod roadmap;
pub mod status;
pub mod test_run;
