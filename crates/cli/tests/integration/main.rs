mod common;
mod init_tests;
mod package_tests;
mod track_tests;
mod vars_tests;
