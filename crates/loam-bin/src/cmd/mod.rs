pub mod install;
pub mod run;
pub mod target;
pub mod urls;
