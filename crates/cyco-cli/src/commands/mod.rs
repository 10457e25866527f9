pub mod convert;
pub mod run;
