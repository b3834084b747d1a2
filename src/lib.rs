pub mod editcount_core;
