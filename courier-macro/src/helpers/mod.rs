pub mod generic_helpers;
