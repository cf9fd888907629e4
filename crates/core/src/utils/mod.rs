pub mod decimal_utils;
