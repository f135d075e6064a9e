pub mod decimal_utils;
pub mod format_utils;
pub mod time_utils;
