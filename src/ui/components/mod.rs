pub mod report_frame;
pub mod toast;
