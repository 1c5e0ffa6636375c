pub mod report;
pub mod theme;
pub mod tutor;
