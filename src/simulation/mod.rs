pub mod lesson;
pub mod speech;
pub mod stack;
pub mod writing;
