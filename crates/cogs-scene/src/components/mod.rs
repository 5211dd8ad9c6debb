pub mod gear;
pub mod path;
