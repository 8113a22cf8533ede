// Module exports for pure logic
pub mod about;
pub mod actions;
pub mod file_ops;        // Open/save of HTML files
pub mod navigation;
pub mod tabs;            // Tab manager
