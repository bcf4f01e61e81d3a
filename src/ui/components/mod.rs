pub mod controls;
pub mod field;
pub mod gauge;
pub mod preview;
pub mod progress;
pub mod sidebar;
pub mod spinner;
pub mod toast;
