//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// Header banner background
pub const BANNER_BLUE: Color = Color::Rgb(37, 99, 235);
/// High priority
pub const PRIORITY_RED: Color = Color::Rgb(239, 68, 68);
/// Medium priority
pub const PRIORITY_YELLOW: Color = Color::Rgb(234, 179, 8);
/// Low priority
pub const PRIORITY_GREEN: Color = Color::Rgb(34, 197, 94);
/// Focus and edit-mode accent
pub const GOLD: Color = Color::Rgb(255, 215, 0);
