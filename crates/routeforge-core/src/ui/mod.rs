pub mod autoroute_panel;
pub mod display_misc_panel;

pub use autoroute_panel::show_autoroute_panel;
pub use display_misc_panel::show_display_misc_panel;
