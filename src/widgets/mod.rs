pub mod chrome;
pub mod confirm_dialog;
pub mod header;
pub mod palette;
pub mod preview;
pub mod settings;
pub mod status_bar;
