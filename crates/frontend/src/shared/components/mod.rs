pub mod filter_bar;
pub mod modal;
pub mod stat_card;
pub mod status_chip;
pub mod ui;
