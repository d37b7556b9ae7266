//! SalesForecast assistant: a keyword-matched product FAQ behind a terminal
//! chat, plus validation for the account forms.

pub mod api;
pub mod cli;
pub mod config;
pub mod faq;
pub mod forms;
