//! Interactive chat loop for the FoodieSpot assistant.

mod banner;
mod commands;
mod input;
mod loop_runner;

pub use loop_runner::run_chat_loop;
