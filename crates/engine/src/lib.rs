pub mod calendar;
pub mod draw;
pub mod events;
pub mod grid;
pub mod history;
pub mod paste;
pub mod pointer;
pub mod selection;
pub mod session;

#[cfg(test)]
pub mod harness;
