pub mod dump;
pub mod history;
pub mod reader;
pub mod writer;
