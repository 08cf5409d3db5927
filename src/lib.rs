pub mod analyzers;
pub mod cleaner;
pub mod output;
pub mod parser;
pub mod record;
