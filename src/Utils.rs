//! different utility modules used throughout the project
/// console and file logging set up with simplelog
pub mod logger;
/// parse task files with structure like "title1 key1: value1 key2: value2 title2 key3: value3" into sections
pub mod task_parser;
