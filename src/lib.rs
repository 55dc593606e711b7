pub mod ast;
pub mod ast_printer;
pub mod callable;
pub mod class;
pub mod config;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod natives;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod session;
pub mod token;
pub mod value;

pub use session::Lox;
