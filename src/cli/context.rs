use std::io::{self, Write};

use crate::chain::Chain;
use crate::error::CircleError;
use crate::model::{Circle, Id, Principal};

pub struct CLIContext {
    pub chain: Chain,
    pub sender: Principal,
    pub json: bool,
}

impl CLIContext {
    pub fn new(chain: Chain, sender: Principal, json: bool) -> Self {
        Self {
            chain,
            sender,
            json,
        }
    }

    /// Prompt and read a line from stdin. Returns None on EOF.
    pub fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()),
            Err(_) => None,
        }
    }

    /// Parse a circle id argument. Prints usage if missing or malformed.
    pub fn circle_id(&self, args: &str, usage: &str) -> Option<Id<Circle>> {
        if args.trim().is_empty() {
            println!("Usage: {}", usage);
            return None;
        }
        match Id::parse(args) {
            Ok(id) => Some(id),
            Err(_) => {
                println!("Not a circle id: '{}'", args.trim());
                None
            }
        }
    }

    /// Parse a principal argument. Prints the validation error on failure.
    pub fn principal(&self, args: &str) -> Option<Principal> {
        match Principal::parse(args.trim()) {
            Ok(p) => Some(p),
            Err(e) => {
                self.print_error(&e);
                None
            }
        }
    }

    /// Print an error, with its registry error code when it has one.
    pub fn print_error(&self, e: &CircleError) {
        match e.error_code() {
            Some(code) => println!("Error {}: {}", code, e),
            None => println!("Error: {}", e),
        }
    }
}
