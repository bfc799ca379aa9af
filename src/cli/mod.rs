pub mod context;
pub mod circle_commands;
pub mod chain_commands;

use crate::chain::Chain;
use crate::config::RegistryConfig;
use crate::error::CircleResult;
use crate::model::{BlockHeight, Principal};
use crate::registry::CircleRegistry;
use context::CLIContext;

/// Run the interactive REPL.
pub fn run(config: &RegistryConfig, sender: Principal, json: bool) -> CircleResult<()> {
    let registry = CircleRegistry::open_with(&config.storage)?;
    let chain = Chain::new(registry, BlockHeight(config.chain.genesis_height))?;

    println!("Circle Registry");
    println!("Sending as {} at block {}", sender, chain.block_height());
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();

    let mut ctx = CLIContext::new(chain, sender, json);
    repl_loop(&mut ctx);
    Ok(())
}

fn repl_loop(ctx: &mut CLIContext) {
    loop {
        let input = match ctx.read_line("> ") {
            Some(s) => s,
            None => break,
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (command, args) = parse_command(input);

        match command {
            "help" | "?" => print_help(),
            "quit" | "exit" | "q" => break,

            // Registry
            "create-circle" | "create" => circle_commands::create(ctx, args),
            "circle" | "get-circle" | "show" => circle_commands::show(ctx, args),
            "members" | "get-circle-members" => circle_commands::members(ctx, args),
            "is-member" | "is-circle-member" => circle_commands::is_member(ctx, args),
            "total" | "get-total-circles" => circle_commands::total(ctx),
            "my-circles" | "circles" => circle_commands::user_circles(ctx, args),
            "stats" => circle_commands::print_stats(ctx),

            // Chain
            "sender" | "as" => chain_commands::sender(ctx, args),
            "height" => chain_commands::height(ctx),
            "mine" => chain_commands::mine(ctx, args),
            "receipts" | "txs" => chain_commands::receipts(ctx),
            "receipt" | "tx" => chain_commands::receipt(ctx, args),

            _ => println!("Unknown command: {}. Type 'help' for commands.", command),
        }
    }
}

/// Split input into command and the rest of the line.
fn parse_command(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.find(|c: char| c == ' ' || c == '\t') {
        Some(pos) => (&input[..pos], input[pos..].trim()),
        None => (input, ""),
    }
}

fn print_help() {
    println!(r#"
COMMANDS:

  Circles:
    create-circle [name]            Create a circle as the current sender
    circle <id>                     Show circle details
    members <id>                    List circle members in join order
    is-member <id> [principal]      Check membership (default: current sender)
    total                           Number of circles created
    my-circles [principal]          Circles a principal belongs to
    stats                           Registry statistics and consistency check

  Chain:
    sender [principal]              Show or switch the sending principal
    height                          Current block height
    mine [count]                    Mine empty blocks
    receipts                        List submitted transactions
    receipt <tx-id>                 Show one transaction

  Other:
    help                            Show this help
    exit / quit / q                 Exit

TIPS:
  - Circle names are 1-50 printable ASCII characters
  - Each create-circle is mined into its own block"#);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_command_splits_on_first_space() {
        assert_eq!(parse_command("create-circle Family Expenses"), ("create-circle", "Family Expenses"));
    }

    #[test]
    fn parse_command_without_args() {
        assert_eq!(parse_command("  total  "), ("total", ""));
    }

    #[test]
    fn parse_command_handles_tabs() {
        assert_eq!(parse_command("members\t3"), ("members", "3"));
    }
}
